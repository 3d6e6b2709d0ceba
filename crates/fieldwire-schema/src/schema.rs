use crate::record::Record;
use fieldwire_core::field::Field;
use std::sync::Arc;

///
/// FieldDecl
///
/// One declared field: the attribute name it is declared under and the
/// prototype every record instance is spawned from.
///

#[derive(Debug)]
pub struct FieldDecl {
    name: String,
    prototype: Box<dyn Field>,
}

impl FieldDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, mut prototype: Box<dyn Field>) -> Self {
        let name = name.into();
        prototype.meta_mut().add_name(name.clone());

        Self { name, prototype }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn prototype(&self) -> &dyn Field {
        self.prototype.as_ref()
    }

    /// Matches the attribute name, any alias, or the mapped source name.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.prototype.meta().has_name(name)
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            prototype: self.prototype.spawn(),
        }
    }
}

///
/// RecordSchema
///
/// Immutable, ordered field declarations of one record type. Inherited
/// fields are already merged in once the schema is registered.
///

#[derive(Debug)]
pub struct RecordSchema {
    name: String,
    parent: Option<String>,
    fields: Vec<FieldDecl>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDecl::name).collect()
    }

    /// Position of the field answering to `name`; the attribute name wins
    /// over aliases of other fields.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|decl| decl.name == name)
            .or_else(|| self.fields.iter().position(|decl| decl.answers_to(name)))
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.position(name).map(|i| &self.fields[i])
    }

    /// Fresh record instance of this schema.
    #[must_use]
    pub fn record(self: &Arc<Self>) -> Record {
        Record::new(Arc::clone(self))
    }

    // parent declarations first; a child declaration with the same name
    // takes over the parent's slot
    pub(crate) fn inherit(&mut self, parent: &Self) {
        let mut merged: Vec<FieldDecl> = parent.fields.iter().map(FieldDecl::duplicate).collect();

        for decl in self.fields.drain(..) {
            match merged.iter().position(|m| m.name == decl.name) {
                Some(i) => merged[i] = decl,
                None => merged.push(decl),
            }
        }

        self.fields = merged;
    }
}

///
/// RecordSchemaBuilder
///

#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    parent: Option<String>,
    fields: Vec<FieldDecl>,
}

impl RecordSchemaBuilder {
    /// Inherit every field of a registered schema.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: impl Field + 'static) -> Self {
        self.push_field(name, Box::new(field));
        self
    }

    /// Declare a field; redeclaring a name replaces the earlier declaration.
    pub fn push_field(&mut self, name: impl Into<String>, field: Box<dyn Field>) {
        let decl = FieldDecl::new(name, field);

        match self.fields.iter().position(|d| d.name == decl.name) {
            Some(i) => self.fields[i] = decl,
            None => self.fields.push(decl),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if a declaration answers to `name`.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|decl| decl.answers_to(name))
    }

    /// Schema without inheritance resolved; `register` resolves it.
    #[must_use]
    pub fn build(self) -> RecordSchema {
        RecordSchema {
            name: self.name,
            parent: self.parent,
            fields: self.fields,
        }
    }
}
