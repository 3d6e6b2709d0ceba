use crate::{
    error::FieldValueError,
    field::{Field, FieldKind, FieldMeta, FieldOptions},
    value::Value,
};

///
/// TypeField
///
/// Type discriminator. Always an identity field and never fails
/// validation; a fixed tag ignores input.
///

#[derive(Clone, Debug)]
pub struct TypeField {
    meta: FieldMeta,
    name: String,
    fixed: bool,
}

impl TypeField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: FieldMeta::new(FieldOptions {
                identity: true,
                ..Default::default()
            }),
            name: name.into(),
            fixed: false,
        }
    }

    /// Tag whose name cannot be overwritten by input.
    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            fixed: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.meta.add_name(name);
        self
    }
}

impl Field for TypeField {
    fn kind(&self) -> FieldKind {
        FieldKind::Type
    }

    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut FieldMeta {
        &mut self.meta
    }

    fn raw_value(&self) -> Value {
        Value::Text(self.name.clone())
    }

    fn set_value(&mut self, raw: Value) {
        if !self.fixed {
            self.name = raw.to_text();
        }
    }

    fn validate(&self) -> Result<(), FieldValueError> {
        Ok(())
    }

    fn native(&self) -> Value {
        self.raw_value()
    }

    fn domain(&self) -> Value {
        self.raw_value()
    }

    // the tag survives spawning; it is declaration state
    fn spawn(&self) -> Box<dyn Field> {
        Box::new(Self {
            meta: self.meta.spawn(),
            ..self.clone()
        })
    }
}
