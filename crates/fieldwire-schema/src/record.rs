use crate::{
    error::{RecordError, SchemaError},
    registry,
    schema::RecordSchema,
};
use fieldwire_core::{
    error::{FieldValueError, IgnoreField},
    field::Field,
    value::Value,
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::{debug, trace};

///
/// CleanHook
///
/// Per-record interception of every assignment. Returning `IgnoreField`
/// skips the assignment and marks the field ignored.
///

pub trait CleanHook: Send + Sync {
    fn clean_field_value(&self, name: &str, value: Value) -> Result<Value, IgnoreField>;
}

impl<F> CleanHook for F
where
    F: Fn(&str, Value) -> Result<Value, IgnoreField> + Send + Sync,
{
    fn clean_field_value(&self, name: &str, value: Value) -> Result<Value, IgnoreField> {
        self(name, value)
    }
}

///
/// Record
///
/// One instance of a registered schema. Every declared field is spawned
/// fresh for the record and owned by it.
///

pub struct Record {
    schema: Arc<RecordSchema>,
    fields: Vec<Box<dyn Field>>,
    hook: Option<Arc<dyn CleanHook>>,
}

impl Record {
    #[must_use]
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|decl| decl.prototype().spawn())
            .collect();

        Self {
            schema,
            fields,
            hook: None,
        }
    }

    /// Instance of a schema from the process-wide registry.
    pub fn from_registry(name: &str) -> Result<Self, SchemaError> {
        registry::lookup(name).map(Self::new)
    }

    #[must_use]
    pub fn with_hook(mut self, hook: impl CleanHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    ///
    /// ACCESS
    ///

    /// Assign through the field pipeline: clean hook, `set_value`, then
    /// `validate`.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let index = self.index_of(name)?;

        self.assign(index, value.into())?;

        Ok(())
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&dyn Field> {
        self.schema
            .position(name)
            .map(|i| self.fields[i].as_ref())
    }

    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut (dyn Field + 'static)> {
        self.schema
            .position(name)
            .map(|i| self.fields[i].as_mut())
    }

    /// Domain value of a field; `None` for unknown, hidden or ignored
    /// fields.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.get_field(name)
            .filter(|field| !field.meta().is_ignored())
            .and_then(|field| field.to_domain())
    }

    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.get_field(name)
            .is_some_and(|field| field.meta().is_ignored())
    }

    /// Assign every known input, collecting all failures. Unknown keys are
    /// skipped.
    pub fn load<I, K, V>(&mut self, input: I) -> Result<(), RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut issues = BTreeMap::new();

        for (key, value) in input {
            let key = key.as_ref();
            let Some(index) = self.schema.position(key) else {
                trace!(record = self.schema.name(), key, "skipping unknown input key");
                continue;
            };

            if let Err(err) = self.assign(index, value.into()) {
                merge_issues(&mut issues, &err);
            }
        }

        self.finish(issues)
    }

    /// Validate every field that is not ignored.
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut issues = BTreeMap::new();

        for field in self.active_fields() {
            if let Err(err) = field.validate() {
                merge_issues(&mut issues, &err);
            }
        }

        self.finish(issues)
    }

    ///
    /// RENDERING
    ///

    /// Native output keyed by each field's primary name.
    #[must_use]
    pub fn to_native(&self) -> Rendered {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .filter(|(_, field)| !field.meta().is_ignored())
            .filter_map(|(decl, field)| {
                let key = field.meta().primary_name().unwrap_or(decl.name());
                field.to_native().map(|value| (key.to_string(), value))
            })
            .collect()
    }

    /// Domain output keyed by attribute name.
    #[must_use]
    pub fn to_domain(&self) -> Rendered {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .filter(|(_, field)| !field.meta().is_ignored())
            .filter_map(|(decl, field)| {
                field
                    .to_domain()
                    .map(|value| (decl.name().to_string(), value))
            })
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize, RecordError> {
        self.schema
            .position(name)
            .ok_or_else(|| RecordError::UnknownField {
                record: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }

    // every name of the field is offered to the hook in turn, threading the
    // cleaned value through; an ignore from any of them ignores the field
    fn assign(&mut self, index: usize, value: Value) -> Result<(), FieldValueError> {
        let mut value = value;

        if let Some(hook) = &self.hook {
            let names = self.fields[index].names().to_vec();
            for name in &names {
                match hook.clean_field_value(name, value) {
                    Ok(cleaned) => value = cleaned,
                    Err(IgnoreField) => {
                        debug!(
                            record = self.schema.name(),
                            field = %name,
                            "field ignored by clean hook"
                        );
                        self.fields[index].meta_mut().set_ignore(true);
                        return Ok(());
                    }
                }
            }
        }

        let field = &mut self.fields[index];
        field.meta_mut().set_ignore(false);
        field.set_value(value);

        field.validate()
    }

    fn active_fields(&self) -> impl Iterator<Item = &dyn Field> {
        self.fields
            .iter()
            .map(|field| &**field)
            .filter(|field| !field.meta().is_ignored())
    }

    fn finish(&self, issues: BTreeMap<String, Vec<String>>) -> Result<(), RecordError> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RecordError::Invalid {
                record: self.schema.name().to_string(),
                issues,
            })
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("schema", &self.schema.name())
            .field("fields", &self.fields)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

fn merge_issues(issues: &mut BTreeMap<String, Vec<String>>, err: &FieldValueError) {
    for (path, messages) in err.issues() {
        issues.entry(path).or_default().extend(messages);
    }
}

///
/// Rendered
///
/// Ordered name to value output of a record. Serializes as a map.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendered(Vec<(String, Value)>);

impl Rendered {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<(String, Value)> {
        self.0
    }
}

impl FromIterator<(String, Value)> for Rendered {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Rendered {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Rendered {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
