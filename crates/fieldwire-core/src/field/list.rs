use crate::{
    error::{FieldValueError, ItemViolation, Violation},
    field::{Field, FieldKind, FieldMeta},
    validator::run_all,
    value::Value,
};
use std::{slice, sync::OnceLock};
use tracing::trace;

///
/// ListField
///
/// Owns one sub-field per item, each spawned from the item prototype and
/// validated on its own. Native and domain projections are memoized and
/// reset by every mutation.
///

#[derive(Debug)]
pub struct ListField {
    meta: FieldMeta,
    prototype: Box<dyn Field>,
    items: Vec<Box<dyn Field>>,
    native_items: OnceLock<Vec<Value>>,
    domain_items: OnceLock<Vec<Value>>,
}

impl ListField {
    pub fn new(prototype: impl Field + 'static) -> Self {
        Self::from_boxed(Box::new(prototype))
    }

    /// List of default-configured `F` items.
    #[must_use]
    pub fn of<F: Field + Default + 'static>() -> Self {
        Self::new(F::default())
    }

    #[must_use]
    pub fn from_boxed(prototype: Box<dyn Field>) -> Self {
        Self {
            meta: FieldMeta::default(),
            prototype,
            items: Vec::new(),
            native_items: OnceLock::new(),
            domain_items: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn prototype(&self) -> &dyn Field {
        self.prototype.as_ref()
    }

    /// Add one item, then re-validate the whole list.
    pub fn append(&mut self, value: impl Into<Value>) -> Result<(), FieldValueError> {
        let item = self.make_item(value.into());
        self.items.push(item);
        self.invalidate();

        self.validate()
    }

    /// Replace the item at `index` in place, then re-validate the whole list.
    pub fn set_item(&mut self, index: usize, value: impl Into<Value>) -> Result<(), FieldValueError> {
        let len = self.items.len();
        let Some(item) = self.items.get_mut(index) else {
            return Err(self.meta.fail(vec![Violation::range(format!(
                "Index {index} is out of range for a list of {len} item(s)."
            ))]));
        };

        item.set_value(value.into());
        self.invalidate();

        self.validate()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Domain value of the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.domain_items().get(index)
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.domain_items().contains(value)
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.domain_items().iter()
    }

    #[must_use]
    pub fn items(&self) -> &[Box<dyn Field>] {
        &self.items
    }

    fn make_item(&self, value: Value) -> Box<dyn Field> {
        let mut item = self.prototype.spawn();
        item.set_value(value);

        item
    }

    fn invalidate(&mut self) {
        self.native_items = OnceLock::new();
        self.domain_items = OnceLock::new();
    }

    // hidden items render as null so positions stay aligned
    fn native_items(&self) -> &[Value] {
        self.native_items.get_or_init(|| {
            trace!(items = self.items.len(), "rebuilding native list projection");
            self.items
                .iter()
                .map(|item| item.to_native().unwrap_or_default())
                .collect()
        })
    }

    fn domain_items(&self) -> &[Value] {
        self.domain_items.get_or_init(|| {
            trace!(items = self.items.len(), "rebuilding domain list projection");
            self.items
                .iter()
                .map(|item| item.to_domain().unwrap_or_default())
                .collect()
        })
    }
}

impl Field for ListField {
    fn kind(&self) -> FieldKind {
        FieldKind::List
    }

    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut FieldMeta {
        &mut self.meta
    }

    fn raw_value(&self) -> Value {
        Value::List(self.items.iter().map(|item| item.raw_value()).collect())
    }

    fn has_value(&self) -> bool {
        !self.items.is_empty()
    }

    fn set_value(&mut self, raw: Value) {
        self.items.clear();
        self.invalidate();

        match raw {
            Value::List(values) => {
                let items = values.into_iter().map(|v| self.make_item(v)).collect();
                self.items = items;
            }
            raw if raw.is_empty() => {}
            raw => {
                let item = self.make_item(raw);
                self.items.push(item);
            }
        }
    }

    fn validate(&self) -> Result<(), FieldValueError> {
        if self.items.is_empty() {
            return self.meta.check_empty();
        }

        let failed: Vec<ItemViolation> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.validate().err().map(|err| ItemViolation {
                    index,
                    violations: err.violations,
                })
            })
            .collect();

        let mut violations = Vec::new();
        if !failed.is_empty() {
            violations.push(Violation::Compound(failed));
        }
        violations.extend(run_all(self.meta.validators(), &self.raw_value()));

        if violations.is_empty() {
            Ok(())
        } else {
            Err(self.meta.fail(violations))
        }
    }

    fn native(&self) -> Value {
        Value::List(self.native_items().to_vec())
    }

    fn domain(&self) -> Value {
        Value::List(self.domain_items().to_vec())
    }

    fn spawn(&self) -> Box<dyn Field> {
        Box::new(Self {
            meta: self.meta.spawn(),
            prototype: self.prototype.spawn(),
            items: Vec::new(),
            native_items: OnceLock::new(),
            domain_items: OnceLock::new(),
        })
    }
}

impl<'a> IntoIterator for &'a ListField {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl_field_builder!(ListField);
