use crate::{
    field::{Field, FieldKind, FieldMeta},
    validator::{IsFloat, IsInteger, MaxValue, MinValue},
    value::Value,
};

///
/// IntegerField
///
/// Parses to a whole number. Empty input renders `Null` on both sides,
/// never zero.
///

#[derive(Clone, Debug)]
pub struct IntegerField {
    meta: FieldMeta,
    value: Value,
}

impl IntegerField {
    #[must_use]
    pub fn new() -> Self {
        let mut meta = FieldMeta::default();
        meta.push_validator(IsInteger);

        Self {
            meta,
            value: Value::Null,
        }
    }

    /// Integer field with a lower bound of zero.
    #[must_use]
    pub fn positive() -> Self {
        Self::new().min_value(0)
    }

    #[must_use]
    pub fn max_value(mut self, max: impl Into<Value>) -> Self {
        self.meta.push_validator(MaxValue::new(max));
        self
    }

    #[must_use]
    pub fn min_value(mut self, min: impl Into<Value>) -> Self {
        self.meta.push_validator(MinValue::new(min));
        self
    }

    fn coerce(&self) -> Value {
        self.value
            .as_i64()
            .map_or_else(|| self.value.clone(), Value::Int)
    }
}

impl Default for IntegerField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for IntegerField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Integer
    }

    fn set_value(&mut self, raw: Value) {
        self.value = raw;
    }

    fn native(&self) -> Value {
        self.coerce()
    }

    fn domain(&self) -> Value {
        self.coerce()
    }
}

///
/// FloatField
///

#[derive(Clone, Debug)]
pub struct FloatField {
    meta: FieldMeta,
    value: Value,
}

impl FloatField {
    #[must_use]
    pub fn new() -> Self {
        let mut meta = FieldMeta::default();
        meta.push_validator(IsFloat);

        Self {
            meta,
            value: Value::Null,
        }
    }

    #[must_use]
    pub fn max_value(mut self, max: impl Into<Value>) -> Self {
        self.meta.push_validator(MaxValue::new(max));
        self
    }

    #[must_use]
    pub fn min_value(mut self, min: impl Into<Value>) -> Self {
        self.meta.push_validator(MinValue::new(min));
        self
    }

    fn coerce(&self) -> Value {
        self.value
            .as_f64()
            .map_or_else(|| self.value.clone(), Value::Float)
    }
}

impl Default for FloatField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for FloatField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Float
    }

    fn set_value(&mut self, raw: Value) {
        self.value = raw;
    }

    fn native(&self) -> Value {
        self.coerce()
    }

    fn domain(&self) -> Value {
        self.coerce()
    }
}

impl_field_builder!(IntegerField, FloatField);
