use crate::{
    field::{Field, FieldKind, FieldMeta},
    value::Value,
};

///
/// BooleanField
///
/// `"false"` and `"0"` (any case) are false, other non-empty input follows
/// truthiness.
///

#[derive(Clone, Debug, Default)]
pub struct BooleanField {
    meta: FieldMeta,
    value: Value,
}

impl BooleanField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn coerce(raw: &Value) -> Value {
        match raw {
            raw if raw.is_empty() => Value::Null,
            Value::Text(s) if s.eq_ignore_ascii_case("false") || s == "0" => Value::Bool(false),
            other => Value::Bool(other.is_truthy()),
        }
    }
}

impl Field for BooleanField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Boolean
    }

    fn set_value(&mut self, raw: Value) {
        self.value = Self::coerce(&raw);
    }

    fn native(&self) -> Value {
        self.value.clone()
    }

    fn domain(&self) -> Value {
        self.value.clone()
    }

    // Null policy runs first; whatever it yields is forced to a boolean.
    // A hidden field stays hidden.
    fn to_native(&self) -> Option<Value> {
        let rendered = if self.has_value() {
            Some(self.native())
        } else {
            self.meta.render_null()
        };

        rendered.map(|v| Value::Bool(v.is_truthy()))
    }
}

impl_field_builder!(BooleanField);
