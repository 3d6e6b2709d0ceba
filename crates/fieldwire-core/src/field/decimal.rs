use crate::{
    error::FieldValueError,
    field::{Field, FieldKind, FieldMeta},
    types::Decimal,
    validator::{DecimalFormat, MaxValue, MinValue, Validator},
    value::Value,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

///
/// DecimalOutput
/// Native rendering mode of a decimal field.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalOutput {
    #[default]
    AsFloat,
    AsString,
}

///
/// DecimalField
///
/// Quantizes numeric input to `decimal_places` on assignment. Input that
/// does not parse as a decimal is kept as given and rejected by `validate`.
///

#[derive(Clone, Debug)]
pub struct DecimalField {
    meta: FieldMeta,
    value: Value,
    decimal_places: u32,
    precision: Option<u32>,
    output: DecimalOutput,
}

impl DecimalField {
    pub const DEFAULT_DECIMAL_PLACES: u32 = 3;

    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: FieldMeta::default(),
            value: Value::Null,
            decimal_places: Self::DEFAULT_DECIMAL_PLACES,
            precision: None,
            output: DecimalOutput::default(),
        }
    }

    #[must_use]
    pub fn decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self.requantize();
        self
    }

    /// Override the rounding context precision (significant digits).
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self.requantize();
        self
    }

    #[must_use]
    pub fn output(mut self, output: DecimalOutput) -> Self {
        self.output = output;
        self
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

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.decimal_places
    }

    /// The stored decimal, if the last assignment quantized cleanly.
    #[must_use]
    pub const fn decimal(&self) -> Option<Decimal> {
        match self.value {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Numeric equality; the comparand is coerced to a decimal first and
    /// anything that does not coerce compares unequal.
    #[must_use]
    pub fn eq_value(&self, other: &Value) -> bool {
        let Some(current) = self.decimal() else {
            return false;
        };

        let other = match other {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Float(f) => Decimal::from_f64_text(*f),
            Value::Decimal(d) => Some(*d),
            Value::Text(s) => Decimal::parse(s),
            _ => None,
        };

        other == Some(current)
    }

    fn quantize(&self, raw: Value) -> Value {
        match raw {
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) | Value::Text(_) => {
                // floats round from their exact binary value
                let decimal = match &raw {
                    Value::Float(f) => Decimal::from_f64_exact(*f),
                    other => other.as_decimal(),
                };

                match decimal.map(|d| d.quantize(self.decimal_places, self.precision)) {
                    Some(Ok(q)) => Value::Decimal(q),
                    outcome => {
                        trace!(raw = %raw, ?outcome, "decimal input stored unquantized");
                        raw
                    }
                }
            }
            _ => Value::Null,
        }
    }

    // scale or precision changed after a value was already held
    fn requantize(&mut self) {
        if !self.value.is_empty() {
            let value = std::mem::take(&mut self.value);
            self.value = self.quantize(value);
        }
    }
}

impl Default for DecimalField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for DecimalField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Decimal
    }

    fn set_value(&mut self, raw: Value) {
        self.value = self.quantize(raw);
    }

    fn validate(&self) -> Result<(), FieldValueError> {
        let format = DecimalFormat::new(self.decimal_places, self.precision);

        self.meta.check_with(&self.value, || {
            format.validate(&self.value).err().into_iter().collect()
        })
    }

    fn native(&self) -> Value {
        match (&self.value, self.output) {
            (Value::Decimal(d), DecimalOutput::AsFloat) => {
                d.to_f64().map_or_else(|| Value::Text(d.to_string()), Value::Float)
            }
            (Value::Decimal(d), DecimalOutput::AsString) => Value::Text(d.to_string()),
            (other, _) => other.clone(),
        }
    }

    fn domain(&self) -> Value {
        self.value.clone()
    }
}

impl PartialEq<Value> for DecimalField {
    fn eq(&self, other: &Value) -> bool {
        self.eq_value(other)
    }
}

impl PartialEq<i64> for DecimalField {
    fn eq(&self, other: &i64) -> bool {
        self.eq_value(&Value::Int(*other))
    }
}

impl PartialEq<f64> for DecimalField {
    fn eq(&self, other: &f64) -> bool {
        self.eq_value(&Value::Float(*other))
    }
}

impl PartialEq<Decimal> for DecimalField {
    fn eq(&self, other: &Decimal) -> bool {
        self.eq_value(&Value::Decimal(*other))
    }
}

impl PartialEq<&str> for DecimalField {
    fn eq(&self, other: &&str) -> bool {
        self.eq_value(&Value::Text((*other).to_string()))
    }
}

impl_field_builder!(DecimalField);
