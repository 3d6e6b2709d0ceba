use crate::{
    error::Violation,
    types::{Decimal, QuantizeError},
    validator::{IsDecimal, Validator},
    value::Value,
};

fn target_decimal(target: &Value, label: &str) -> Result<Decimal, Violation> {
    target
        .as_decimal()
        .ok_or_else(|| Violation::format(format!("invalid {label} configuration: {target}")))
}

///
/// MaxValue
///

#[derive(Clone, Debug)]
pub struct MaxValue {
    target: Result<Decimal, Violation>,
}

impl MaxValue {
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target_decimal(&target.into(), "max_value"),
        }
    }
}

impl Validator for MaxValue {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let target = self.target.as_ref().map_err(Clone::clone)?;

        // non-numeric input is reported by the format validator
        match value.as_decimal() {
            Some(v) if v > *target => Err(Violation::range(format!(
                "Ensure this value is less than or equal to {target}."
            ))),
            _ => Ok(()),
        }
    }
}

///
/// MinValue
///

#[derive(Clone, Debug)]
pub struct MinValue {
    target: Result<Decimal, Violation>,
}

impl MinValue {
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target_decimal(&target.into(), "min_value"),
        }
    }
}

impl Validator for MinValue {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let target = self.target.as_ref().map_err(Clone::clone)?;

        match value.as_decimal() {
            Some(v) if v < *target => Err(Violation::range(format!(
                "Ensure this value is greater than or equal to {target}."
            ))),
            _ => Ok(()),
        }
    }
}

///
/// DecimalFormat
///
/// Checks that a value can be quantized at the field's scale and precision.
/// Values already stored as quantized decimals pass immediately.
///

#[derive(Clone, Copy, Debug)]
pub struct DecimalFormat {
    decimal_places: u32,
    precision: Option<u32>,
}

impl DecimalFormat {
    #[must_use]
    pub const fn new(decimal_places: u32, precision: Option<u32>) -> Self {
        Self {
            decimal_places,
            precision,
        }
    }
}

impl Validator for DecimalFormat {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        if let Value::Decimal(d) = value
            && d.scale() == self.decimal_places
        {
            return Ok(());
        }

        let Some(d) = value.as_decimal() else {
            return IsDecimal.validate(value);
        };

        match d.quantize(self.decimal_places, self.precision) {
            Ok(_) => Ok(()),
            Err(QuantizeError::PrecisionExceeded { precision, .. }) => Err(Violation::range(
                format!("Ensure that there are no more than {precision} digits in total."),
            )),
            Err(err) => Err(Violation::format(err.to_string())),
        }
    }
}

///
/// TESTS
///
