use crate::{error::Violation, validator::Validator, value::Value};

// Length of text in characters, or of a list in items.
fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::Text(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        _ => None,
    }
}

///
/// MaxLength
///

#[derive(Clone, Copy, Debug)]
pub struct MaxLength {
    target: usize,
}

impl MaxLength {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let len = value_len(value).unwrap_or_else(|| value.to_text().chars().count());

        if len > self.target {
            Err(Violation::range(format!(
                "Ensure this value has at most {} characters (it has {len}).",
                self.target
            )))
        } else {
            Ok(())
        }
    }
}

///
/// MinLength
///

#[derive(Clone, Copy, Debug)]
pub struct MinLength {
    target: usize,
}

impl MinLength {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let len = value_len(value).unwrap_or_else(|| value.to_text().chars().count());

        if len < self.target {
            Err(Violation::range(format!(
                "Ensure this value has at least {} characters (it has {len}).",
                self.target
            )))
        } else {
            Ok(())
        }
    }
}

///
/// TESTS
///
