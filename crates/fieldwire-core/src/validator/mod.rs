mod len;
mod num;
mod text;

pub use len::{MaxLength, MinLength};
pub use num::{DecimalFormat, MaxValue, MinValue};
pub use text::{IsDecimal, IsEmail, IsFloat, IsInteger, IsString, IsUrl, IsUuid};

use crate::{error::Violation, value::Value};
use std::{fmt::Debug, sync::Arc};

///
/// Validator
///
/// Pure check of one value. Validators never see empty values: the field
/// contract settles required/empty before running them.
///

pub trait Validator: Debug + Send + Sync {
    fn validate(&self, value: &Value) -> Result<(), Violation>;
}

/// Shared handle; a declaration and every instance spawned from it hold the
/// same validator objects.
pub type SharedValidator = Arc<dyn Validator>;

/// Run every validator in order, keeping all violations.
#[must_use]
pub fn run_all(validators: &[SharedValidator], value: &Value) -> Vec<Violation> {
    validators
        .iter()
        .filter_map(|validator| validator.validate(value).err())
        .collect()
}
