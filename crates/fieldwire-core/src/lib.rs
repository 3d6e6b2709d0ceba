//! Core of fieldwire: the dynamic `Value`, decimal quantization, validator
//! primitives, the `Field` contract, and every concrete field kind.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod field;
pub mod types;
pub mod validator;
pub mod value;

///
/// Prelude
///
/// Prelude contains the field vocabulary needed to declare and drive fields.
///

pub mod prelude {
    pub use crate::{
        error::{FieldValueError, IgnoreField, Violation, ViolationKind},
        field::{
            BooleanField, Choice, ChoiceField, DecimalField, DecimalOutput, Field, FieldKind,
            FieldOptions, FloatField, IntegerField, ListField, NullPolicy, StringField, TypeField,
            UrlField, UuidField,
        },
        types::Decimal,
        validator::Validator,
        value::Value,
    };
}
