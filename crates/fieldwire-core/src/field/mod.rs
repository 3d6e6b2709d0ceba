#[macro_use]
mod macros;
mod boolean;
mod choice;
mod decimal;
mod list;
mod meta;
mod numeric;
mod text;
mod type_tag;

#[cfg(test)]
mod tests;

pub use boolean::BooleanField;
pub use choice::{Choice, ChoiceField};
pub use decimal::{DecimalField, DecimalOutput};
pub use list::ListField;
pub use meta::{FieldMeta, FieldOptions, NullPolicy};
pub use numeric::{FloatField, IntegerField};
pub use text::{StringField, UrlField, UuidField};
pub use type_tag::TypeField;

use crate::{error::FieldValueError, value::Value};
use std::fmt::{self, Debug};

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    Boolean,
    Choice,
    Decimal,
    Email,
    Float,
    Integer,
    List,
    String,
    Type,
    Url,
    Uuid,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

///
/// Field
///
/// Contract every field kind implements. Call order is
/// `set_value` → `validate` → `to_native` / `to_domain`, repeatable.
///
/// `native` and `domain` are only consulted for non-empty values; the
/// provided `to_native` / `to_domain` apply the null policy first.
///

pub trait Field: Debug + Send + Sync {
    fn kind(&self) -> FieldKind;

    fn meta(&self) -> &FieldMeta;

    fn meta_mut(&mut self) -> &mut FieldMeta;

    /// Current stored value after any assignment-time normalization.
    fn raw_value(&self) -> Value;

    fn has_value(&self) -> bool {
        !self.raw_value().is_empty()
    }

    /// Store raw input. Never fails; empty input is accepted.
    fn set_value(&mut self, raw: Value);

    /// Run the required check and every validator, collecting all
    /// violations.
    fn validate(&self) -> Result<(), FieldValueError> {
        self.meta().check(&self.raw_value())
    }

    /// Kind-specific output representation of a non-empty value.
    fn native(&self) -> Value;

    /// Kind-specific typed representation of a non-empty value.
    fn domain(&self) -> Value;

    /// Output representation; `None` means the field is hidden.
    fn to_native(&self) -> Option<Value> {
        if self.has_value() {
            Some(self.native())
        } else {
            self.meta().render_null()
        }
    }

    /// Typed representation; `None` means the field is hidden.
    fn to_domain(&self) -> Option<Value> {
        if self.has_value() {
            Some(self.domain())
        } else {
            self.meta().render_null()
        }
    }

    /// Fresh, empty instance of the same declaration.
    fn spawn(&self) -> Box<dyn Field>;

    fn names(&self) -> &[String] {
        self.meta().names()
    }
}
