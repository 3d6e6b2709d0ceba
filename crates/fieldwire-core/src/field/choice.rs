use crate::{
    error::{FieldValueError, Violation},
    field::{Field, FieldKind, FieldMeta},
    value::Value,
};
use serde::Deserialize;
use std::sync::Arc;

///
/// Choice
///
/// One admissible value. A pair carries a display label for a stored key;
/// a bare choice is its own label.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Choice {
    Pair { label: Value, key: Value },
    Bare(Value),
}

impl Choice {
    pub fn pair(label: impl Into<Value>, key: impl Into<Value>) -> Self {
        Self::Pair {
            label: label.into(),
            key: key.into(),
        }
    }

    pub fn bare(value: impl Into<Value>) -> Self {
        Self::Bare(value.into())
    }

    #[must_use]
    pub const fn key(&self) -> &Value {
        match self {
            Self::Pair { key, .. } | Self::Bare(key) => key,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &Value {
        match self {
            Self::Pair { label, .. } | Self::Bare(label) => label,
        }
    }

    /// Key comparison; numbers compare by value across int, float and
    /// decimal, everything else compares exactly.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        let key = self.key();

        match (key, value) {
            (
                Value::Int(_) | Value::Float(_) | Value::Decimal(_),
                Value::Int(_) | Value::Float(_) | Value::Decimal(_),
            ) => key.as_decimal().is_some() && key.as_decimal() == value.as_decimal(),
            _ => key == value,
        }
    }
}

impl<L: Into<Value>, K: Into<Value>> From<(L, K)> for Choice {
    fn from((label, key): (L, K)) -> Self {
        Self::pair(label, key)
    }
}

///
/// ChoiceField
///
/// The stored value is the raw key; the matched choice is resolved on
/// assignment so that validation stays read-only.
///

#[derive(Clone, Debug)]
pub struct ChoiceField {
    meta: FieldMeta,
    value: Value,
    choices: Arc<[Choice]>,
    matched: Option<usize>,
}

impl ChoiceField {
    pub const INVALID_MESSAGE: &'static str = "Invalid choice value.";

    pub fn new<I, C>(choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        Self {
            meta: FieldMeta::default(),
            value: Value::Null,
            choices: choices.into_iter().map(Into::into).collect(),
            matched: None,
        }
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The choice the current value resolved to, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Choice> {
        self.matched.and_then(|i| self.choices.get(i))
    }
}

impl Field for ChoiceField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Choice
    }

    fn set_value(&mut self, raw: Value) {
        self.matched = if raw.is_empty() {
            None
        } else {
            self.choices.iter().position(|c| c.matches(&raw))
        };
        self.value = raw;
    }

    fn validate(&self) -> Result<(), FieldValueError> {
        self.meta.check_with(&self.value, || {
            if self.matched.is_some() {
                Vec::new()
            } else {
                vec![Violation::choice(Self::INVALID_MESSAGE)]
            }
        })
    }

    fn native(&self) -> Value {
        self.value.clone()
    }

    fn domain(&self) -> Value {
        self.selected()
            .map_or(Value::Null, |choice| choice.label().clone())
    }
}

impl_field_builder!(ChoiceField);
