use fieldwire_core::error::FieldValueError;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("schema '{schema}' extends unknown parent '{parent}'")]
    UnknownParent { schema: String, parent: String },

    #[error("schema '{0}' is not registered")]
    UnknownSchema(String),
}

///
/// RecordError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RecordError {
    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: String, field: String },

    #[error(transparent)]
    Field(#[from] FieldValueError),

    /// Every failure of a bulk load or record-wide validation, keyed by
    /// field path.
    #[error("record '{record}' failed validation on {}", paths(.issues))]
    Invalid {
        record: String,
        issues: BTreeMap<String, Vec<String>>,
    },
}

impl RecordError {
    /// Path-keyed messages regardless of variant.
    #[must_use]
    pub fn issues(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            Self::UnknownField { field, .. } => {
                BTreeMap::from([(field.clone(), vec![self.to_string()])])
            }
            Self::Field(err) => err.issues(),
            Self::Invalid { issues, .. } => issues.clone(),
        }
    }
}

fn paths(issues: &BTreeMap<String, Vec<String>>) -> String {
    issues.keys().cloned().collect::<Vec<_>>().join(", ")
}
