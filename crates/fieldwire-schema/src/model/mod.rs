//! External model metadata and the adapter that turns it into field
//! declarations.
//!
//! - `ModelDef` / `ModelField` describe *what the model has*
//! - `ModelAdapter` decides *which field declares it*

mod rules;

pub use rules::{ModelAdapter, Rule};

use fieldwire_core::{field::Choice, value::Value};
use serde::Deserialize;

///
/// ModelFieldKind
///
/// Attribute types a model may report. Kinds with no field counterpart are
/// kept so they can be reported as unmapped.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ModelFieldKind {
    Auto,
    Integer,
    SmallInteger,
    PositiveInteger,
    PositiveSmallInteger,
    Float,
    Decimal,
    Email,
    Char,
    Slug,
    Text,
    CommaSeparatedInteger,
    Url,
    Boolean,
    NullBoolean,
    Uuid,
    Date,
    DateTime,
    Time,
    #[serde(other)]
    Other,
}

///
/// ModelField
/// Metadata of one model attribute.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ModelField {
    pub name: String,
    pub kind: ModelFieldKind,
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub blank: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub decimal_places: Option<u32>,
}

impl ModelField {
    pub fn new(name: impl Into<String>, kind: ModelFieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            null: false,
            blank: false,
            primary_key: false,
            default: None,
            choices: Vec::new(),
            max_length: None,
            decimal_places: None,
        }
    }
}

///
/// ModelDef
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ModelDef {
    pub name: String,
    pub fields: Vec<ModelField>,
}

impl ModelDef {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
