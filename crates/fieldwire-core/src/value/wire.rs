use crate::value::Value;
use serde::{Deserialize, Deserializer};

///
/// ValueWire
/// Serde decode shape for plain interchange input.
///
/// Decimals and UUIDs have no interchange shape of their own; they arrive as
/// text and are coerced by the field that receives them.
///

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueWire {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
}

impl ValueWire {
    fn into_value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(v),
            Self::Int(v) => Value::Int(v),
            Self::Float(v) => Value::Float(v),
            Self::Text(v) => Value::Text(v),
            Self::List(items) => Value::List(items.into_iter().map(Self::into_value).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ValueWire::deserialize(deserializer).map(ValueWire::into_value)
    }
}
