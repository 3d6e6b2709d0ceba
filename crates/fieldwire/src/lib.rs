//! ## Crate layout
//! - `core`: the dynamic `Value`, decimals, validators, the `Field` contract
//!   and every field kind.
//! - `schema`: schema registration, records, clean hooks, and the model
//!   mapping adapter.
//!
//! The `prelude` module carries everything needed to declare a record and
//! drive values through it.

pub use fieldwire_core as core;
pub use fieldwire_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::error::{FieldValueError, IgnoreField};
pub use crate::schema::{RecordError, SchemaError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::schema::prelude::*;
}
