//! Record layer for fieldwire: schema registration with inheritance, record
//! instances routing every assignment through the field pipeline, and the
//! adapter that declares fields from external model metadata.
#![warn(unreachable_pub)]

pub mod error;
pub mod model;
pub mod record;
pub mod registry;
pub mod schema;

pub use error::{RecordError, SchemaError};
pub use record::{CleanHook, Record, Rendered};
pub use registry::{lookup, register};
pub use schema::{FieldDecl, RecordSchema, RecordSchemaBuilder};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        model::{ModelAdapter, ModelDef, ModelField, ModelFieldKind},
        record::{CleanHook, Record, Rendered},
        registry::{lookup, register},
        schema::RecordSchema,
    };
}
