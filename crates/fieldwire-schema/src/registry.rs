use crate::{
    error::SchemaError,
    schema::{RecordSchema, RecordSchemaBuilder},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};
use tracing::debug;

///
/// REGISTRY
/// process-wide schemas, written once per record type
///

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register a schema with the process-wide registry.
pub fn register(builder: RecordSchemaBuilder) -> Result<Arc<RecordSchema>, SchemaError> {
    REGISTRY.register(builder)
}

/// Look up a schema in the process-wide registry.
pub fn lookup(name: &str) -> Result<Arc<RecordSchema>, SchemaError> {
    REGISTRY.lookup(name)
}

#[must_use]
pub fn is_registered(name: &str) -> bool {
    REGISTRY.contains(name)
}

///
/// Registry
///
/// Schemas keyed by name. Registration resolves inheritance exactly once;
/// registered schemas are immutable and shared.
///

#[derive(Debug, Default)]
pub struct Registry {
    schemas: RwLock<BTreeMap<String, Arc<RecordSchema>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, builder: RecordSchemaBuilder) -> Result<Arc<RecordSchema>, SchemaError> {
        let mut schema = builder.build();

        // a poisoned lock still holds a consistent map: writers never panic
        // between check and insert
        let mut schemas = self
            .schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if schemas.contains_key(schema.name()) {
            return Err(SchemaError::DuplicateSchema(schema.name().to_string()));
        }

        if let Some(parent_name) = schema.parent() {
            let parent = schemas
                .get(parent_name)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownParent {
                    schema: schema.name().to_string(),
                    parent: parent_name.to_string(),
                })?;
            schema.inherit(&parent);
        }

        debug!(
            schema = schema.name(),
            parent = schema.parent().unwrap_or_default(),
            fields = schema.fields().len(),
            "registered record schema"
        );

        let schema = Arc::new(schema);
        schemas.insert(schema.name().to_string(), Arc::clone(&schema));

        Ok(schema)
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<RecordSchema>, SchemaError> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

///
/// TESTS
///
