//! The schema registry.
//!
//! The registry is populated once, validated, and read-only afterwards, so a
//! single instance can be shared between request handlers without locking.
//!
//! ```rust
//! use jolt_schema::{Relation, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(Schema::new("posts", "App\\Models\\Post").field(Relation::has_many("comments")))
//!     .register(Schema::new("comments", "App\\Models\\Comment"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.schema_for("posts").unwrap().model().as_str(), "App\\Models\\Post");
//! assert!(registry.schema_for("videos").is_err());
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::Schema;
use crate::types::{ModelId, ResourceType};

/// Immutable lookup of schemas by resource type and by model.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<ResourceType, Schema>,
    models: IndexMap<ModelId, ResourceType>,
}

impl SchemaRegistry {
    /// Start building a registry.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Get the schema for a resource type.
    pub fn schema_for(&self, resource_type: &str) -> SchemaResult<&Schema> {
        self.schemas
            .get(resource_type)
            .ok_or_else(|| SchemaError::unknown_resource_type(resource_type))
    }

    /// Get the schema bound to a model.
    pub fn schema_for_model(&self, model: &ModelId) -> SchemaResult<&Schema> {
        self.models
            .get(model)
            .and_then(|ty| self.schemas.get(ty))
            .ok_or_else(|| SchemaError::unknown_model(model.as_str()))
    }

    /// Check whether a resource type is registered.
    pub fn exists(&self, resource_type: &str) -> bool {
        self.schemas.contains_key(resource_type)
    }

    /// Registered resource types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(|ty| ty.as_str())
    }

    /// All schemas, in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Collects schemas and validates them as a whole.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: Vec<Schema>,
}

impl SchemaRegistryBuilder {
    /// Add a schema.
    pub fn register(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Add several schemas.
    pub fn register_all(mut self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        self.schemas.extend(schemas);
        self
    }

    /// Validate and freeze the registry.
    ///
    /// Every problem found is reported; a single error is returned as-is,
    /// several are wrapped in [`SchemaError::ValidationFailed`].
    pub fn build(self) -> SchemaResult<SchemaRegistry> {
        let mut errors = Vec::new();
        let mut registry = SchemaRegistry::default();

        for schema in self.schemas {
            if registry.schemas.contains_key(&schema.resource_type) {
                errors.push(SchemaError::duplicate("resource type", schema.resource_type.as_str()));
                continue;
            }
            if registry.models.contains_key(&schema.model) {
                errors.push(SchemaError::duplicate("model", schema.model.as_str()));
                continue;
            }
            for name in schema.duplicate_field_names() {
                errors.push(SchemaError::duplicate(
                    "field",
                    format!("{}.{}", schema.resource_type, name),
                ));
            }

            registry
                .models
                .insert(schema.model.clone(), schema.resource_type.clone());
            registry
                .schemas
                .insert(schema.resource_type.clone(), schema);
        }

        for schema in registry.schemas.values() {
            for relation in schema.relations() {
                if relation.is_polymorphic() && relation.inverse_types().is_empty() {
                    errors.push(SchemaError::invalid_relation(
                        schema.resource_type.as_str(),
                        relation.name(),
                        "polymorphic relation declares no inverse types",
                    ));
                }
                for ty in relation.inverse_types() {
                    if !registry.schemas.contains_key(ty) {
                        errors.push(SchemaError::invalid_relation(
                            schema.resource_type.as_str(),
                            relation.name(),
                            format!("inverse type `{ty}` is not registered"),
                        ));
                    }
                }
            }
        }

        match errors.len() {
            0 => {
                debug!(schemas = registry.len(), "Schema registry built");
                Ok(registry)
            }
            1 => Err(errors.remove(0)),
            count => Err(SchemaError::ValidationFailed { count, errors }),
        }
    }
}
