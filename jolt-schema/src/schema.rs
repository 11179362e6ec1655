//! Resource schemas.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::field::{Attribute, Field};
use crate::relation::Relation;
use crate::types::{ModelId, ResourceType};

/// A JSON:API resource schema bound to a mapper model.
///
/// ```rust
/// use jolt_schema::{Attribute, Relation, Schema};
///
/// let users = Schema::new("users", "App\\Models\\User")
///     .field(Attribute::new("email"))
///     .field(Relation::has_many("comments").can_count());
///
/// assert!(users.relation_named("comments").is_some());
/// assert!(users.relation_named("email").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The resource type.
    pub resource_type: ResourceType,
    /// The mapper model.
    pub model: ModelId,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema with no fields.
    pub fn new(resource_type: impl Into<ResourceType>, model: impl Into<ModelId>) -> Self {
        Self {
            resource_type: resource_type.into(),
            model: model.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field.
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Add several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = impl Into<Field>>) -> Self {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// The resource type.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The mapper model identifier.
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Get a field by name.
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Check whether a field exists.
    pub fn is_field(&self, name: &str) -> bool {
        self.field_named(name).is_some()
    }

    /// Get a relation by name. Attributes with the same name are ignored.
    pub fn relation_named(&self, name: &str) -> Option<&Relation> {
        self.field_named(name).and_then(Field::as_relation)
    }

    /// Get a relation by name if it may appear in include paths.
    pub fn loadable_relation(&self, name: &str) -> Option<&Relation> {
        self.relation_named(name).filter(|rel| rel.can_eager_load())
    }

    /// Check whether a relation exists.
    pub fn is_relation(&self, name: &str) -> bool {
        self.relation_named(name).is_some()
    }

    /// Get an attribute by name.
    pub fn attribute_named(&self, name: &str) -> Option<&Attribute> {
        self.field_named(name).and_then(Field::as_attribute)
    }

    /// All relations, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.fields.iter().filter_map(Field::as_relation)
    }

    /// All attributes, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.fields.iter().filter_map(Field::as_attribute)
    }

    /// Relations whose count may be requested.
    pub fn countable_relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations().filter(|rel| rel.is_countable())
    }

    /// Field names that are declared more than once.
    pub fn duplicate_field_names(&self) -> Vec<SmolStr> {
        let mut seen = indexmap::IndexSet::new();
        let mut duplicates = Vec::new();

        for field in &self.fields {
            let name = SmolStr::new(field.name());
            if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }

        duplicates
    }
}
