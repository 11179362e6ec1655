//! Relation descriptors.
//!
//! A relation is a field on a [`Schema`](crate::Schema) that points at one or
//! more other resource types. Monomorphic relations have exactly one inverse
//! type; polymorphic relations (`morph_to`, `morph_to_many`) may resolve to
//! any of a fixed, declared set of inverse types.
//!
//! ```rust
//! use jolt_schema::{Cardinality, Relation};
//!
//! let comments = Relation::has_many("comments").can_count();
//! assert_eq!(comments.inverse_type_name(), Some("comments"));
//! assert_eq!(comments.cardinality(), Cardinality::Many);
//!
//! let author = Relation::belongs_to("author").inverse_type("users");
//! assert_eq!(author.inverse_type_name(), Some("users"));
//!
//! let image = Relation::morph_to("imageable", ["users", "posts"]);
//! assert!(image.is_polymorphic());
//! ```

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::types::ResourceType;

/// How many related records a relation yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most one related record.
    One,
    /// Zero or more related records.
    Many,
}

impl Cardinality {
    /// Check if this is a "to-one" relation.
    pub fn is_to_one(&self) -> bool {
        matches!(self, Self::One)
    }

    /// Check if this is a "to-many" relation.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::Many)
    }
}

/// The mapper-level kind of relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Inverse of a one-to-one or one-to-many (the model holds the key).
    BelongsTo,
    /// One-to-one (the related model holds the key).
    HasOne,
    /// One-to-many.
    HasMany,
    /// Many-to-many through a pivot table.
    BelongsToMany,
    /// One-to-one through an intermediate model.
    HasOneThrough,
    /// One-to-many through an intermediate model.
    HasManyThrough,
    /// Polymorphic to-one.
    MorphTo,
    /// Polymorphic to-many.
    MorphToMany,
}

impl RelationKind {
    /// The cardinality implied by this kind.
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::BelongsTo | Self::HasOne | Self::HasOneThrough | Self::MorphTo => Cardinality::One,
            Self::HasMany | Self::BelongsToMany | Self::HasManyThrough | Self::MorphToMany => {
                Cardinality::Many
            }
        }
    }

    /// Whether relations of this kind are polymorphic.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, Self::MorphTo | Self::MorphToMany)
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelongsTo => write!(f, "belongs-to"),
            Self::HasOne => write!(f, "has-one"),
            Self::HasMany => write!(f, "has-many"),
            Self::BelongsToMany => write!(f, "belongs-to-many"),
            Self::HasOneThrough => write!(f, "has-one-through"),
            Self::HasManyThrough => write!(f, "has-many-through"),
            Self::MorphTo => write!(f, "morph-to"),
            Self::MorphToMany => write!(f, "morph-to-many"),
        }
    }
}

/// The resource type(s) a relation points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationTarget {
    /// Exactly one inverse type.
    Monomorphic(ResourceType),
    /// Any of the listed inverse types, in declaration order.
    Polymorphic(Vec<ResourceType>),
}

impl RelationTarget {
    /// All inverse types, in declaration order.
    pub fn types(&self) -> &[ResourceType] {
        match self {
            Self::Monomorphic(ty) => std::slice::from_ref(ty),
            Self::Polymorphic(types) => types.as_slice(),
        }
    }
}

/// A relation field on a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// The JSON:API field name.
    pub name: SmolStr,
    /// Name the mapper knows the relation by, when it differs from the
    /// camel-cased field name.
    pub relation_name: Option<SmolStr>,
    /// The kind of relation.
    pub kind: RelationKind,
    /// The inverse type(s).
    pub target: RelationTarget,
    /// Whether the relationship may be counted.
    pub countable: bool,
    /// Whether the relation may appear in include paths.
    pub eager_loadable: bool,
    /// Whether the relationship is hidden from serialized documents.
    pub hidden: bool,
}

impl Relation {
    fn monomorphic(name: impl Into<SmolStr>, kind: RelationKind) -> Self {
        let name = name.into();
        let inverse = default_inverse_type(&name);

        Self {
            name,
            relation_name: None,
            kind,
            target: RelationTarget::Monomorphic(inverse),
            countable: false,
            eager_loadable: true,
            hidden: false,
        }
    }

    fn polymorphic(
        name: impl Into<SmolStr>,
        kind: RelationKind,
        types: impl IntoIterator<Item = impl Into<ResourceType>>,
    ) -> Self {
        Self {
            name: name.into(),
            relation_name: None,
            kind,
            target: RelationTarget::Polymorphic(types.into_iter().map(Into::into).collect()),
            countable: false,
            eager_loadable: true,
            hidden: false,
        }
    }

    /// Create a belongs-to relation.
    pub fn belongs_to(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::BelongsTo)
    }

    /// Create a has-one relation.
    pub fn has_one(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::HasOne)
    }

    /// Create a has-many relation.
    pub fn has_many(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::HasMany)
    }

    /// Create a belongs-to-many relation.
    pub fn belongs_to_many(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::BelongsToMany)
    }

    /// Create a has-one-through relation.
    pub fn has_one_through(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::HasOneThrough)
    }

    /// Create a has-many-through relation.
    pub fn has_many_through(name: impl Into<SmolStr>) -> Self {
        Self::monomorphic(name, RelationKind::HasManyThrough)
    }

    /// Create a polymorphic to-one relation.
    pub fn morph_to(
        name: impl Into<SmolStr>,
        types: impl IntoIterator<Item = impl Into<ResourceType>>,
    ) -> Self {
        Self::polymorphic(name, RelationKind::MorphTo, types)
    }

    /// Create a polymorphic to-many relation.
    pub fn morph_to_many(
        name: impl Into<SmolStr>,
        types: impl IntoIterator<Item = impl Into<ResourceType>>,
    ) -> Self {
        Self::polymorphic(name, RelationKind::MorphToMany, types)
    }

    /// Set the inverse resource type of a monomorphic relation.
    ///
    /// Has no effect on polymorphic relations, whose types are fixed at
    /// construction.
    pub fn inverse_type(mut self, ty: impl Into<ResourceType>) -> Self {
        if let RelationTarget::Monomorphic(inverse) = &mut self.target {
            *inverse = ty.into();
        }
        self
    }

    /// Set the name the mapper uses for this relation.
    pub fn relation_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.relation_name = Some(name.into());
        self
    }

    /// Allow the relationship to be counted.
    pub fn can_count(mut self) -> Self {
        self.countable = true;
        self
    }

    /// Forbid the relation from appearing in include paths.
    pub fn cannot_eager_load(mut self) -> Self {
        self.eager_loadable = false;
        self
    }

    /// Hide the relationship from serialized documents.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The JSON:API field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name the mapper knows this relation by.
    pub fn mapper_relation_name(&self) -> SmolStr {
        match &self.relation_name {
            Some(name) => name.clone(),
            None => self.name.to_case(Case::Camel).into(),
        }
    }

    /// Whether the relation is polymorphic.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self.target, RelationTarget::Polymorphic(_))
    }

    /// The inverse type of a monomorphic relation.
    pub fn inverse_type_name(&self) -> Option<&str> {
        match &self.target {
            RelationTarget::Monomorphic(ty) => Some(ty.as_str()),
            RelationTarget::Polymorphic(_) => None,
        }
    }

    /// All inverse types this relation may resolve to.
    pub fn inverse_types(&self) -> &[ResourceType] {
        self.target.types()
    }

    /// The relation's cardinality.
    pub fn cardinality(&self) -> Cardinality {
        self.kind.cardinality()
    }

    /// Whether the relationship may be counted.
    pub fn is_countable(&self) -> bool {
        self.countable
    }

    /// Whether the relation may appear in include paths.
    pub fn can_eager_load(&self) -> bool {
        self.eager_loadable
    }
}

/// The default inverse type for a relation field: the plural of its name,
/// in dasherized form (e.g. `author` -> `authors`).
pub fn default_inverse_type(field: &str) -> ResourceType {
    let plural = pluralizer::pluralize(field, 2, false);
    plural.to_case(Case::Kebab).into()
}
