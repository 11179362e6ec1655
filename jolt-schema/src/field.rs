//! Schema fields.
//!
//! Only the identity and visibility of attributes matter here; value types,
//! serialization and validation belong to other layers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::relation::Relation;

/// A plain (non-relation) field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The JSON:API field name.
    pub name: SmolStr,
    /// The model column, when it differs from the field name.
    pub column: Option<SmolStr>,
    /// Hidden from serialized documents.
    pub hidden: bool,
    /// Not writable by clients.
    pub read_only: bool,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            column: None,
            hidden: false,
            read_only: false,
        }
    }

    /// Map the attribute to a different model column.
    pub fn on(mut self, column: impl Into<SmolStr>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Hide the attribute.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the attribute read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// The model column backing this attribute.
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

/// A field on a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// An attribute.
    Attribute(Attribute),
    /// A relationship.
    Relation(Relation),
}

impl Field {
    /// The JSON:API field name.
    pub fn name(&self) -> &str {
        match self {
            Self::Attribute(attr) => &attr.name,
            Self::Relation(rel) => &rel.name,
        }
    }

    /// Whether the field is hidden.
    pub fn is_hidden(&self) -> bool {
        match self {
            Self::Attribute(attr) => attr.hidden,
            Self::Relation(rel) => rel.hidden,
        }
    }

    /// Get the relation, if this field is one.
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(rel) => Some(rel),
            Self::Attribute(_) => None,
        }
    }

    /// Get the attribute, if this field is one.
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(attr) => Some(attr),
            Self::Relation(_) => None,
        }
    }
}

impl From<Attribute> for Field {
    fn from(attr: Attribute) -> Self {
        Self::Attribute(attr)
    }
}

impl From<Relation> for Field {
    fn from(rel: Relation) -> Self {
        Self::Relation(rel)
    }
}
