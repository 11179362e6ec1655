//! Identifier types shared by schemas and relations.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The JSON:API resource type a schema is registered under (e.g. `users`).
pub type ResourceType = SmolStr;

/// Identifier of the underlying mapper model (e.g. `App\Models\User`).
///
/// Polymorphic eager loads address concrete models directly, so this is the
/// key the mapper receives for each inverse type of a polymorphic relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(SmolStr);

impl ModelId {
    /// Create a new model identifier.
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<SmolStr> for ModelId {
    fn from(id: SmolStr) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
