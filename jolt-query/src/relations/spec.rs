//! Eager-load specifications.
//!
//! An [`EagerLoadSpec`] is the nested instruction set handed to the mapper.
//! Each entry is keyed either by a relation's mapper name or, for the
//! concrete types behind a polymorphic relation, by a model identifier. An
//! empty spec means "load this, and nothing beneath it".

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;

use jolt_schema::ModelId;

/// Key of one eager-load entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadKey {
    /// A relation, by its mapper-facing name.
    Relation(SmolStr),
    /// A concrete model loaded through a polymorphic relation.
    Model(ModelId),
}

impl LoadKey {
    /// The key as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relation(name) => name.as_str(),
            Self::Model(model) => model.as_str(),
        }
    }

    /// Check if this key addresses a relation.
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(_))
    }

    /// Check if this key addresses a concrete model.
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

impl fmt::Display for LoadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ModelId> for LoadKey {
    fn from(model: ModelId) -> Self {
        Self::Model(model)
    }
}

/// Nested eager-load instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EagerLoadSpec {
    entries: IndexMap<LoadKey, EagerLoadSpec>,
}

impl EagerLoadSpec {
    /// Create an empty (terminal) spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this is a terminal spec (nothing nested).
    pub fn is_terminal(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the spec has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert an entry, deep-merging with an existing entry under the same key.
    pub fn insert(&mut self, key: LoadKey, nested: EagerLoadSpec) {
        match self.entries.get_mut(&key) {
            Some(existing) => existing.merge(nested),
            None => {
                self.entries.insert(key, nested);
            }
        }
    }

    /// Insert a relation entry.
    pub fn with_relation(mut self, name: impl Into<SmolStr>, nested: EagerLoadSpec) -> Self {
        self.insert(LoadKey::Relation(name.into()), nested);
        self
    }

    /// Insert a model entry.
    pub fn with_model(mut self, model: impl Into<ModelId>, nested: EagerLoadSpec) -> Self {
        self.insert(LoadKey::Model(model.into()), nested);
        self
    }

    /// Deep-merge another spec into this one.
    pub fn merge(&mut self, other: EagerLoadSpec) {
        for (key, nested) in other.entries {
            self.insert(key, nested);
        }
    }

    /// Get a nested spec by key string. When a relation and a model share
    /// the string, the earlier entry wins.
    pub fn get(&self, key: &str) -> Option<&EagerLoadSpec> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Get a nested spec by key.
    pub fn get_key(&self, key: &LoadKey) -> Option<&EagerLoadSpec> {
        self.entries.get(key)
    }

    /// Check if a key string is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&LoadKey, &EagerLoadSpec)> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &LoadKey> {
        self.entries.keys()
    }

    /// Relation-keyed entries only.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &EagerLoadSpec)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            LoadKey::Relation(name) => Some((name.as_str(), v)),
            LoadKey::Model(_) => None,
        })
    }

    /// Model-keyed entries only.
    pub fn models(&self) -> impl Iterator<Item = (&ModelId, &EagerLoadSpec)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            LoadKey::Model(model) => Some((model, v)),
            LoadKey::Relation(_) => None,
        })
    }

    /// Flatten relation entries into dotted paths, parents before children
    /// (`comments`, `comments.author`).
    ///
    /// Model-keyed entries have no dotted form and are skipped together with
    /// everything beneath them; read them through [`models`](Self::models).
    pub fn to_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths(None, &mut out);
        out
    }

    fn collect_paths(&self, prefix: Option<&str>, out: &mut Vec<String>) {
        for (name, nested) in self.relations() {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.to_string(),
            };
            out.push(path.clone());
            nested.collect_paths(Some(&path), out);
        }
    }
}

/// Serializes as a string-keyed map. A relation and a model sharing the
/// same string at one level cannot both be represented, so that spec fails
/// to serialize.
impl Serialize for EagerLoadSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seen = IndexSet::with_capacity(self.entries.len());
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, nested) in &self.entries {
            if !seen.insert(key.as_str()) {
                return Err(S::Error::custom(format!(
                    "eager-load key `{key}` names both a relation and a model"
                )));
            }
            map.serialize_entry(key.as_str(), nested)?;
        }
        map.end()
    }
}

impl fmt::Display for EagerLoadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, nested)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {nested}")?;
        }
        f.write_str("}")
    }
}

impl<'a> IntoIterator for &'a EagerLoadSpec {
    type Item = (&'a LoadKey, &'a EagerLoadSpec);
    type IntoIter = indexmap::map::Iter<'a, LoadKey, EagerLoadSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for EagerLoadSpec {
    type Item = (LoadKey, EagerLoadSpec);
    type IntoIter = indexmap::map::IntoIter<LoadKey, EagerLoadSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(LoadKey, EagerLoadSpec)> for EagerLoadSpec {
    fn from_iter<T: IntoIterator<Item = (LoadKey, EagerLoadSpec)>>(iter: T) -> Self {
        let mut spec = Self::new();
        for (key, nested) in iter {
            spec.insert(key, nested);
        }
        spec
    }
}
