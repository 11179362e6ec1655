//! Include paths requested by a client.
//!
//! The JSON:API `include` query parameter is a comma-separated list of
//! dot-separated relationship paths:
//!
//! ```rust
//! use jolt_query::IncludePaths;
//!
//! let paths: IncludePaths = "comments.author,comments.tags,country".parse().unwrap();
//! assert_eq!(paths.len(), 3);
//!
//! let groups = paths.group_by_first();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups["comments"].to_string(), "author,tags");
//! assert!(groups["country"].is_empty());
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::error::{QueryError, QueryResult};

/// A single include path, e.g. `comments.author`.
///
/// Always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipPath {
    segments: Vec<SmolStr>,
}

impl RelationshipPath {
    /// Build a path from its segments.
    pub fn new(segments: impl IntoIterator<Item = impl Into<SmolStr>>) -> QueryResult<Self> {
        let segments: Vec<SmolStr> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(QueryError::invalid_include_path("", "path has no segments"));
        }
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(QueryError::invalid_include_path(
                segments.join("."),
                "path contains an empty segment",
            ));
        }

        Ok(Self { segments })
    }

    /// The first segment: the relation on the schema the path starts from.
    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    /// All segments.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; kept for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The path without its first `n` segments, if anything remains.
    pub fn skip(&self, n: usize) -> Option<Self> {
        (n < self.segments.len()).then(|| Self {
            segments: self.segments[n..].to_vec(),
        })
    }

    /// The path after its first segment, if any.
    pub fn rest(&self) -> Option<Self> {
        self.skip(1)
    }
}

impl fmt::Display for RelationshipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for RelationshipPath {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QueryError::invalid_include_path(s, "path is empty"));
        }
        Self::new(s.split('.').map(str::trim))
    }
}

/// An ordered set of include paths.
///
/// Duplicates are removed; the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePaths {
    paths: IndexSet<RelationshipPath>,
}

impl IncludePaths {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and collect several dotted paths.
    pub fn from_paths<I, S>(paths: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| p.as_ref().parse::<RelationshipPath>())
            .collect()
    }

    /// Add a path.
    pub fn push(&mut self, path: RelationshipPath) {
        self.paths.insert(path);
    }

    /// Check if the set contains a path.
    pub fn contains(&self, path: &RelationshipPath) -> bool {
        self.paths.contains(path)
    }

    /// Iterate over the paths in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RelationshipPath> {
        self.paths.iter()
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Segment count of the longest path, `0` for an empty set.
    pub fn depth(&self) -> usize {
        self.paths.iter().map(RelationshipPath::len).max().unwrap_or(0)
    }

    /// Group paths by their first segment.
    ///
    /// Each group holds the remaining suffixes of its paths; a group whose
    /// paths all end at the first segment is empty.
    pub fn group_by_first(&self) -> IndexMap<SmolStr, IncludePaths> {
        let mut groups: IndexMap<SmolStr, IncludePaths> = IndexMap::new();

        for path in &self.paths {
            let group = groups.entry(SmolStr::new(path.first())).or_default();
            if let Some(rest) = path.rest() {
                group.push(rest);
            }
        }

        groups
    }
}

impl fmt::Display for IncludePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

impl FromStr for IncludePaths {
    type Err = QueryError;

    /// Parse a JSON:API `include` parameter. An empty string yields an
    /// empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        Self::from_paths(s.split(','))
    }
}

impl FromIterator<RelationshipPath> for IncludePaths {
    fn from_iter<T: IntoIterator<Item = RelationshipPath>>(iter: T) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<RelationshipPath> for IncludePaths {
    fn extend<T: IntoIterator<Item = RelationshipPath>>(&mut self, iter: T) {
        self.paths.extend(iter);
    }
}

impl<'a> IntoIterator for &'a IncludePaths {
    type Item = &'a RelationshipPath;
    type IntoIter = indexmap::set::Iter<'a, RelationshipPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
