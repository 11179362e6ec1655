//! Relation resolution and eager loading.
//!
//! This module turns client include paths into mapper eager-load
//! instructions:
//! - `IncludePaths` for the requested paths
//! - `EagerLoader` for resolving them against a schema
//! - `EagerLoadMorphs` for fanning out across polymorphic relations
//! - `EagerLoadSpec` for the nested result handed to the mapper
//!
//! ## Example
//!
//! ```rust
//! use jolt_query::{EagerLoader, IncludePaths};
//! use jolt_schema::{Relation, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(Schema::new("users", "App\\Models\\User").field(Relation::has_many("comments")))
//!     .register(
//!         Schema::new("comments", "App\\Models\\Comment")
//!             .field(Relation::belongs_to("author").inverse_type("users"))
//!             .field(Relation::belongs_to_many("tags")),
//!     )
//!     .register(Schema::new("tags", "App\\Models\\Tag"))
//!     .build()?;
//!
//! let paths: IncludePaths = "comments.author,comments.tags".parse()?;
//! let spec = EagerLoader::for_type(&registry, "users")?.to_relations(&paths)?;
//!
//! assert_eq!(spec.to_string(), "{comments: {author: {}, tags: {}}}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod include;
mod loader;
mod morph;
mod sink;
mod spec;

pub use include::{IncludePaths, RelationshipPath};
pub use loader::EagerLoader;
pub use morph::EagerLoadMorphs;
pub use sink::{EagerLoadSink, load_counts, load_includes};
pub use spec::{EagerLoadSpec, LoadKey};
