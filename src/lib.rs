//! # Jolt
//!
//! JSON:API resource schemas on top of a relational mapper.
//!
//! Jolt resolves the relationship include paths of a JSON:API request into
//! nested eager-load instructions for the underlying mapper, fanning
//! polymorphic relations out per concrete model.
//!
//! ## Crates
//!
//! - [`schema`]: schemas, relation descriptors, the registry and `jolt.toml`
//! - [`query`]: include paths, the eager loader and its output
//!
//! ## Example
//!
//! ```rust
//! use jolt::prelude::*;
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
//! let spec = EagerLoader::for_type(&registry, "users")?
//!     .skip_missing_fields()
//!     .to_relations(&paths)?;
//!
//! assert_eq!(spec.to_paths(), ["comments", "comments.author", "comments.tags"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schemas, relation descriptors and the schema registry.
pub mod schema {
    pub use jolt_schema::*;
}

/// Include path resolution and eager loading.
pub mod query {
    pub use jolt_query::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::query::{
        EagerLoadMorphs, EagerLoadSink, EagerLoadSpec, EagerLoader, IncludePaths, LoadKey,
        QueryError, QueryResult,
    };
    pub use crate::schema::{
        Attribute, JoltConfig, ModelId, Relation, Schema, SchemaError, SchemaRegistry,
    };
}

// Re-export key types at the crate root
pub use query::{EagerLoadSpec, EagerLoader, IncludePaths};
pub use schema::{Schema, SchemaRegistry};
