//! # jolt-query
//!
//! Include path resolution and eager-load composition for Jolt.
//!
//! Given a [`Schema`](jolt_schema::Schema) and the include paths from a
//! JSON:API request, [`EagerLoader`] produces the nested [`EagerLoadSpec`]
//! a relational mapper needs to load every requested relation in one
//! batched call. Polymorphic relations are fanned out per concrete model by
//! [`EagerLoadMorphs`].
//!
//! ## Resolving includes
//!
//! ```rust
//! use jolt_query::{EagerLoader, IncludePaths};
//! use jolt_schema::{Relation, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(
//!         Schema::new("phones", "App\\Models\\Phone")
//!             .field(Relation::morph_to("image", ["profiles", "galleries"])),
//!     )
//!     .register(Schema::new("profiles", "App\\Models\\Profile"))
//!     .register(Schema::new("galleries", "App\\Models\\Gallery"))
//!     .build()?;
//!
//! let paths: IncludePaths = "image".parse()?;
//! let spec = EagerLoader::for_type(&registry, "phones")?.to_relations(&paths)?;
//!
//! let models: Vec<&str> = spec.models().map(|(model, _)| model.as_str()).collect();
//! assert_eq!(models, ["App\\Models\\Profile", "App\\Models\\Gallery"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use jolt_query::{EagerLoader, ErrorCode, IncludePaths};
//! use jolt_schema::{Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(Schema::new("users", "App\\Models\\User"))
//!     .build()?;
//! let paths: IncludePaths = "bogus".parse()?;
//!
//! let loader = EagerLoader::for_type(&registry, "users")?;
//! let err = loader.to_relations(&paths).unwrap_err();
//! assert_eq!(err.code, ErrorCode::UnresolvableRelation);
//!
//! // Untrusted input: drop what does not resolve.
//! assert!(loader.skip_missing_fields().to_relations(&paths)?.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod logging;
pub mod relations;

pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use relations::{
    EagerLoadMorphs, EagerLoadSink, EagerLoadSpec, EagerLoader, IncludePaths, LoadKey,
    RelationshipPath, load_counts, load_includes,
};
