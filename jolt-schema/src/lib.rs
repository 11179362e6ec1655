//! # jolt-schema
//!
//! JSON:API resource schemas for the Jolt eager-loading engine.
//!
//! This crate provides:
//! - [`Schema`] descriptors binding a resource type to a mapper model
//! - [`Relation`] descriptors, monomorphic or polymorphic
//! - The read-only [`SchemaRegistry`]
//! - Configuration parsing for `jolt.toml` files
//!
//! ## Example
//!
//! ```rust
//! use jolt_schema::{Relation, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register(
//!         Schema::new("users", "App\\Models\\User")
//!             .field(Relation::has_many("comments").can_count())
//!             .field(Relation::morph_to("image", ["profiles", "galleries"])),
//!     )
//!     .register(Schema::new("comments", "App\\Models\\Comment"))
//!     .register(Schema::new("profiles", "App\\Models\\Profile"))
//!     .register(Schema::new("galleries", "App\\Models\\Gallery"))
//!     .build()?;
//!
//! let users = registry.schema_for("users")?;
//! assert!(users.relation_named("image").unwrap().is_polymorphic());
//! # Ok::<(), jolt_schema::SchemaError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod registry;
pub mod relation;
pub mod schema;
pub mod types;

pub use config::{DEFAULT_MAX_DEPTH, DebugConfig, JoltConfig, LoaderConfig, LogFormat};
pub use error::{SchemaError, SchemaResult};
pub use field::{Attribute, Field};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use relation::{Cardinality, Relation, RelationKind, RelationTarget};
pub use schema::Schema;
pub use types::{ModelId, ResourceType};
