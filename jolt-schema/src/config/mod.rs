//! Configuration file parsing for `jolt.toml`.
//!
//! ```toml
//! [loader]
//! skip_missing_fields = true
//!
//! [debug]
//! log_level = "debug"
//!
//! [[schemas]]
//! type = "posts"
//! model = "App\\Models\\Post"
//!
//! [[schemas.fields]]
//! kind = "has_many"
//! name = "comments"
//! can_count = true
//! ```

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{Attribute, Field};
use crate::registry::SchemaRegistry;
use crate::relation::{Relation, RelationKind};
use crate::schema::Schema;

/// Main configuration structure for `jolt.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JoltConfig {
    /// Eager loading settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Resource schemas.
    #[serde(default)]
    pub schemas: Vec<SchemaConfig>,
}

impl JoltConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })
    }

    /// Build a validated registry from the configured schemas.
    pub fn registry(&self) -> SchemaResult<SchemaRegistry> {
        SchemaRegistry::from_config(self)
    }
}

impl SchemaRegistry {
    /// Build a validated registry from configuration.
    pub fn from_config(config: &JoltConfig) -> SchemaResult<Self> {
        let schemas = config
            .schemas
            .iter()
            .map(SchemaConfig::to_schema)
            .collect::<SchemaResult<Vec<_>>>()?;

        Self::builder().register_all(schemas).build()
    }
}

/// Eager loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Silently drop include path segments that do not name a loadable
    /// relation instead of failing.
    #[serde(default = "default_true")]
    pub skip_missing_fields: bool,

    /// Maximum number of segments in one include path. Deeper paths are
    /// rejected before resolution.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            skip_missing_fields: true,
            max_depth: default_max_depth(),
        }
    }
}

/// Default for [`LoaderConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Debug/logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON lines.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
    /// Single-line output.
    Compact,
}

impl LogFormat {
    /// The format name as accepted by `JOLT_LOG_FORMAT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

/// A schema definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: SmolStr,

    /// Mapper model identifier.
    pub model: SmolStr,

    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    /// Convert into a schema.
    pub fn to_schema(&self) -> SchemaResult<Schema> {
        let fields = self
            .fields
            .iter()
            .map(|f| f.to_field(&self.resource_type))
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Schema::new(self.resource_type.clone(), self.model.clone()).fields(fields))
    }
}

/// The kind of a configured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain attribute.
    Attribute,
    /// See [`RelationKind::BelongsTo`].
    BelongsTo,
    /// See [`RelationKind::HasOne`].
    HasOne,
    /// See [`RelationKind::HasMany`].
    HasMany,
    /// See [`RelationKind::BelongsToMany`].
    BelongsToMany,
    /// See [`RelationKind::HasOneThrough`].
    HasOneThrough,
    /// See [`RelationKind::HasManyThrough`].
    HasManyThrough,
    /// See [`RelationKind::MorphTo`].
    MorphTo,
    /// See [`RelationKind::MorphToMany`].
    MorphToMany,
}

impl FieldKind {
    fn relation_kind(self) -> Option<RelationKind> {
        Some(match self {
            Self::Attribute => return None,
            Self::BelongsTo => RelationKind::BelongsTo,
            Self::HasOne => RelationKind::HasOne,
            Self::HasMany => RelationKind::HasMany,
            Self::BelongsToMany => RelationKind::BelongsToMany,
            Self::HasOneThrough => RelationKind::HasOneThrough,
            Self::HasManyThrough => RelationKind::HasManyThrough,
            Self::MorphTo => RelationKind::MorphTo,
            Self::MorphToMany => RelationKind::MorphToMany,
        })
    }
}

/// A field definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Field kind.
    pub kind: FieldKind,

    /// JSON:API field name.
    pub name: SmolStr,

    /// Model column (attributes only).
    pub column: Option<SmolStr>,

    /// Inverse resource type (monomorphic relations only).
    pub inverse: Option<SmolStr>,

    /// Inverse resource types (polymorphic relations only).
    #[serde(default)]
    pub types: Vec<SmolStr>,

    /// Mapper relation name override.
    pub relation: Option<SmolStr>,

    /// Whether the relationship may be counted.
    #[serde(default)]
    pub can_count: bool,

    /// Whether the relation may appear in include paths.
    #[serde(default = "default_true")]
    pub eager_load: bool,

    /// Hidden from serialized documents.
    #[serde(default)]
    pub hidden: bool,

    /// Not writable by clients (attributes only).
    #[serde(default)]
    pub read_only: bool,
}

impl FieldConfig {
    /// Convert into a field, checking that only options valid for the kind
    /// are set.
    pub fn to_field(&self, resource_type: &str) -> SchemaResult<Field> {
        let Some(kind) = self.kind.relation_kind() else {
            if self.inverse.is_some()
                || !self.types.is_empty()
                || self.relation.is_some()
                || self.can_count
                || !self.eager_load
            {
                return Err(SchemaError::config(format!(
                    "attribute `{resource_type}.{}` cannot declare relation options",
                    self.name
                )));
            }

            let mut attr = Attribute::new(self.name.clone());
            attr.column = self.column.clone();
            attr.hidden = self.hidden;
            attr.read_only = self.read_only;
            return Ok(Field::Attribute(attr));
        };

        if self.column.is_some() || self.read_only {
            return Err(SchemaError::config(format!(
                "relation `{resource_type}.{}` cannot declare attribute options",
                self.name
            )));
        }

        let mut relation = if kind.is_polymorphic() {
            if self.inverse.is_some() {
                return Err(SchemaError::config(format!(
                    "polymorphic relation `{resource_type}.{}` must use `types`, not `inverse`",
                    self.name
                )));
            }
            match kind {
                RelationKind::MorphTo => Relation::morph_to(self.name.clone(), self.types.clone()),
                _ => Relation::morph_to_many(self.name.clone(), self.types.clone()),
            }
        } else {
            if !self.types.is_empty() {
                return Err(SchemaError::config(format!(
                    "relation `{resource_type}.{}` is not polymorphic and cannot declare `types`",
                    self.name
                )));
            }
            let relation = match kind {
                RelationKind::BelongsTo => Relation::belongs_to(self.name.clone()),
                RelationKind::HasOne => Relation::has_one(self.name.clone()),
                RelationKind::HasMany => Relation::has_many(self.name.clone()),
                RelationKind::BelongsToMany => Relation::belongs_to_many(self.name.clone()),
                RelationKind::HasOneThrough => Relation::has_one_through(self.name.clone()),
                _ => Relation::has_many_through(self.name.clone()),
            };
            match &self.inverse {
                Some(inverse) => relation.inverse_type(inverse.clone()),
                None => relation,
            }
        };

        relation.relation_name = self.relation.clone();
        relation.countable = self.can_count;
        relation.eager_loadable = self.eager_load;
        relation.hidden = self.hidden;

        Ok(Field::Relation(relation))
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Expand `${VAR}` references using the process environment. Unset
/// variables are left untouched.
fn expand_env_vars(content: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern");

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
