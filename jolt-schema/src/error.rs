//! Error types for schema registration and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while registering or looking up schemas.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(jolt::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No schema is registered for the resource type.
    #[error("no schema registered for resource type `{resource_type}`")]
    #[diagnostic(
        code(jolt::schema::unknown_resource_type),
        help("register a schema for the type before resolving include paths")
    )]
    UnknownResourceType { resource_type: String },

    /// No schema is registered for the model.
    #[error("no schema registered for model `{model}`")]
    #[diagnostic(code(jolt::schema::unknown_model))]
    UnknownModel { model: String },

    /// Invalid relation definition.
    #[error("invalid relation `{resource_type}.{field}`: {message}")]
    #[diagnostic(code(jolt::schema::invalid_relation))]
    InvalidRelation {
        resource_type: String,
        field: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(jolt::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(jolt::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(jolt::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Validation error with multiple issues.
    #[error("schema registry validation failed with {count} error(s)")]
    #[diagnostic(code(jolt::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an unknown resource type error.
    pub fn unknown_resource_type(resource_type: impl Into<String>) -> Self {
        Self::UnknownResourceType {
            resource_type: resource_type.into(),
        }
    }

    /// Create an unknown model error.
    pub fn unknown_model(model: impl Into<String>) -> Self {
        Self::UnknownModel {
            model: model.into(),
        }
    }

    /// Create an invalid relation error.
    pub fn invalid_relation(
        resource_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRelation {
            resource_type: resource_type.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether this error was raised by a failed registry lookup.
    pub fn is_unknown_resource_type(&self) -> bool {
        matches!(self, Self::UnknownResourceType { .. })
    }
}
