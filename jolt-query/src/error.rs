//! Error types for include path resolution.
//!
//! Error codes follow a pattern: J{category}{number}
//! - 1xxx: Include errors (unresolvable relation, malformed path, counts)
//! - 7xxx: Configuration errors (unknown resource type)
//!
//! ```rust
//! use jolt_query::{ErrorCode, QueryError};
//!
//! let err = QueryError::unresolvable_relation("users", "bogus");
//! assert_eq!(err.code, ErrorCode::UnresolvableRelation);
//! assert_eq!(err.code.code(), "J1001");
//! assert!(err.to_string().contains("bogus"));
//! ```
//!
//! Messages describe what went wrong for the developer; translating an
//! error into a client response is left to the request layer.

use std::fmt;
use thiserror::Error;

use jolt_schema::SchemaError;

/// Result type for include resolution.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Include errors (1xxx)
    /// A path segment does not name a loadable relation (J1001).
    UnresolvableRelation = 1001,
    /// An include path is malformed (J1002).
    InvalidIncludePath = 1002,
    /// A count was requested for a relation that cannot be counted (J1003).
    RelationNotCountable = 1003,

    // Configuration errors (7xxx)
    /// A resource type has no registered schema (J7001).
    UnknownResourceType = 7001,
    /// Invalid configuration (J7002).
    InvalidConfiguration = 7002,
}

impl ErrorCode {
    /// Get the error code string (e.g., "J1001").
    pub fn code(&self) -> String {
        format!("J{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnresolvableRelation => "Unresolvable relation",
            Self::InvalidIncludePath => "Invalid include path",
            Self::RelationNotCountable => "Relation cannot be counted",
            Self::UnknownResourceType => "Unknown resource type",
            Self::InvalidConfiguration => "Invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The resource type involved.
    pub resource_type: Option<String>,
    /// The field involved.
    pub field: Option<String>,
    /// The include path involved.
    pub path: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while resolving include paths.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Set the resource type.
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.context.resource_type = Some(resource_type.into());
        self
    }

    /// Set the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the include path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.context.path = Some(path.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// A path segment does not name a loadable relation on the schema.
    pub fn unresolvable_relation(resource_type: impl Into<String>, field: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        let field = field.into();
        Self::new(
            ErrorCode::UnresolvableRelation,
            format!("`{}` is not a loadable relation of resource type `{}`", field, resource_type),
        )
        .with_resource_type(&resource_type)
        .with_field(&field)
        .with_suggestion("Check the include path for typos")
        .with_help("Enable skip_missing_fields to ignore unknown include paths")
    }

    /// A count was requested for a relation that does not allow it.
    pub fn relation_not_countable(resource_type: impl Into<String>, field: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        let field = field.into();
        Self::new(
            ErrorCode::RelationNotCountable,
            format!("relation `{}.{}` cannot be counted", resource_type, field),
        )
        .with_resource_type(&resource_type)
        .with_field(&field)
        .with_suggestion(format!("Mark `{}` with can_count() to allow counting", field))
    }

    /// An include path could not be parsed.
    pub fn invalid_include_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        let message = message.into();
        Self::new(
            ErrorCode::InvalidIncludePath,
            format!("invalid include path `{}`: {}", path, message),
        )
        .with_path(&path)
    }

    /// A resource type has no registered schema.
    pub fn unknown_resource_type(resource_type: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        Self::new(
            ErrorCode::UnknownResourceType,
            format!("no schema registered for resource type `{}`", resource_type),
        )
        .with_resource_type(&resource_type)
        .with_help("Every inverse type of a relation must be registered at startup")
    }

    // ============== Error Classification ==============

    /// Check if this is an unresolvable relation error.
    pub fn is_unresolvable_relation(&self) -> bool {
        self.code == ErrorCode::UnresolvableRelation
    }

    /// Check if this is an unknown resource type error.
    pub fn is_unknown_resource_type(&self) -> bool {
        self.code == ErrorCode::UnknownResourceType
    }
}

impl From<SchemaError> for QueryError {
    fn from(err: SchemaError) -> Self {
        match &err {
            SchemaError::UnknownResourceType { resource_type } => {
                Self::unknown_resource_type(resource_type.clone()).with_source(err)
            }
            _ => Self::new(ErrorCode::InvalidConfiguration, err.to_string()).with_source(err),
        }
    }
}
