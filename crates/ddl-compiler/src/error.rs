//! Error types for the specification compiler
//!
//! Provides error handling for:
//! - Specification parsing (malformed input)
//! - Scalar values that cannot be embedded safely
//! - Fetching specifications at the source boundary
//! - Loading compiler configuration
//!
//! Callers that expect text get a single-line diagnostic from
//! [`CompileError::diagnostic`] instead of the statement.

use ddl_spec::SpecError;
use std::path::PathBuf;

/// Prefix shared by every diagnostic line
pub const DIAGNOSTIC_PREFIX: &str = "-- Error: ";

/// Errors while compiling a specification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Specification could not be read
    #[error("specification error: {0}")]
    Spec(#[from] SpecError),

    /// Value cannot be written as a double-quoted scalar
    #[error("unsupported character {character:?} in {field}")]
    UnsupportedScalar { field: String, character: char },
}

impl CompileError {
    /// Create unsupported scalar error
    pub fn unsupported_scalar(field: impl Into<String>, character: char) -> Self {
        Self::UnsupportedScalar {
            field: field.into(),
            character,
        }
    }

    /// Check if the input was not a well-formed specification
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Spec(_))
    }

    /// Single-line diagnostic in place of the statement
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let line = match self {
            Self::Spec(err) => format!("Invalid JSON specification - {}", err.detail()),
            Self::UnsupportedScalar { field, character } => format!(
                "Unsupported specification value - {field} contains {character:?}, which cannot be embedded in a quoted scalar"
            ),
        };
        format!("{DIAGNOSTIC_PREFIX}{}", single_line(&line))
    }
}

/// Errors at the specification source boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// No specification exists for the object
    #[error("agent not found or describe failed: {object}")]
    NotFound { object: String },

    /// Describe output could not be interpreted
    #[error("invalid describe row: {0}")]
    InvalidRow(String),
}

impl SourceError {
    /// Create not found error for object
    pub fn not_found(object: impl Into<String>) -> Self {
        Self::NotFound {
            object: object.into(),
        }
    }
}

/// Errors while fetching and compiling a stored specification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Source had no usable specification
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Fetched specification did not compile
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl FetchError {
    /// Single-line diagnostic for the operator
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Source(err) => format!("{DIAGNOSTIC_PREFIX}{}", single_line(&err.to_string())),
            Self::Compile(err) => err.diagnostic(),
        }
    }
}

/// Errors while loading compiler configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
