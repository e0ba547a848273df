//! Error types and exit codes for docrank
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid values)
//! - 3: Data/workspace error (missing workspace, unknown document, etc.)
//!
//! Degenerate computations (zero-magnitude vectors, zero total weight) are not
//! errors: they resolve to a neutral `0.0` at the call site.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the docrank CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/workspace error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during docrank operations
#[derive(Error, Debug)]
pub enum DocrankError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid value for metric {id}: {value} (expected a number in 0-10)")]
    InvalidMetric { id: String, value: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/workspace errors (exit code 3)
    #[error("workspace not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid workspace: {reason}")]
    InvalidStore { reason: String },

    #[error("document not found: {path}")]
    DocumentNotFound { path: String },

    #[error("document {path} has too little text for comparison ({len} chars)")]
    EmptyContent { path: String, len: usize },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl DocrankError {
    /// Create an error for a failed IO operation on a specific path
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        DocrankError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        DocrankError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        DocrankError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a not-found error for a document path
    pub fn document_not_found(path: impl Into<String>) -> Self {
        DocrankError::DocumentNotFound { path: path.into() }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DocrankError::UnknownFormat(_)
            | DocrankError::UsageError(_)
            | DocrankError::InvalidMetric { .. }
            | DocrankError::InvalidValue { .. } => ExitCode::Usage,

            DocrankError::StoreNotFound { .. }
            | DocrankError::InvalidStore { .. }
            | DocrankError::DocumentNotFound { .. }
            | DocrankError::EmptyContent { .. }
            | DocrankError::NotFound { .. } => ExitCode::Data,

            DocrankError::Io(_)
            | DocrankError::Json(_)
            | DocrankError::Toml(_)
            | DocrankError::FailedOperation { .. }
            | DocrankError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            DocrankError::UnknownFormat(_) => "unknown_format",
            DocrankError::UsageError(_) => "usage_error",
            DocrankError::InvalidMetric { .. } => "invalid_metric",
            DocrankError::InvalidValue { .. } => "invalid_value",
            DocrankError::StoreNotFound { .. } => "store_not_found",
            DocrankError::InvalidStore { .. } => "invalid_store",
            DocrankError::DocumentNotFound { .. } => "document_not_found",
            DocrankError::EmptyContent { .. } => "empty_content",
            DocrankError::NotFound { .. } => "not_found",
            DocrankError::Io(_) => "io_error",
            DocrankError::Json(_) => "json_error",
            DocrankError::Toml(_) => "toml_error",
            DocrankError::FailedOperation { .. } => "failed_operation",
            DocrankError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for docrank operations
pub type Result<T> = std::result::Result<T, DocrankError>;
