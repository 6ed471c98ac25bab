//! Error types for quarry

use thiserror::Error;

/// Result type alias for quarry operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building, compiling or executing a statement.
///
/// Everything except [`Error::Execution`] is a programmer error raised at the
/// offending call (or, for a few documented cases, at compile time) and is
/// never worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// A table or column reference contains characters outside the allowed set
    #[error("{method}() cannot use reference '{value}', it contains invalid characters")]
    InvalidReference { method: &'static str, value: String },

    /// Comparison operator outside `= <> != > >= < <= LIKE`
    #[error("{method}() cannot use operator '{value}', it must be one of: = <> != > >= < <= LIKE")]
    InvalidOperator { method: &'static str, value: String },

    /// Logic connective outside `AND OR XOR`
    #[error("The {method}() logic must be one of: AND OR XOR, got '{value}'")]
    InvalidLogic { method: &'static str, value: String },

    /// Unknown sort direction
    #[error("Cannot set unknown sort direction {value} in {method}()")]
    InvalidDirection { method: &'static str, value: String },

    /// Malformed caller input of any other shape
    #[error("{method}(): {message}")]
    InvalidArgument {
        method: &'static str,
        message: String,
    },

    /// Two kind-establishing calls disagree
    #[error("Cannot mix query types, {method}() called but {previous}() was called previously")]
    ConflictingKind {
        method: &'static str,
        previous: &'static str,
    },

    /// `debug(true)` stops the caller with the interpolated statement
    #[error("Query debug halt:\n{0}")]
    DebugHalt(String),

    /// The driver name has no known quoting dialect
    #[error("Unsupported driver {0}")]
    UnsupportedDriver(String),

    /// The connection failed to prepare or execute a statement
    #[error("Cannot execute query '{sql}', {message}")]
    Execution { sql: String, message: String },

    /// Rendering into a writer failed
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    /// Writing debug output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error for the given method
    pub fn invalid_argument(method: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            method,
            message: message.into(),
        }
    }

    /// Create an invalid reference error for the given method
    pub fn invalid_reference(method: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidReference {
            method,
            value: value.into(),
        }
    }

    /// Create an execution error wrapping a driver message
    pub fn execution(sql: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Execution {
            sql: sql.into(),
            message: message.to_string(),
        }
    }

    /// Check if this is caller input rejected by validation
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference { .. }
                | Self::InvalidOperator { .. }
                | Self::InvalidLogic { .. }
                | Self::InvalidDirection { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Check if this is a statement kind conflict
    pub fn is_conflicting_kind(&self) -> bool {
        matches!(self, Self::ConflictingKind { .. })
    }

    /// Check if this is a debug halt
    pub fn is_debug_halt(&self) -> bool {
        matches!(self, Self::DebugHalt(_))
    }

    /// Check if this came from the connection
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }

    /// Name of the method that rejected its input, if any
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Self::InvalidReference { method, .. }
            | Self::InvalidOperator { method, .. }
            | Self::InvalidLogic { method, .. }
            | Self::InvalidDirection { method, .. }
            | Self::InvalidArgument { method, .. }
            | Self::ConflictingKind { method, .. } => Some(*method),
            _ => None,
        }
    }
}
