//! Error types for response checks and check configuration.

use super::diagnostic::ConfigDiagnostic;

/// Errors raised by a response check or while loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The checked subject is not an API response.
    #[error(
        "The element chained to the schema validation command is expected to be an API response!"
    )]
    InvalidInvocation,

    /// The response body does not satisfy the schema.
    ///
    /// Returned only after every diagnostic has been logged and the live
    /// view, if any, has been annotated.
    #[error("{message}")]
    SchemaMismatch {
        /// Number of classified schema errors.
        error_count: usize,
        /// Failure message; multi-line in non-interactive sessions.
        message: String,
    },

    /// Check configuration failed to deserialize or validate.
    #[error("invalid check configuration: {message}")]
    Config {
        /// A human-readable explanation of the failure.
        message: String,
        /// Source-located diagnostic, when a location is known.
        diagnostic: Option<ConfigDiagnostic>,
    },
}

impl CheckError {
    /// Returns the structured configuration diagnostic, if any.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&ConfigDiagnostic> {
        match self {
            Self::Config { diagnostic, .. } => diagnostic.as_ref(),
            Self::InvalidInvocation | Self::SchemaMismatch { .. } => None,
        }
    }
}
