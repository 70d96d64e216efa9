//! Located diagnostics for configuration that fails to load.
//!
//! A rendered diagnostic reads `code | source:line:column | message`, for
//! example `config.validation_failure | cypress.env.yaml:3:25 | …`.

use std::fmt;

/// What went wrong while loading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigDiagnosticCode {
    /// The YAML is malformed or names an unknown key.
    ParseFailure,
    /// A key holds a value outside its allowed range.
    ValidationFailure,
}

impl ConfigDiagnosticCode {
    /// Dotted code string, stable across releases.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "config.parse_failure",
            Self::ValidationFailure => "config.validation_failure",
        }
    }
}

impl fmt::Display for ConfigDiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of the offending key within a configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File name, or `<inline>` for configuration given as a string.
    pub source: String,
    /// Line, counted from 1.
    pub line: usize,
    /// Column, counted from 1.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// A configuration failure pinned to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    /// Failure class.
    pub code: ConfigDiagnosticCode,
    /// Where the failure was detected.
    pub location: SourceLocation,
    /// First line of the failure message.
    pub message: String,
}

impl ConfigDiagnostic {
    /// Single-line rendering for test logs and terminals.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{} | {} | {}", self.code, self.location, self.message)
    }
}
