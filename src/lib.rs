//! Schema-validation diagnostics for API response tests.
//!
//! This crate turns the raw error records produced by a JSON schema
//! validator into readable test-log entries and, optionally, annotates a
//! live rendering of the API call so that every mismatch is flagged at the
//! exact position of the offending value.

/// Response checking: classification, presentation, configuration.
pub mod check;
/// Rendered views of an API response and the annotators that decorate them.
pub mod view;
