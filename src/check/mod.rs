//! Schema checks of API responses and the diagnostics they produce.
//!
//! A check runs a [`SchemaValidator`] over a response body, folds its raw
//! error records into [`ValidationError`] values with [`classify`], and
//! hands them to the [`Presenter`], which writes the test log, annotates
//! the live view of the API call, and decides the [`Verdict`].

mod classify;
mod config;
pub(crate) mod data;
mod diagnostic;
mod error;
mod log;
mod presenter;
mod response;
mod style;
mod style_cache;
mod surface;

pub use classify::{ClassifiedErrorSet, ErrorKind, ValidationError, ValidatorFamily, classify};
pub use config::{
    CheckConfig, DEFAULT_MAX_ERRORS_TO_SHOW, load_check_config, load_check_config_with_source,
};
pub use data::{UNDEFINED_VALUE, flag_mismatches, render_offending_value, resolve_path};
pub use diagnostic::{ConfigDiagnostic, ConfigDiagnosticCode, SourceLocation};
pub use error::CheckError;
pub use log::{LogEntry, LogSink, RecordingLog};
pub use presenter::{Presenter, Verdict, invalid_summary, split_for_display};
pub use response::{ResponseCheck, SchemaValidator, ValidatorOutput};
pub use style::{
    DEFAULT_COLOR_PROPERTY_ERROR, DEFAULT_COLOR_PROPERTY_MISSING, DEFAULT_ICON_PROPERTY_ERROR,
    DEFAULT_ICON_PROPERTY_MISSING, IssueStyle, IssueStyleOverrides,
};
pub use style_cache::{StyleCache, StyleKey};
pub use surface::{Highlighter, MemorySurface, RenderSurface, escape_html};
