//! Schema checks of API responses.
//!
//! [`ResponseCheck`] is the entry point a test harness calls with the
//! response of an API call and a [`SchemaValidator`]. The validator itself
//! is a black box: it reports raw error records in the shape of its
//! [`ValidatorFamily`].

use serde_json::Value;

use super::classify::{ValidatorFamily, classify};
use super::config::CheckConfig;
use super::data::flag_mismatches;
use super::error::CheckError;
use super::log::LogSink;
use super::presenter::{Presenter, Verdict};
use super::style_cache::StyleCache;
use super::surface::RenderSurface;

/// Fields of which an API response must carry at least one.
const RESPONSE_FIELDS: [&str; 3] = ["body", "status", "headers"];

/// Body validated when a response carries none.
static MISSING_BODY: Value = Value::Null;

/// Raw result of running a schema validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorOutput {
    /// Raw error records in emission order; empty when the data is valid.
    pub errors: Vec<Value>,
    /// Mismatch-flagged copy of the data, when the validator builds one.
    pub data_mismatches: Option<Value>,
}

/// A schema validator treated as a black box.
pub trait SchemaValidator {
    /// Shape of the raw error records this validator produces.
    fn family(&self) -> ValidatorFamily;

    /// Validates `data` and reports raw error records.
    fn validate(&self, data: &Value) -> ValidatorOutput;
}

/// Validates API responses and reports through one surface and log.
pub struct ResponseCheck<'a> {
    config: &'a CheckConfig,
    styles: &'a mut StyleCache,
    surface: &'a mut dyn RenderSurface,
    log: &'a mut dyn LogSink,
}

impl<'a> ResponseCheck<'a> {
    /// Creates a check bound to a surface, its style cache, and a log.
    pub fn new(
        config: &'a CheckConfig,
        styles: &'a mut StyleCache,
        surface: &'a mut dyn RenderSurface,
        log: &'a mut dyn LogSink,
    ) -> Self {
        Self {
            config,
            styles,
            surface,
            log,
        }
    }

    /// Validates the body of `response` with `validator`.
    ///
    /// When validation is disabled the response is not inspected at all.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidInvocation`] if `response` has none of
    /// `body`, `status`, or `headers`, before the validator runs. Returns
    /// [`CheckError::SchemaMismatch`] if the body does not satisfy the
    /// schema, after all diagnostics have been written.
    pub fn run(
        &mut self,
        response: &Value,
        validator: &dyn SchemaValidator,
    ) -> Result<Verdict, CheckError> {
        if self.config.disable_schema_validation {
            return Ok(self.presenter().present_disabled());
        }

        if !is_api_response(response) {
            tracing::error!("{}", CheckError::InvalidInvocation);
            return Err(CheckError::InvalidInvocation);
        }

        let data = response.get("body").unwrap_or(&MISSING_BODY);
        let issue_style = self.config.issue_style();

        let output = validator.validate(data);
        let errors = classify(validator.family(), &output.errors, data);
        let mismatches = output
            .data_mismatches
            .unwrap_or_else(|| flag_mismatches(data, &errors, &issue_style));

        if !self.config.title_path.is_empty() {
            tracing::info!(
                "SCHEMA VALIDATION FOR TEST: {}",
                self.config.title_path.join(" > ")
            );
        }

        self.presenter().present(&errors, &mismatches, &issue_style)
    }

    fn presenter(&mut self) -> Presenter<'_> {
        Presenter::new(self.config, self.styles, self.surface, self.log)
    }
}

/// Returns `true` if `subject` looks like an API response.
fn is_api_response(subject: &Value) -> bool {
    subject
        .as_object()
        .is_some_and(|fields| RESPONSE_FIELDS.iter().any(|field| fields.contains_key(*field)))
}
