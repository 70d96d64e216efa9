//! Presentation of classified schema errors.
//!
//! The [`Presenter`] turns a classified error set into the verdict of a
//! check. On failure it annotates the live view (when asked to and when one
//! is present), writes a summary line, one detail line per error up to the
//! configured limit plus an overflow line, and only then returns the
//! failure.

use serde_json::{Value, json};

use crate::view::{FlatAnnotator, HighlightedText, StructuredAnnotator, TreeAnnotator};

use super::classify::{ClassifiedErrorSet, ValidationError};
use super::config::CheckConfig;
use super::error::CheckError;
use super::log::{LogEntry, LogSink};
use super::style::IssueStyle;
use super::style_cache::StyleCache;
use super::surface::RenderSurface;

const ICON_PASSED: &str = "✔️";
const ICON_FAILED: &str = "❌";
const ICON_MORE_ERRORS: &str = "➕";

const COLOR_PASSED: &str = "#66d966";
const COLOR_FAILED: &str = "#e34040";
const COLOR_DISABLED: &str = "#e0e030";

const SUMMARY_FONT_SIZE: &str = "14px";

/// Indentation of raw records in detail lines.
const DETAIL_INDENT: &[u8] = b" ";
/// Indentation of the mismatch copy shown in the flat view.
const FLAT_VIEW_INDENT: &[u8] = b"    ";

const RESPONSE_VALID: &str = "**THE RESPONSE BODY IS VALID AGAINST THE SCHEMA.**";
const WARNING_DISABLED: &str = "⚠️ API SCHEMA VALIDATION DISABLED ⚠️";
const MESSAGE_DISABLED: &str =
    "- The environment variable \"disableSchemaValidation\" has been set to true.";
const ERROR_RESPONSE_BODY: &str = "The response body is not valid against the schema!";

/// Outcome of a check that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The response body satisfies the schema.
    Passed,
    /// Validation is disabled; nothing was checked.
    Skipped,
}

/// Summary line for a failed check.
#[must_use]
pub fn invalid_summary(error_count: usize) -> String {
    format!(
        "**THE RESPONSE BODY IS NOT VALID AGAINST THE SCHEMA ⛔ (Number of schema errors: {error_count}) ⛔**"
    )
}

/// Splits `errors` into the detailed head and the folded remainder.
///
/// A remainder of exactly one error is shown in full instead, since the
/// overflow line would take the same space.
#[must_use]
pub fn split_for_display(
    errors: &[ValidationError],
    max_errors_to_show: usize,
) -> (&[ValidationError], &[ValidationError]) {
    if errors.len() > max_errors_to_show.saturating_add(1) {
        errors.split_at(max_errors_to_show)
    } else {
        (errors, &[])
    }
}

/// Writes the diagnostics of one check to the log and the live surface.
pub struct Presenter<'a> {
    config: &'a CheckConfig,
    styles: &'a mut StyleCache,
    surface: &'a mut dyn RenderSurface,
    log: &'a mut dyn LogSink,
}

impl<'a> Presenter<'a> {
    /// Creates a presenter over a surface and its style cache.
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

    /// Logs that validation is disabled.
    pub fn present_disabled(&mut self) -> Verdict {
        self.emit(MESSAGE_DISABLED, COLOR_DISABLED, WARNING_DISABLED, None, None);
        tracing::warn!("{WARNING_DISABLED} {MESSAGE_DISABLED}");
        Verdict::Skipped
    }

    /// Presents the result of a check.
    ///
    /// `mismatches` is the mismatch-flagged copy of `data`; it feeds the
    /// flat view and the summary metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::SchemaMismatch`] when `errors` is non-empty,
    /// after every log line has been written and the live view replaced.
    pub fn present(
        &mut self,
        errors: &ClassifiedErrorSet,
        mismatches: &Value,
        issue_style: &IssueStyle,
    ) -> Result<Verdict, CheckError> {
        if self.config.disable_schema_validation {
            return Ok(self.present_disabled());
        }

        if errors.is_empty() {
            let display_name = format!("{ICON_PASSED} PASSED -");
            self.emit(
                RESPONSE_VALID,
                COLOR_PASSED,
                &display_name,
                None,
                Some(SUMMARY_FONT_SIZE),
            );
            tracing::info!("  {display_name} {RESPONSE_VALID}");
            return Ok(Verdict::Passed);
        }

        if self.config.annotates_view() {
            self.annotate_live_view(errors, mismatches, issue_style);
        }

        let summary = invalid_summary(errors.len());
        let raw_errors: Vec<&Value> = errors.iter().map(|error| &error.raw_detail).collect();
        self.emit(
            &summary,
            COLOR_FAILED,
            &format!("{ICON_FAILED} FAILED -"),
            Some(json!({
                "number_of_schema_errors": errors.len(),
                "schema_errors": raw_errors,
                "data_mismatches": mismatches,
            })),
            Some(SUMMARY_FONT_SIZE),
        );

        let (shown, rest) = split_for_display(errors, self.config.max_errors_to_show);
        for error in shown {
            self.emit(
                &pretty_json(&error.raw_detail, DETAIL_INDENT),
                issue_style.color_for(error.kind),
                issue_style.icon_for(error.kind),
                Some(json!({ "schema_error": error.raw_detail })),
                None,
            );
        }
        if !rest.is_empty() {
            let rest_of_errors: Vec<&Value> = rest.iter().map(|error| &error.raw_detail).collect();
            self.emit(
                &format!("...and {} more errors.", rest.len()),
                &issue_style.color_property_missing,
                ICON_MORE_ERRORS,
                Some(json!({ "rest_of_errors": rest_of_errors })),
                None,
            );
        }

        let failed_line = format!("{ICON_FAILED} FAILED - {summary}");
        tracing::error!("  {failed_line}");

        let message = if self.config.interactive {
            ERROR_RESPONSE_BODY.to_owned()
        } else {
            let mut lines = vec![failed_line];
            lines.extend(errors.iter().map(|error| error.raw_detail.to_string()));
            lines.join("\n")
        };

        Err(CheckError::SchemaMismatch {
            error_count: errors.len(),
            message,
        })
    }

    /// Annotates whichever live view the surface shows, structured first.
    fn annotate_live_view(
        &mut self,
        errors: &ClassifiedErrorSet,
        mismatches: &Value,
        issue_style: &IssueStyle,
    ) {
        if let Some(view) = self.surface.structured_view() {
            let decorated = StructuredAnnotator.annotate(view, errors, issue_style);
            self.surface.replace_structured_view(decorated);
            return;
        }

        if self.surface.flat_view().is_some() {
            let pretty = pretty_json(mismatches, FLAT_VIEW_INDENT);
            let highlighted = HighlightedText::new(self.surface.highlight_json(&pretty));
            let decorated = FlatAnnotator.annotate(&highlighted, errors, issue_style);
            self.surface.replace_flat_view(decorated);
            return;
        }

        tracing::debug!("no live view to annotate");
    }

    fn emit(
        &mut self,
        message: &str,
        color_hex: &str,
        display_name: &str,
        metadata: Option<Value>,
        font_size: Option<&str>,
    ) {
        let style_key = self
            .styles
            .acquire_style(&mut *self.surface, color_hex, font_size);
        self.log.log(LogEntry {
            message: message.to_owned(),
            color_hex: color_hex.to_owned(),
            display_name: display_name.to_owned(),
            metadata,
            font_size: font_size.map(str::to_owned),
            style_key,
        });
    }
}

/// Pretty-prints `value` with `indent` per nesting level.
fn pretty_json(value: &Value, indent: &[u8]) -> String {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    match serde::Serialize::serialize(value, &mut serializer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::check::classify::{ValidatorFamily, classify};
    use crate::check::log::RecordingLog;
    use crate::check::surface::MemorySurface;

    fn errors(count: usize) -> ClassifiedErrorSet {
        let raw: Vec<Value> = (0..count)
            .map(|i| json!({"instancePath": format!("/{i}"), "message": "must be string"}))
            .collect();
        classify(ValidatorFamily::Ajv, &raw, &json!([]))
    }

    #[rstest]
    #[case::none(0, 0, 0)]
    #[case::under(4, 4, 0)]
    #[case::at_limit(10, 10, 0)]
    #[case::one_over(11, 11, 0)]
    #[case::two_over(12, 10, 2)]
    #[case::many(25, 10, 15)]
    fn splits_errors_for_display(
        #[case] count: usize,
        #[case] shown: usize,
        #[case] folded: usize,
    ) {
        let all = errors(count);
        let (head, rest) = split_for_display(&all, 10);
        assert_eq!((head.len(), rest.len()), (shown, folded));
    }

    #[rstest]
    #[case::detail(DETAIL_INDENT, "{\n \"a\": {\n  \"b\": 1\n }\n}")]
    #[case::flat_view(FLAT_VIEW_INDENT, "{\n    \"a\": {\n        \"b\": 1\n    }\n}")]
    fn pretty_json_indents_per_level(#[case] indent: &[u8], #[case] expected: &str) {
        assert_eq!(pretty_json(&json!({"a": {"b": 1}}), indent), expected);
    }

    #[rstest]
    fn disabled_config_skips_everything() {
        let config = CheckConfig {
            disable_schema_validation: true,
            ..CheckConfig::default()
        };
        let mut cache = StyleCache::new();
        let mut surface = MemorySurface::new();
        let mut log = RecordingLog::new();

        let verdict = Presenter::new(&config, &mut cache, &mut surface, &mut log)
            .present(&errors(3), &json!(null), &IssueStyle::default());

        assert!(matches!(verdict, Ok(Verdict::Skipped)));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(
            log.entries().first().map(|e| e.display_name.as_str()),
            Some(WARNING_DISABLED)
        );
        assert_eq!(surface.view_replacements(), 0);
    }

    #[rstest]
    fn every_entry_carries_a_registered_style() {
        let config = CheckConfig::default();
        let mut cache = StyleCache::new();
        let mut surface = MemorySurface::new();
        let mut log = RecordingLog::new();

        let result = Presenter::new(&config, &mut cache, &mut surface, &mut log).present(
            &errors(2),
            &json!(null),
            &IssueStyle::default(),
        );

        assert!(result.is_err());
        for entry in log.entries() {
            assert!(cache.contains(&entry.color_hex));
            assert_eq!(
                entry.style_key.as_str(),
                format!("colorLog{}", entry.color_hex.replacen('#', "-", 1))
            );
        }
        assert_eq!(surface.styles().len(), 2);
    }
}
