//! Check configuration and its YAML loader.
//!
//! Provides [`load_check_config`], which deserializes a YAML document into
//! a [`CheckConfig`] with strict unknown-key rejection, then enforces the
//! constraints `serde` attributes cannot express: a positive error limit,
//! hex colors, and non-blank icons. Keys are camelCase, with snake_case
//! aliases.

use serde::Deserialize;
use serde_saphyr::{Location, Spanned};

use super::diagnostic::{ConfigDiagnostic, ConfigDiagnosticCode, SourceLocation};
use super::error::CheckError;
use super::style::{IssueStyle, IssueStyleOverrides};

/// Number of detail lines logged before the remainder is folded.
pub const DEFAULT_MAX_ERRORS_TO_SHOW: usize = 10;

/// Synthetic source identifier used by [`load_check_config`].
const INLINE_SOURCE: &str = "<inline>";

/// Settings that govern one or more response checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Skip validation entirely and log a warning instead.
    pub disable_schema_validation: bool,
    /// Annotate the live view of the API call on failure.
    pub enable_mismatches_on_ui: bool,
    /// The session is interactive; annotation only happens in interactive
    /// sessions, and failure messages stay short.
    pub interactive: bool,
    /// Number of detail lines logged before the remainder is folded.
    pub max_errors_to_show: usize,
    /// Icon and color overrides.
    pub issues_styles: IssueStyleOverrides,
    /// Titles of the enclosing test, outermost first.
    pub title_path: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            disable_schema_validation: false,
            enable_mismatches_on_ui: false,
            interactive: false,
            max_errors_to_show: DEFAULT_MAX_ERRORS_TO_SHOW,
            issues_styles: IssueStyleOverrides::default(),
            title_path: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Issue style with the configured overrides merged over the defaults.
    #[must_use]
    pub fn issue_style(&self) -> IssueStyle {
        self.issues_styles.resolve()
    }

    /// Returns `true` when failures should annotate the live view.
    #[must_use]
    pub const fn annotates_view(&self) -> bool {
        self.interactive && self.enable_mismatches_on_ui
    }
}

// ── Raw document ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCheckConfig {
    #[serde(
        rename = "disableSchemaValidation",
        alias = "disable_schema_validation",
        default
    )]
    disable_schema_validation: bool,
    #[serde(
        rename = "enableMismatchesOnUI",
        alias = "enable_mismatches_on_ui",
        default
    )]
    enable_mismatches_on_ui: bool,
    #[serde(rename = "interactive", alias = "isInteractive", default)]
    interactive: bool,
    #[serde(rename = "maxErrorsToShow", alias = "max_errors_to_show", default)]
    max_errors_to_show: Option<Spanned<u32>>,
    #[serde(rename = "issuesStyles", alias = "issues_styles", default)]
    issues_styles: Option<RawIssueStyles>,
    #[serde(rename = "titlePath", alias = "title_path", default)]
    title_path: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIssueStyles {
    #[serde(rename = "iconPropertyError", alias = "icon_property_error", default)]
    icon_property_error: Option<Spanned<String>>,
    #[serde(
        rename = "colorPropertyError",
        alias = "color_property_error",
        default
    )]
    color_property_error: Option<Spanned<String>>,
    #[serde(
        rename = "iconPropertyMissing",
        alias = "icon_property_missing",
        default
    )]
    icon_property_missing: Option<Spanned<String>>,
    #[serde(
        rename = "colorPropertyMissing",
        alias = "color_property_missing",
        default
    )]
    color_property_missing: Option<Spanned<String>>,
}

impl RawCheckConfig {
    fn to_check_config(&self) -> CheckConfig {
        let max_errors_to_show = self
            .max_errors_to_show
            .as_ref()
            .map_or(DEFAULT_MAX_ERRORS_TO_SHOW, |max| {
                usize::try_from(max.value).unwrap_or(usize::MAX)
            });

        CheckConfig {
            disable_schema_validation: self.disable_schema_validation,
            enable_mismatches_on_ui: self.enable_mismatches_on_ui,
            interactive: self.interactive,
            max_errors_to_show,
            issues_styles: self
                .issues_styles
                .as_ref()
                .map(RawIssueStyles::to_overrides)
                .unwrap_or_default(),
            title_path: self.title_path.clone(),
        }
    }

    /// Returns the first constraint violation and where it occurred.
    fn validate(&self) -> Option<(String, Location)> {
        if let Some(max) = &self.max_errors_to_show {
            if max.value == 0 {
                return Some((
                    "maxErrorsToShow must be a positive integer (> 0)".to_owned(),
                    max.referenced,
                ));
            }
        }

        let styles = self.issues_styles.as_ref()?;
        for (name, icon) in [
            ("iconPropertyError", &styles.icon_property_error),
            ("iconPropertyMissing", &styles.icon_property_missing),
        ] {
            if let Some(icon) = icon {
                if icon.value.trim().is_empty() {
                    return Some((
                        format!("issuesStyles.{name} must be non-empty after trimming"),
                        icon.referenced,
                    ));
                }
            }
        }
        for (name, color) in [
            ("colorPropertyError", &styles.color_property_error),
            ("colorPropertyMissing", &styles.color_property_missing),
        ] {
            if let Some(color) = color {
                if !is_hex_color(&color.value) {
                    return Some((
                        format!(
                            "issuesStyles.{name} must be a hex color such as #c10000, got '{}'",
                            color.value
                        ),
                        color.referenced,
                    ));
                }
            }
        }

        None
    }
}

impl RawIssueStyles {
    fn to_overrides(&self) -> IssueStyleOverrides {
        fn value(field: Option<&Spanned<String>>) -> Option<String> {
            field.map(|spanned| spanned.value.clone())
        }

        IssueStyleOverrides {
            icon_property_error: value(self.icon_property_error.as_ref()),
            color_property_error: value(self.color_property_error.as_ref()),
            icon_property_missing: value(self.icon_property_missing.as_ref()),
            color_property_missing: value(self.color_property_missing.as_ref()),
        }
    }
}

/// Returns `true` for `#` followed by 3, 6 or 8 hex digits.
fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

// ── Loading ─────────────────────────────────────────────────────────

/// Loads check configuration from a YAML string.
///
/// An empty document yields [`CheckConfig::default`].
///
/// # Errors
///
/// Returns [`CheckError::Config`] if the YAML is malformed, contains an
/// unknown key, or violates a configuration constraint.
///
/// # Examples
///
///     use schemaview::check::load_check_config;
///
///     let yaml = r##"
///     interactive: true
///     enableMismatchesOnUI: true
///     issuesStyles:
///       iconPropertyMissing: "❓"
///       colorPropertyMissing: "#800080"
///     "##;
///     let config = load_check_config(yaml).unwrap();
///     assert!(config.annotates_view());
///     assert_eq!(config.issue_style().icon_property_missing, "❓");
pub fn load_check_config(input: &str) -> Result<CheckConfig, CheckError> {
    load_check_config_with_source(INLINE_SOURCE, input)
}

/// Loads check configuration and records diagnostics against an explicit
/// source identifier.
///
/// # Errors
///
/// Returns [`CheckError::Config`] when parsing, deserialization, or
/// validation fails.
pub fn load_check_config_with_source(source: &str, input: &str) -> Result<CheckConfig, CheckError> {
    if input.trim().is_empty() {
        return Ok(CheckConfig::default());
    }

    let raw: RawCheckConfig = serde_saphyr::from_str(input).map_err(|error| {
        let message = error.to_string();
        let diagnostic = error.location().map(|location| ConfigDiagnostic {
            code: ConfigDiagnosticCode::ParseFailure,
            location: location_for_source(source, location),
            message: first_line(&message),
        });
        CheckError::Config {
            message,
            diagnostic,
        }
    })?;

    if let Some((reason, location)) = raw.validate() {
        return Err(CheckError::Config {
            diagnostic: Some(ConfigDiagnostic {
                code: ConfigDiagnosticCode::ValidationFailure,
                location: location_for_source(source, location),
                message: reason.clone(),
            }),
            message: reason,
        });
    }

    Ok(raw.to_check_config())
}

fn location_for_source(source: &str, location: Location) -> SourceLocation {
    let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
    let column = usize::try_from(location.column())
        .ok()
        .unwrap_or(usize::MAX);
    SourceLocation {
        source: source.to_owned(),
        line,
        column,
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
