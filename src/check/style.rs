//! Icons and colors used to flag schema issues.
//!
//! Callers supply an [`IssueStyleOverrides`] in which every field is
//! optional; [`IssueStyleOverrides::resolve`] merges it over the fixed
//! defaults to produce the [`IssueStyle`] that the presenter and the
//! annotators consume.

use serde::Deserialize;

use super::classify::ErrorKind;

/// Default icon for a property whose value does not match the schema.
pub const DEFAULT_ICON_PROPERTY_ERROR: &str = "⚠️";
/// Default color for a property whose value does not match the schema.
pub const DEFAULT_COLOR_PROPERTY_ERROR: &str = "#d67e09";
/// Default icon for a required property that is absent.
pub const DEFAULT_ICON_PROPERTY_MISSING: &str = "❌";
/// Default color for a required property that is absent.
pub const DEFAULT_COLOR_PROPERTY_MISSING: &str = "#c10000";

/// Fully resolved issue style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueStyle {
    /// Icon prefixed to mismatched values.
    pub icon_property_error: String,
    /// Color used for mismatched values.
    pub color_property_error: String,
    /// Icon prefixed to missing properties.
    pub icon_property_missing: String,
    /// Color used for missing properties.
    pub color_property_missing: String,
}

impl Default for IssueStyle {
    fn default() -> Self {
        IssueStyleOverrides::default().resolve()
    }
}

impl IssueStyle {
    /// Returns the icon used for errors of `kind`.
    #[must_use]
    pub fn icon_for(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::Missing => &self.icon_property_missing,
            ErrorKind::Mismatch => &self.icon_property_error,
        }
    }

    /// Returns the color used for errors of `kind`.
    #[must_use]
    pub fn color_for(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::Missing => &self.color_property_missing,
            ErrorKind::Mismatch => &self.color_property_error,
        }
    }
}

/// Caller-supplied issue style; unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueStyleOverrides {
    /// Icon prefixed to mismatched values.
    #[serde(rename = "iconPropertyError", alias = "icon_property_error", default)]
    pub icon_property_error: Option<String>,
    /// Color used for mismatched values.
    #[serde(
        rename = "colorPropertyError",
        alias = "color_property_error",
        default
    )]
    pub color_property_error: Option<String>,
    /// Icon prefixed to missing properties.
    #[serde(
        rename = "iconPropertyMissing",
        alias = "icon_property_missing",
        default
    )]
    pub icon_property_missing: Option<String>,
    /// Color used for missing properties.
    #[serde(
        rename = "colorPropertyMissing",
        alias = "color_property_missing",
        default
    )]
    pub color_property_missing: Option<String>,
}

impl IssueStyleOverrides {
    /// Merges these overrides over the default style.
    #[must_use]
    pub fn resolve(&self) -> IssueStyle {
        fn pick(value: Option<&String>, fallback: &str) -> String {
            value.map_or_else(|| fallback.to_owned(), Clone::clone)
        }

        IssueStyle {
            icon_property_error: pick(
                self.icon_property_error.as_ref(),
                DEFAULT_ICON_PROPERTY_ERROR,
            ),
            color_property_error: pick(
                self.color_property_error.as_ref(),
                DEFAULT_COLOR_PROPERTY_ERROR,
            ),
            icon_property_missing: pick(
                self.icon_property_missing.as_ref(),
                DEFAULT_ICON_PROPERTY_MISSING,
            ),
            color_property_missing: pick(
                self.color_property_missing.as_ref(),
                DEFAULT_COLOR_PROPERTY_MISSING,
            ),
        }
    }
}
