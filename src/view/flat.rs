//! Annotation of flat, syntax-highlighted views.
//!
//! The flat view is an HTML blob produced by highlighting the
//! mismatch-flagged copy of the response. Every flagged value is a string
//! token whose text starts with an issue icon, so after highlighting it
//! reads `<span class="…">&quot;⚠️ …`. Annotation styles the enclosing
//! token of each such occurrence.

use std::collections::BTreeSet;
use std::fmt;

use crate::check::{IssueStyle, ValidationError};

use super::TreeAnnotator;

/// Inline style shared by both passes.
const FLAT_FONT_STYLE: &str = "font-weight: bold; font-size: 1.3em;";

/// HTML-escaped syntax-highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightedText(String);

impl HighlightedText {
    /// Wraps an already highlighted blob.
    #[must_use]
    pub const fn new(html: String) -> Self {
        Self(html)
    }

    /// Returns the inner HTML as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner HTML.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HighlightedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Styles flagged tokens of a [`HighlightedText`].
///
/// Runs the error-icon pass before the missing-icon pass. An occurrence
/// styled by the first pass is skipped by the second, so tokens are never
/// styled twice even when both icons coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatAnnotator;

impl TreeAnnotator for FlatAnnotator {
    type View = HighlightedText;

    fn annotate(
        &self,
        view: &HighlightedText,
        _errors: &[ValidationError],
        styles: &IssueStyle,
    ) -> HighlightedText {
        let html = view.as_str();
        let mut insertions: Vec<(usize, String)> = Vec::new();
        let mut styled = BTreeSet::new();

        for (icon, color) in [
            (&styles.icon_property_error, &styles.color_property_error),
            (&styles.icon_property_missing, &styles.color_property_missing),
        ] {
            if icon.is_empty() {
                continue;
            }
            let needle = format!(">&quot;{icon}");
            let attribute = format!(" style=\"{FLAT_FONT_STYLE} color: {color};\"");
            for (position, _) in html.match_indices(needle.as_str()) {
                if styled.insert(position) {
                    insertions.push((position, attribute.clone()));
                }
            }
        }

        insertions.sort_by_key(|(position, _)| *position);
        tracing::debug!(tokens = insertions.len(), "styled flagged tokens in flat view");

        let mut decorated = String::with_capacity(html.len() + insertions.len() * 64);
        let mut rest = html;
        let mut consumed = 0;
        for (position, attribute) in insertions {
            let Some((head, tail)) = rest.split_at_checked(position - consumed) else {
                break;
            };
            decorated.push_str(head);
            decorated.push_str(&attribute);
            rest = tail;
            consumed = position;
        }
        decorated.push_str(rest);

        HighlightedText::new(decorated)
    }
}
