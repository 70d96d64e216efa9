//! The rendering surface that hosts log styles and live API views.
//!
//! The surface belongs to the embedding test environment. Checks only
//! append styles to it and replace whole views; they never edit a live view
//! in place.

use crate::view::{HighlightedText, ViewTree};

use super::style_cache::StyleKey;

/// Live surface a check may style and annotate.
///
/// The probe methods report which view representation is present; the
/// presenter picks the annotator that matches.
pub trait RenderSurface {
    /// Inserts a style block scoped by `key`.
    fn insert_style(&mut self, key: &StyleKey, css: &str);

    /// Returns the live structured view of the last API call, if present.
    fn structured_view(&self) -> Option<&ViewTree>;

    /// Returns the live flat highlighted view of the last API call, if
    /// present.
    fn flat_view(&self) -> Option<&HighlightedText>;

    /// Swaps the live structured view for `view`.
    fn replace_structured_view(&mut self, view: ViewTree);

    /// Swaps the live flat view for `view`.
    fn replace_flat_view(&mut self, view: HighlightedText);

    /// Syntax-highlights pretty-printed JSON into an HTML-escaped blob.
    fn highlight_json(&self, json: &str) -> String;
}

/// Highlighter used by [`MemorySurface`].
pub type Highlighter = fn(&str) -> String;

/// In-memory surface for headless runs and tests.
#[derive(Debug)]
pub struct MemorySurface {
    styles: Vec<(StyleKey, String)>,
    structured: Option<ViewTree>,
    flat: Option<HighlightedText>,
    highlighter: Highlighter,
    view_replacements: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            styles: Vec::new(),
            structured: None,
            flat: None,
            highlighter: escape_html,
            view_replacements: 0,
        }
    }
}

impl MemorySurface {
    /// Creates a surface without any live view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface showing a structured view.
    #[must_use]
    pub fn with_structured_view(view: ViewTree) -> Self {
        Self {
            structured: Some(view),
            ..Self::default()
        }
    }

    /// Creates a surface showing a flat view highlighted by `highlighter`.
    #[must_use]
    pub fn with_flat_view(view: HighlightedText, highlighter: Highlighter) -> Self {
        Self {
            flat: Some(view),
            highlighter,
            ..Self::default()
        }
    }

    /// Style blocks inserted so far, in insertion order.
    #[must_use]
    pub fn styles(&self) -> &[(StyleKey, String)] {
        &self.styles
    }

    /// Number of times a live view has been replaced.
    #[must_use]
    pub const fn view_replacements(&self) -> usize {
        self.view_replacements
    }
}

impl RenderSurface for MemorySurface {
    fn insert_style(&mut self, key: &StyleKey, css: &str) {
        self.styles.push((key.clone(), css.to_owned()));
    }

    fn structured_view(&self) -> Option<&ViewTree> {
        self.structured.as_ref()
    }

    fn flat_view(&self) -> Option<&HighlightedText> {
        self.flat.as_ref()
    }

    fn replace_structured_view(&mut self, view: ViewTree) {
        self.structured = Some(view);
        self.view_replacements += 1;
    }

    fn replace_flat_view(&mut self, view: HighlightedText) {
        self.flat = Some(view);
        self.view_replacements += 1;
    }

    fn highlight_json(&self, json: &str) -> String {
        (self.highlighter)(json)
    }
}

/// Escapes text for embedding in HTML without adding any highlighting.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
