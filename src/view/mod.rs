//! Rendered views of an API call and their annotators.
//!
//! A test runner may show the response of the last API call either as a
//! structured, collapsible tree ([`ViewTree`]) or as a flat block of
//! syntax-highlighted text ([`HighlightedText`]). Both can be decorated
//! with schema diagnostics through the [`TreeAnnotator`] trait.

mod flat;
mod index;
mod structured;
mod tree;

use crate::check::{IssueStyle, ValidationError};

pub use flat::{FlatAnnotator, HighlightedText};
pub use index::ViewIndex;
pub use structured::StructuredAnnotator;
pub use tree::{INLINE_MARKER_INDENT_PX, Marker, MarkerKind, NodeId, NodeKind, ViewNode, ViewTree};

/// Decorates a rendered view with schema diagnostics.
///
/// Implementations never touch `view`: they return a decorated copy that
/// the caller swaps in once every error has been applied, so a partially
/// annotated view is never visible.
pub trait TreeAnnotator {
    /// The view representation this annotator understands.
    type View: Clone;

    /// Returns a copy of `view` annotated with `errors`.
    fn annotate(
        &self,
        view: &Self::View,
        errors: &[ValidationError],
        styles: &IssueStyle,
    ) -> Self::View;
}
