//! Annotation of structured views.

use crate::check::data::array_index;
use crate::check::{IssueStyle, ValidationError};

use super::TreeAnnotator;
use super::index::ViewIndex;
use super::tree::{INLINE_MARKER_INDENT_PX, Marker, MarkerKind, NodeId, ViewTree};

/// Padding of a synthetic property line at depth 1.
const MISSING_LINE_BASE_INDENT_PX: usize = 11;
/// Extra padding per nesting level of a synthetic property line.
const MISSING_LINE_STEP_PX: usize = 14;

/// Decorates a [`ViewTree`] with one marker per error.
///
/// Each error path is consumed one segment per level. Arrays take a
/// zero-based index, objects an exact key. A path that runs past the view
/// produces a fallback marker at the deepest node that does exist: after
/// the array for an absent element, or as a synthetic first line of the
/// object for an absent key. A path that ends on a node, or reaches a
/// scalar, produces an inline marker right after that node.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredAnnotator;

impl TreeAnnotator for StructuredAnnotator {
    type View = ViewTree;

    fn annotate(
        &self,
        view: &ViewTree,
        errors: &[ValidationError],
        styles: &IssueStyle,
    ) -> ViewTree {
        let mut decorated = view.clone();
        let index = ViewIndex::build(&decorated);

        for error in errors {
            if annotate_error(&mut decorated, &index, error, styles).is_none() {
                tracing::debug!(path = ?error.path_segments, "no anchor for schema error in view");
            }
        }

        decorated
    }
}

/// Places the marker for `error`; `None` when the view has no anchor.
fn annotate_error(
    tree: &mut ViewTree,
    index: &ViewIndex,
    error: &ValidationError,
    styles: &IssueStyle,
) -> Option<NodeId> {
    let mut current = index.get(&[])?;
    let mut prefix: Vec<String> = Vec::with_capacity(error.path_segments.len());

    for (depth, segment) in error.path_segments.iter().enumerate() {
        if tree.is_array_container(current) {
            let Some(position) = array_index(segment) else {
                return tree.insert_after(current, missing_element(error, styles, depth));
            };
            prefix.push(position.to_string());
            match index.get(&prefix) {
                Some(element) => current = element,
                None => return tree.insert_after(current, missing_element(error, styles, depth)),
            }
        } else if tree.is_object_container(current) {
            prefix.push(segment.clone());
            match index.get(&prefix) {
                Some(value) => current = value,
                None => {
                    let line = missing_property(error, segment, styles, depth + 1);
                    return tree.insert_first_child(current, line);
                }
            }
        } else {
            break;
        }
    }

    let depth = prefix.len();
    tree.insert_after(current, inline_mismatch(error, styles, depth))
}

fn missing_element(error: &ValidationError, styles: &IssueStyle, depth: usize) -> Marker {
    Marker {
        kind: MarkerKind::MissingElement,
        text: format!("{} Array {}", styles.icon_property_error, error.message),
        color: styles.color_property_error.clone(),
        depth,
        indent_px: INLINE_MARKER_INDENT_PX,
    }
}

fn missing_property(
    error: &ValidationError,
    key: &str,
    styles: &IssueStyle,
    depth: usize,
) -> Marker {
    let name = error.missing_property.as_deref().unwrap_or(key);
    let color = if error.is_missing() {
        &styles.color_property_missing
    } else {
        &styles.color_property_error
    };
    Marker {
        kind: MarkerKind::MissingProperty,
        text: format!("\"{name}\": {}", error.description(styles)),
        color: color.clone(),
        depth,
        indent_px: MISSING_LINE_BASE_INDENT_PX
            + MISSING_LINE_STEP_PX * depth.saturating_sub(1),
    }
}

fn inline_mismatch(error: &ValidationError, styles: &IssueStyle, depth: usize) -> Marker {
    Marker {
        kind: MarkerKind::Mismatch,
        text: error.description(styles),
        color: styles.color_property_error.clone(),
        depth,
        indent_px: INLINE_MARKER_INDENT_PX,
    }
}
