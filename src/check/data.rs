//! Path resolution over response data and the mismatch-flagged copy.

use serde_json::Value;

use super::classify::ValidationError;
use super::style::IssueStyle;

/// Literal rendered when an error path resolves to nothing.
pub const UNDEFINED_VALUE: &str = "undefined";

/// Separator between descriptions of errors reported at the same location.
const DESCRIPTION_SEPARATOR: &str = " | ";

/// Largest number of `null` slots added to reach a position past the end
/// of an array. Positions further out are not flagged.
const MAX_ARRAY_PADDING: usize = 16;

/// Walks `data` along `segments`: object keys by name, array elements by
/// decimal index.
#[must_use]
pub fn resolve_path<'a>(data: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(data, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => array_index(segment).and_then(|index| items.get(index)),
            _ => None,
        })
}

/// Renders a resolved value for display: compact JSON with every `"`
/// replaced by `'`, or `undefined` when nothing was resolved.
#[must_use]
pub fn render_offending_value(value: Option<&Value>) -> String {
    value.map_or_else(
        || UNDEFINED_VALUE.to_owned(),
        |found| found.to_string().replace('"', "'"),
    )
}

/// Parses an array index segment.
pub(crate) fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Builds a copy of `data` in which every error location holds the error's
/// description instead of its value.
///
/// Missing properties are inserted into their parent object. Several errors
/// at one location are joined with ` | `; errors below a location that is
/// already flagged are dropped because the ancestor already reports them.
#[must_use]
pub fn flag_mismatches(data: &Value, errors: &[ValidationError], styles: &IssueStyle) -> Value {
    let mut flagged = data.clone();
    let mut flagged_paths: Vec<&[String]> = Vec::new();

    for error in errors {
        let path = error.path_segments.as_slice();
        let below_flagged = flagged_paths
            .iter()
            .any(|flagged_path| flagged_path.len() < path.len() && path.starts_with(flagged_path));
        if below_flagged {
            continue;
        }

        let repeat = flagged_paths.contains(&path);
        if write_description(&mut flagged, path, error.description(styles), repeat) {
            flagged_paths.push(path);
        }
    }

    flagged
}

fn write_description(root: &mut Value, path: &[String], description: String, repeat: bool) -> bool {
    let Some((last, parents)) = path.split_last() else {
        place(root, description, repeat);
        return true;
    };

    let parent = parents.iter().try_fold(root, |value, segment| match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => array_index(segment).and_then(|index| items.get_mut(index)),
        _ => None,
    });

    match parent {
        Some(Value::Object(map)) => {
            match map.get_mut(last) {
                Some(slot) => place(slot, description, repeat),
                None => {
                    map.insert(last.clone(), Value::String(description));
                }
            }
            true
        }
        Some(Value::Array(items)) => {
            let Some(index) = array_index(last) else {
                return false;
            };
            if let Some(slot) = items.get_mut(index) {
                place(slot, description, repeat);
            } else {
                if index - items.len() > MAX_ARRAY_PADDING {
                    tracing::debug!(
                        index,
                        len = items.len(),
                        "array position too far past the end"
                    );
                    return false;
                }
                items.resize(index, Value::Null);
                items.push(Value::String(description));
            }
            true
        }
        _ => false,
    }
}

fn place(slot: &mut Value, description: String, repeat: bool) {
    match slot {
        Value::String(existing) if repeat => {
            existing.push_str(DESCRIPTION_SEPARATOR);
            existing.push_str(&description);
        }
        _ => *slot = Value::String(description),
    }
}
