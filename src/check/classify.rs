//! Normalization of raw validator error records.
//!
//! Each validator family reports errors in its own shape. [`classify`]
//! folds them into [`ValidationError`] values that carry a path relative to
//! the data root, a [`ErrorKind`], the validator's message, and the
//! offending value rendered for display. Records that lack expected fields
//! degrade to a best-effort [`ErrorKind::Mismatch`] instead of aborting the
//! batch.

use serde_json::Value;

use super::data::{render_offending_value, resolve_path};
use super::style::IssueStyle;

/// Message that both families use for an absent required property.
const REQUIRED_MESSAGE: &str = "Required";

/// The schema validator that produced a batch of raw error records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorFamily {
    /// JSON Schema, Swagger and OpenAPI validation in the Ajv format.
    Ajv,
    /// Zod schemas; native issues or the Ajv-compatible shape.
    Zod,
}

/// Classification of a schema error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required property is absent.
    Missing,
    /// A value is present but does not satisfy the schema.
    Mismatch,
}

/// A schema error in validator-independent form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Location relative to the data root. For missing properties the last
    /// segment is the missing property itself.
    pub path_segments: Vec<String>,
    /// Missing property or mismatched value.
    pub kind: ErrorKind,
    /// Message reported by the validator.
    pub message: String,
    /// Name of the absent property when `kind` is [`ErrorKind::Missing`].
    pub missing_property: Option<String>,
    /// Offending value as compact JSON with `'` quotes, or `undefined`.
    pub offending_value: String,
    /// The validator's original record.
    pub raw_detail: Value,
}

impl ValidationError {
    /// Human-readable description prefixed with the icon for this kind.
    ///
    /// Missing properties read `❌ Missing property 'id'`; mismatches read
    /// `⚠️ 5 must be string`.
    #[must_use]
    pub fn description(&self, styles: &IssueStyle) -> String {
        match (self.kind, self.missing_property.as_deref()) {
            (ErrorKind::Missing, Some(name)) => {
                format!("{} Missing property '{name}'", styles.icon_property_missing)
            }
            _ => format!(
                "{} {} {}",
                styles.icon_property_error, self.offending_value, self.message
            ),
        }
    }

    /// Returns `true` for missing-property errors.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.kind == ErrorKind::Missing
    }
}

/// An ordered sequence of classified errors, in validator emission order.
pub type ClassifiedErrorSet = Vec<ValidationError>;

/// Classifies raw error records from `family` against the validated data.
///
/// The output preserves the input order exactly.
#[must_use]
pub fn classify(family: ValidatorFamily, raw_errors: &[Value], data: &Value) -> ClassifiedErrorSet {
    raw_errors
        .iter()
        .map(|record| classify_record(family, record, data))
        .collect()
}

fn classify_record(family: ValidatorFamily, record: &Value, data: &Value) -> ValidationError {
    let message = record_message(record);
    let (parent_path, native_missing) = record_location(family, record);

    if is_missing_record(family, record) {
        let missing = match native_missing {
            Some(name) => Some((parent_path.clone(), name)),
            None => str_field(record, &["params", "missingProperty"])
                .map(|name| (parent_path.clone(), name.to_owned())),
        };

        if let Some((mut path_segments, name)) = missing {
            path_segments.push(name.clone());
            return ValidationError {
                path_segments,
                kind: ErrorKind::Missing,
                message,
                missing_property: Some(name),
                offending_value: render_offending_value(None),
                raw_detail: record.clone(),
            };
        }

        tracing::debug!(?record, "required-property record without a property name");
    }

    // Native Zod paths already end at the offending value.
    let path_segments = native_path(record).unwrap_or(parent_path);
    let offending_value = render_offending_value(resolve_path(data, &path_segments));

    ValidationError {
        path_segments,
        kind: ErrorKind::Mismatch,
        message,
        missing_property: None,
        offending_value,
        raw_detail: record.clone(),
    }
}

/// Detects the family-specific "required property absent" discriminator.
fn is_missing_record(family: ValidatorFamily, record: &Value) -> bool {
    let keyword_required = str_field(record, &["keyword"]) == Some("required");
    let message_required = str_field(record, &["message"]) == Some(REQUIRED_MESSAGE);

    match family {
        ValidatorFamily::Ajv => keyword_required || message_required,
        ValidatorFamily::Zod => {
            let undefined_received = str_field(record, &["code"]) == Some("invalid_type")
                && str_field(record, &["received"]) == Some("undefined");
            keyword_required || message_required || undefined_received
        }
    }
}

/// Returns the parent path of the record and, for native Zod missing
/// issues, the missing property taken from the end of the path.
fn record_location(family: ValidatorFamily, record: &Value) -> (Vec<String>, Option<String>) {
    if family == ValidatorFamily::Zod {
        if let Some(mut path) = native_path(record) {
            if is_missing_record(family, record) {
                let name = path.pop();
                return (path, name);
            }
            return (path, None);
        }
    }

    let path = str_field(record, &["instancePath"])
        .map(pointer_segments)
        .unwrap_or_default();
    (path, None)
}

/// Path array of a native Zod issue.
fn native_path(record: &Value) -> Option<Vec<String>> {
    if record.get("instancePath").is_some() {
        return None;
    }
    let items = record.get("path")?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Splits a JSON pointer such as `/items/0/name` into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

fn record_message(record: &Value) -> String {
    str_field(record, &["message"])
        .or_else(|| str_field(record, &["keyword"]))
        .unwrap_or_default()
        .to_owned()
}

fn str_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .try_fold(record, |value, key| value.get(*key))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn ajv_type_error_resolves_offending_value() {
        let data = json!({"name": 5});
        let raw = [json!({
            "instancePath": "/name",
            "keyword": "type",
            "message": "must be string",
            "params": {"type": "string"}
        })];

        let errors = classify(ValidatorFamily::Ajv, &raw, &data);

        assert_eq!(errors.len(), 1);
        let Some(error) = errors.first() else {
            panic!("one error expected");
        };
        assert_eq!(error.path_segments, vec!["name"]);
        assert_eq!(error.kind, ErrorKind::Mismatch);
        assert_eq!(error.offending_value, "5");
        assert_eq!(
            error.description(&IssueStyle::default()),
            "⚠️ 5 must be string"
        );
    }

    #[rstest]
    fn ajv_required_at_root_appends_property() {
        let raw = [json!({
            "instancePath": "",
            "keyword": "required",
            "message": "must have required property 'id'",
            "params": {"missingProperty": "id"}
        })];

        let errors = classify(ValidatorFamily::Ajv, &raw, &json!({}));

        let Some(error) = errors.first() else {
            panic!("one error expected");
        };
        assert_eq!(error.kind, ErrorKind::Missing);
        assert_eq!(error.path_segments, vec!["id"]);
        assert_eq!(error.missing_property.as_deref(), Some("id"));
        assert_eq!(
            error.description(&IssueStyle::default()),
            "❌ Missing property 'id'"
        );
    }

    #[rstest]
    fn nested_required_keeps_parent_path() {
        let raw = [json!({
            "instancePath": "/user",
            "keyword": "required",
            "message": "must have required property 'age'",
            "params": {"missingProperty": "age"}
        })];

        let errors = classify(ValidatorFamily::Ajv, &raw, &json!({"user": {}}));

        assert_eq!(
            errors.first().map(|e| e.path_segments.clone()),
            Some(vec!["user".to_owned(), "age".to_owned()])
        );
    }

    #[rstest]
    fn absent_value_renders_undefined_literal() {
        let raw = [json!({
            "instancePath": "/items/4",
            "keyword": "type",
            "message": "must be object"
        })];

        let errors = classify(ValidatorFamily::Ajv, &raw, &json!({"items": [1]}));

        assert_eq!(
            errors.first().map(|e| e.offending_value.as_str()),
            Some("undefined")
        );
    }

    #[rstest]
    fn string_values_are_single_quoted() {
        let raw = [json!({"instancePath": "/tags/1", "message": "must be integer"})];

        let errors = classify(ValidatorFamily::Ajv, &raw, &json!({"tags": [1, "two"]}));

        assert_eq!(
            errors.first().map(|e| e.offending_value.as_str()),
            Some("'two'")
        );
    }

    #[rstest]
    fn pointer_escapes_are_decoded() {
        assert_eq!(pointer_segments("/a~1b/c~0d"), vec!["a/b", "c~d"]);
        assert!(pointer_segments("").is_empty());
        assert!(pointer_segments("/").is_empty());
    }

    #[rstest]
    fn zod_native_missing_issue_uses_last_path_element() {
        let raw = [json!({
            "code": "invalid_type",
            "expected": "string",
            "received": "undefined",
            "path": ["address"],
            "message": "Required"
        })];

        let errors = classify(ValidatorFamily::Zod, &raw, &json!({"id": 1}));

        let Some(error) = errors.first() else {
            panic!("one error expected");
        };
        assert_eq!(error.kind, ErrorKind::Missing);
        assert_eq!(error.path_segments, vec!["address"]);
        assert_eq!(error.missing_property.as_deref(), Some("address"));
    }

    #[rstest]
    fn zod_native_mismatch_keeps_numeric_segments() {
        let raw = [json!({
            "code": "invalid_type",
            "expected": "number",
            "received": "string",
            "path": ["items", 1, "id"],
            "message": "Expected number, received string"
        })];
        let data = json!({"items": [{"id": 1}, {"id": "x"}]});

        let errors = classify(ValidatorFamily::Zod, &raw, &data);

        let Some(error) = errors.first() else {
            panic!("one error expected");
        };
        assert_eq!(error.path_segments, vec!["items", "1", "id"]);
        assert_eq!(error.offending_value, "'x'");
    }

    #[rstest]
    #[case::not_an_object(json!("boom"), "")]
    #[case::no_locator(json!({"message": "must be object"}), "must be object")]
    #[case::required_without_name(json!({"keyword": "required", "instancePath": ""}), "required")]
    fn malformed_records_degrade_to_mismatch(#[case] record: Value, #[case] message: &str) {
        let errors = classify(ValidatorFamily::Ajv, &[record], &json!({}));

        let Some(error) = errors.first() else {
            panic!("one error expected");
        };
        assert_eq!(error.kind, ErrorKind::Mismatch);
        assert_eq!(error.message, message);
    }

    #[rstest]
    fn emission_order_is_preserved() {
        let raw = [
            json!({"instancePath": "/b", "message": "second-key"}),
            json!({"instancePath": "/a", "message": "first-key"}),
        ];

        let errors = classify(ValidatorFamily::Ajv, &raw, &json!({"a": 1, "b": 2}));

        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second-key", "first-key"]);
    }
}
