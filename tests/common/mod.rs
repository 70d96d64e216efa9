//! Shared test helpers for integration tests.

use schemaview::check::{SchemaValidator, ValidatorFamily, ValidatorOutput, escape_html};
use serde_json::Value;

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Loads and parses a JSON fixture from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read or is not valid JSON.
pub fn load_json_fixture(name: &str) -> Value {
    serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("fixture {name} is not valid JSON: {e}"))
}

/// Validator that replays a fixed batch of raw error records.
#[derive(Debug, Clone)]
pub struct ReplayValidator {
    /// Family the records are shaped for.
    pub family: ValidatorFamily,
    /// Records reported for every body.
    pub errors: Vec<Value>,
}

impl ReplayValidator {
    /// Creates a validator that reports `errors` in the Ajv shape.
    pub fn ajv(errors: Vec<Value>) -> Self {
        Self {
            family: ValidatorFamily::Ajv,
            errors,
        }
    }

    /// Creates a validator that accepts every body.
    pub fn accepting() -> Self {
        Self::ajv(Vec::new())
    }
}

impl SchemaValidator for ReplayValidator {
    fn family(&self) -> ValidatorFamily {
        self.family
    }

    fn validate(&self, _data: &Value) -> ValidatorOutput {
        ValidatorOutput {
            errors: self.errors.clone(),
            data_mismatches: None,
        }
    }
}

/// Highlighter that wraps every JSON string literal in a string token, the
/// way a browser-side highlighter marks them up.
pub fn highlight_strings(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in json.chars() {
        if in_string {
            match c {
                '"' if !escaped => {
                    out.push_str("&quot;</span>");
                    in_string = false;
                }
                '\\' if !escaped => {
                    escaped = true;
                    out.push('\\');
                    continue;
                }
                other => out.push_str(&escape_html(&other.to_string())),
            }
            escaped = false;
        } else if c == '"' {
            out.push_str("<span class=\"hljs-string\">&quot;");
            in_string = true;
        } else {
            out.push_str(&escape_html(&c.to_string()));
        }
    }
    out
}

/// Builds `count` Ajv type errors at `/0`, `/1`, and so on.
pub fn type_errors(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            serde_json::json!({
                "instancePath": format!("/{i}"),
                "schemaPath": "#/items/type",
                "keyword": "type",
                "params": {"type": "string"},
                "message": "must be string"
            })
        })
        .collect()
}
