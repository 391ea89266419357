//! Decoder implementations
//!
//! Each decoder handles one vendor response format: JSON bodies with a
//! records path for the entity list endpoints, and tab-separated report
//! bodies for the reports endpoint.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use serde_json::{Map, Value};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with record path extraction
///
/// The record path is a JSONPath-like selector identifying the record array
/// inside the response document, e.g. `$.result.Campaigns[*]`.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// JSONPath to extract records
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder without a record path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract record values from a JSON document using the record path
    fn extract_values(&self, value: &Value) -> Result<Vec<Value>> {
        match &self.record_path {
            Some(path) => {
                // Wildcard selectors go through jsonpath-rust; plain
                // dot-notation paths are resolved inline.
                if path.contains('*') {
                    extract_with_jsonpath(value, path)
                } else {
                    match extract_simple_path(value, path) {
                        Some(Value::Array(arr)) => Ok(arr),
                        Some(Value::Null) | None => Ok(vec![]),
                        Some(v) => Ok(vec![v]),
                    }
                }
            }
            None => match value {
                Value::Array(arr) => Ok(arr.clone()),
                _ => Ok(vec![value.clone()]),
            },
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        let values = self.extract_values(&value)?;
        values
            .into_iter()
            .map(|v| match v {
                Value::Object(obj) => Ok(obj),
                other => Err(Error::record_extraction(
                    self.record_path.as_deref().unwrap_or("$"),
                    format!("expected object record, got {other}"),
                )),
            })
            .collect()
    }

    fn decode_raw(&self, body: &str) -> Result<JsonValue> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }
}

// ============================================================================
// TSV Decoder
// ============================================================================

/// Tab-separated values decoder for report responses
///
/// The first line is the header row; each following line becomes one record
/// mapping header name to value, preserving row order. A header-only body
/// (zero data rows) decodes to an empty Vec, not an error. The vendor's TSV
/// is unquoted, so fields are split on tabs directly.
#[derive(Debug, Clone, Default)]
pub struct TsvDecoder;

impl TsvDecoder {
    /// Create a new TSV decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for TsvDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut lines = body.lines().map(|l| l.trim_end_matches('\r'));

        let Some(header_line) = lines.next() else {
            return Ok(records);
        };
        let headers: Vec<&str> = header_line.split('\t').collect();

        for line in lines {
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let mut obj = Map::new();

            for (i, header) in headers.iter().enumerate() {
                let value = fields.get(i).copied().unwrap_or_default();
                obj.insert((*header).to_string(), coerce_scalar(value));
            }

            records.push(obj);
        }

        Ok(records)
    }

    fn decode_raw(&self, body: &str) -> Result<JsonValue> {
        let records = self.decode(body)?;
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }
}

/// Coerce a TSV field into a typed JSON scalar
fn coerce_scalar(value: &str) -> Value {
    if value.is_empty() || value == "--" {
        // The vendor prints "--" for metrics with no data
        return Value::Null;
    }

    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    Value::String(value.to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract a value using simple dot-notation path (e.g. `$.result.Campaigns`)
fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }

    Some(current.clone())
}

/// Extract records using jsonpath-rust (wildcard selectors)
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::record_extraction(
        path,
        format!("invalid JSONPath: {e}"),
    ))?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
