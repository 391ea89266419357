//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use crate::types::{JsonValue, Record};
use serde::{Deserialize, Serialize};

/// Format of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Tab-separated values with a header row (report responses)
    Tsv,
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Record>>;

    /// Decode the response body into a single JSON value (full response)
    fn decode_raw(&self, body: &str) -> Result<JsonValue>;
}
