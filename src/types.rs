//! Common types used throughout tap-yandex-direct
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single extracted record: a flat mapping of field name to value
pub type Record = JsonObject;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Opaque pagination token threaded between one page's response and the
/// next page's request. Absent means "no more pages".
pub type PageToken = String;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    GET,
    #[default]
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Extraction Context
// ============================================================================

/// Scoping data passed from a parent stream's record to a child stream's
/// request (e.g. `{"campaign_id": 123}`).
///
/// Created once per parent record, consumed once by the child's request
/// builder, then discarded. Immutable after creation: the builder methods
/// consume `self`, and consumers only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionContext {
    values: BTreeMap<String, JsonValue>,
}

impl ExtractionContext {
    /// Create an empty context (used for root streams)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a value to the context
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    /// Check whether the context carries no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of keys in the context
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over key-value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.values.iter()
    }
}
