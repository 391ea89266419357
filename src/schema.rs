//! Stream schema types
//!
//! JSON Schema documents describing each stream's record shape. Schemas are
//! declared statically per stream and emitted ahead of the first record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

/// JSON type can be a single type or array of types (for nullable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    /// Create a single type
    pub fn single(t: JsonType) -> Self {
        JsonTypeOrArray::Single(t)
    }

    /// Create a nullable type
    pub fn nullable(t: JsonType) -> Self {
        if t == JsonType::Null {
            JsonTypeOrArray::Single(JsonType::Null)
        } else {
            JsonTypeOrArray::Multiple(vec![t, JsonType::Null])
        }
    }

    /// Check if this type is nullable
    pub fn is_nullable(&self) -> bool {
        match self {
            JsonTypeOrArray::Single(JsonType::Null) => true,
            JsonTypeOrArray::Multiple(types) => types.contains(&JsonType::Null),
            _ => false,
        }
    }
}

/// JSON Schema property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Property type(s)
    #[serde(rename = "type")]
    pub json_type: JsonTypeOrArray,

    /// Format hint (e.g., "date", "date-time")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SchemaProperty {
    /// Create a new property with the given type
    pub fn new(json_type: JsonType) -> Self {
        Self {
            json_type: JsonTypeOrArray::single(json_type),
            format: None,
        }
    }

    /// Create a nullable property
    pub fn nullable(json_type: JsonType) -> Self {
        Self {
            json_type: JsonTypeOrArray::nullable(json_type),
            format: None,
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Check if nullable
    pub fn is_nullable(&self) -> bool {
        self.json_type.is_nullable()
    }
}

/// Full JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema version
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Schema type (always "object" for top-level)
    #[serde(rename = "type")]
    pub json_type: JsonType,

    /// Schema title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Object properties
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,

    /// Required properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Allow additional properties
    #[serde(rename = "additionalProperties", default = "default_true")]
    pub additional_properties: bool,
}

fn default_true() -> bool {
    true
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self {
            schema: Some("http://json-schema.org/draft-07/schema#".to_string()),
            json_type: JsonType::Object,
            title: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: true,
        }
    }

    /// Set the schema title
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a property
    #[must_use]
    pub fn property(mut self, name: &str, property: SchemaProperty) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    /// Add a string property
    #[must_use]
    pub fn string(self, name: &str) -> Self {
        self.property(name, SchemaProperty::nullable(JsonType::String))
    }

    /// Add an integer property
    #[must_use]
    pub fn integer(self, name: &str) -> Self {
        self.property(name, SchemaProperty::nullable(JsonType::Integer))
    }

    /// Add a number property
    #[must_use]
    pub fn number(self, name: &str) -> Self {
        self.property(name, SchemaProperty::nullable(JsonType::Number))
    }

    /// Add a date-formatted string property
    #[must_use]
    pub fn date(self, name: &str) -> Self {
        self.property(
            name,
            SchemaProperty::nullable(JsonType::String).with_format("date"),
        )
    }

    /// Mark properties as required
    #[must_use]
    pub fn required(mut self, names: &[&str]) -> Self {
        for name in names {
            if !self.required.contains(&(*name).to_string()) {
                self.required.push((*name).to_string());
            }
        }
        self
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
