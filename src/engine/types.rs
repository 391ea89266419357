//! Engine types
//!
//! Output message types and configuration for the sync engine.

use crate::types::{JsonValue, Record};
use chrono::{DateTime, Utc};
use serde_json::json;

/// A message emitted during sync
///
/// Messages are serialized one per line on stdout, in emission order. A
/// stream's `Schema` message always precedes its first `Record`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Stream schema announcement
    Schema {
        /// Stream name
        stream: String,
        /// JSON schema document
        schema: JsonValue,
        /// Primary key fields
        key_properties: Vec<String>,
        /// Replication key, if the stream is incremental
        bookmark_property: Option<String>,
    },
    /// One extracted record
    Record {
        /// Stream name
        stream: String,
        /// The record data
        record: Record,
        /// When the record was extracted
        time_extracted: DateTime<Utc>,
    },
}

impl Message {
    /// Create a schema message
    pub fn schema(
        stream: impl Into<String>,
        schema: JsonValue,
        key_properties: Vec<String>,
        bookmark_property: Option<String>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties,
            bookmark_property,
        }
    }

    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Stream this message belongs to
    pub fn stream(&self) -> &str {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => stream,
        }
    }

    /// Serialize to the output wire shape
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Schema {
                stream,
                schema,
                key_properties,
                bookmark_property,
            } => {
                let mut out = json!({
                    "type": "SCHEMA",
                    "stream": stream,
                    "schema": schema,
                    "key_properties": key_properties,
                });
                if let Some(key) = bookmark_property {
                    out["bookmark_properties"] = json!([key]);
                }
                out
            }
            Self::Record {
                stream,
                record,
                time_extracted,
            } => json!({
                "type": "RECORD",
                "stream": stream,
                "record": record,
                "time_extracted": time_extracted.to_rfc3339(),
            }),
        }
    }
}

/// Configuration for sync operation
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum records to emit across all streams (0 = unlimited)
    pub max_records: usize,
    /// Abort the whole run on the first stream failure
    pub fail_fast: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_records: 0,
            fail_fast: true,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max records
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records emitted
    pub records_emitted: usize,
    /// Schemas emitted
    pub schemas_emitted: usize,
    /// Root streams fully synced
    pub streams_synced: usize,
    /// HTTP requests made
    pub requests_made: usize,
    /// Errors encountered
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record
    pub fn add_record(&mut self) {
        self.records_emitted += 1;
    }

    /// Add a schema
    pub fn add_schema(&mut self) {
        self.schemas_emitted += 1;
    }

    /// Add a completed stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add a request
    pub fn add_request(&mut self) {
        self.requests_made += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
