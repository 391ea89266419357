//! Stream definitions
//!
//! Each vendor endpoint is one stream: a static definition of its URL path,
//! primary keys, schema, request payload, and response parsing, plus the
//! parent/child wiring that scopes child requests to one parent record.
//!
//! Hierarchy:
//!
//! ```text
//! campaigns ─→ ad_groups ─→ ads
//! ad_performance  (report endpoint, no parent)
//! ```

mod ad_groups;
mod ad_performance;
mod ads;
mod campaigns;

pub use ad_groups::AdGroupsStream;
pub use ad_performance::AdPerformanceStream;
pub use ads::AdsStream;
pub use campaigns::CampaignsStream;

use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use crate::pagination::{Paginator, SinglePage};
use crate::schema::JsonSchema;
use crate::types::{ExtractionContext, JsonValue, Method, PageToken, Record, StringMap};

// ============================================================================
// Stream Trait
// ============================================================================

/// One extractable vendor resource
///
/// Implementations are stateless definitions; all per-run state (contexts,
/// page tokens) is threaded through the method arguments by the engine.
pub trait Stream: Send + Sync {
    /// Stream name as emitted downstream
    fn name(&self) -> &'static str;

    /// URL path relative to the API base URL
    fn path(&self) -> &'static str;

    /// HTTP method (the vendor API is POST-body everywhere)
    fn method(&self) -> Method {
        Method::POST
    }

    /// Primary key fields; every emitted record must carry them non-null
    fn primary_keys(&self) -> &'static [&'static str];

    /// Replication key for incremental extraction, if any
    fn replication_key(&self) -> Option<&'static str> {
        None
    }

    /// JSON schema of this stream's records
    fn schema(&self) -> JsonSchema;

    /// Request headers beyond the defaults
    fn http_headers(&self, config: &TapConfig) -> StringMap {
        let mut headers = StringMap::new();
        if let Some(ref agent) = config.user_agent {
            headers.insert("User-Agent".to_string(), agent.clone());
        }
        headers
    }

    /// Build the JSON request payload for one page
    fn request_payload(
        &self,
        config: &TapConfig,
        context: &ExtractionContext,
        page: Option<&PageToken>,
    ) -> JsonValue;

    /// Parse a validated response body into records
    fn parse_response(&self, body: &str) -> Result<Vec<Record>>;

    /// Paginator deciding whether another page must be fetched
    fn paginator(&self) -> Box<dyn Paginator> {
        Box::new(SinglePage)
    }

    /// Classify the response before parsing
    ///
    /// The vendor reports fatal errors in a 400 body (and sometimes inside a
    /// 2xx body), and signals offline report generation with 201/202. Decode
    /// failures on a 2xx pass through so non-JSON bodies reach the parser.
    fn validate_response(&self, response: &ApiResponse) -> Result<()> {
        if response.status == 400 {
            return Err(Error::fatal_api(vendor_error_message(response)));
        }

        if response.status == 201 || response.status == 202 {
            return Err(Error::report_pending(
                "The report is being generated in offline mode",
            ));
        }

        if !response.is_success() {
            return Err(Error::http_status(response.status, response.body.clone()));
        }

        if let Some(body) = response.json() {
            if let Some(error) = body.get("error") {
                let detail = error
                    .get("error_detail")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                return Err(Error::fatal_api(detail.to_string()));
            }
        }

        Ok(())
    }

    /// Adjust a record before emission; `None` drops the record
    fn post_process(&self, record: Record, _context: &ExtractionContext) -> Option<Record> {
        Some(record)
    }

    /// Streams scoped by this stream's records
    fn child_streams(&self) -> Vec<Box<dyn Stream>> {
        Vec::new()
    }

    /// Derive the child scoping context from one parent record
    ///
    /// Called exactly once per parent record. Returns `None` for leaf streams.
    fn child_context(&self, _record: &Record) -> Option<ExtractionContext> {
        None
    }
}

/// Build the vendor's fatal error message from a 400 response body
fn vendor_error_message(response: &ApiResponse) -> String {
    match response.json() {
        Some(body) => {
            let error = body.get("error").cloned().unwrap_or(JsonValue::Null);
            let error_string = error
                .get("error_string")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let error_detail = error
                .get("error_detail")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            format!("Error message found: {error_string} {error_detail}")
        }
        None => format!("Error message found: {}", response.body),
    }
}

// ============================================================================
// Registry
// ============================================================================

/// All stream definitions, in declaration order
pub fn all_streams() -> Vec<Box<dyn Stream>> {
    vec![
        Box::new(CampaignsStream),
        Box::new(AdGroupsStream),
        Box::new(AdsStream),
        Box::new(AdPerformanceStream),
    ]
}

/// Streams with no parent; each is invoked once per run with empty context
pub fn root_streams() -> Vec<Box<dyn Stream>> {
    vec![Box::new(CampaignsStream), Box::new(AdPerformanceStream)]
}

/// Look up a stream definition by name
pub fn stream_by_name(name: &str) -> Result<Box<dyn Stream>> {
    all_streams()
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| Error::StreamNotFound {
            stream: name.to_string(),
        })
}
