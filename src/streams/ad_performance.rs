//! Ad performance report stream
//!
//! Unlike the entity endpoints this one hits the reports service, which
//! returns tab-separated text instead of JSON. A 201/202 status means the
//! report is still being generated offline and the request must be retried.

use super::Stream;
use crate::config::TapConfig;
use crate::decode::{RecordDecoder, TsvDecoder};
use crate::error::Result;
use crate::schema::JsonSchema;
use crate::types::{ExtractionContext, JsonValue, PageToken, Record, StringMap};
use serde_json::json;

const FIELD_NAMES: [&str; 6] = [
    "Date",
    "AdId",
    "CampaignId",
    "Impressions",
    "Clicks",
    "Cost",
];

/// Per-ad daily performance metrics
pub struct AdPerformanceStream;

impl Stream for AdPerformanceStream {
    fn name(&self) -> &'static str {
        "ad_performance"
    }

    fn path(&self) -> &'static str {
        "/reports"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["Date", "AdId"]
    }

    fn replication_key(&self) -> Option<&'static str> {
        Some("Date")
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::new()
            .with_title("ad_performance")
            .date("Date")
            .integer("AdId")
            .integer("CampaignId")
            .integer("Impressions")
            .integer("Clicks")
            .number("Cost")
            .required(&["Date", "AdId"])
    }

    fn http_headers(&self, config: &TapConfig) -> StringMap {
        let mut headers = StringMap::new();
        if let Some(ref agent) = config.user_agent {
            headers.insert("User-Agent".to_string(), agent.clone());
        }
        // Strip the report title and totals rows so the body is pure
        // header + data; "auto" lets the vendor pick online vs offline mode.
        headers.insert("skipReportHeader".to_string(), "true".to_string());
        headers.insert("skipReportSummary".to_string(), "true".to_string());
        headers.insert("processingMode".to_string(), "auto".to_string());
        headers
    }

    fn request_payload(
        &self,
        config: &TapConfig,
        _context: &ExtractionContext,
        _page: Option<&PageToken>,
    ) -> JsonValue {
        json!({
            "params": {
                "SelectionCriteria": {
                    "DateFrom": config.start_date.to_string(),
                    "DateTo": config.end_date.to_string(),
                },
                "FieldNames": FIELD_NAMES,
                "OrderBy": [{"Field": "Date"}],
                "ReportName": format!(
                    "ad_performance_{}_{}",
                    config.start_date, config.end_date
                ),
                "ReportType": "AD_PERFORMANCE_REPORT",
                "DateRangeType": "CUSTOM_DATE",
                "Format": "TSV",
                "IncludeVAT": "NO",
                "IncludeDiscount": "NO",
            }
        })
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Record>> {
        TsvDecoder::new().decode(body)
    }
}
