//! Campaigns stream (hierarchy root)

use super::{AdGroupsStream, Stream};
use crate::config::TapConfig;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::schema::JsonSchema;
use crate::types::{ExtractionContext, JsonValue, PageToken, Record};
use serde_json::json;

const FIELD_NAMES: [&str; 6] = ["Id", "Name", "State", "Status", "StartDate", "Type"];

const RECORDS_PATH: &str = "$.result.Campaigns[*]";

/// Top-level campaigns list
pub struct CampaignsStream;

impl Stream for CampaignsStream {
    fn name(&self) -> &'static str {
        "campaigns"
    }

    fn path(&self) -> &'static str {
        "/campaigns"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["Id"]
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::new()
            .with_title("campaigns")
            .integer("Id")
            .string("Name")
            .string("State")
            .string("Status")
            .date("StartDate")
            .string("Type")
            .required(&["Id"])
    }

    fn request_payload(
        &self,
        _config: &TapConfig,
        _context: &ExtractionContext,
        _page: Option<&PageToken>,
    ) -> JsonValue {
        json!({
            "method": "get",
            "params": {
                "SelectionCriteria": {},
                "FieldNames": FIELD_NAMES,
            }
        })
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Record>> {
        JsonDecoder::with_path(RECORDS_PATH).decode(body)
    }

    fn child_streams(&self) -> Vec<Box<dyn Stream>> {
        vec![Box::new(AdGroupsStream)]
    }

    fn child_context(&self, record: &Record) -> Option<ExtractionContext> {
        let id = record.get("Id").cloned().unwrap_or(JsonValue::Null);
        Some(ExtractionContext::empty().with_value("campaign_id", id))
    }
}
