//! Ad groups stream (child of campaigns)

use super::{AdsStream, Stream};
use crate::config::TapConfig;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::schema::JsonSchema;
use crate::types::{ExtractionContext, JsonValue, PageToken, Record};
use serde_json::json;

const FIELD_NAMES: [&str; 5] = ["Id", "Name", "CampaignId", "Status", "Type"];

const RECORDS_PATH: &str = "$.result.AdGroups[*]";

/// Ad groups scoped to one campaign
pub struct AdGroupsStream;

impl Stream for AdGroupsStream {
    fn name(&self) -> &'static str {
        "ad_groups"
    }

    fn path(&self) -> &'static str {
        "/adgroups"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["Id"]
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::new()
            .with_title("ad_groups")
            .integer("Id")
            .string("Name")
            .integer("CampaignId")
            .string("Status")
            .string("Type")
            .required(&["Id"])
    }

    fn request_payload(
        &self,
        _config: &TapConfig,
        context: &ExtractionContext,
        _page: Option<&PageToken>,
    ) -> JsonValue {
        // A missing scoping key is a wiring defect in the hierarchy, not a
        // runtime condition: fail fast instead of silently dropping the filter.
        let campaign_id = context
            .get("campaign_id")
            .expect("ad_groups invoked without campaign_id in context");

        json!({
            "method": "get",
            "params": {
                "SelectionCriteria": {
                    "CampaignIds": [campaign_id],
                },
                "FieldNames": FIELD_NAMES,
            }
        })
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Record>> {
        JsonDecoder::with_path(RECORDS_PATH).decode(body)
    }

    fn child_streams(&self) -> Vec<Box<dyn Stream>> {
        vec![Box::new(AdsStream)]
    }

    fn child_context(&self, record: &Record) -> Option<ExtractionContext> {
        let id = record.get("Id").cloned().unwrap_or(JsonValue::Null);
        Some(ExtractionContext::empty().with_value("adgroup_id", id))
    }
}
