//! Ads stream (child of ad groups, hierarchy leaf)

use super::Stream;
use crate::config::TapConfig;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::Result;
use crate::schema::JsonSchema;
use crate::types::{ExtractionContext, JsonValue, PageToken, Record};
use serde_json::json;

const FIELD_NAMES: [&str; 6] = ["Id", "CampaignId", "AdGroupId", "State", "Status", "Type"];

const RECORDS_PATH: &str = "$.result.Ads[*]";

/// Ads scoped to one ad group
pub struct AdsStream;

impl Stream for AdsStream {
    fn name(&self) -> &'static str {
        "ads"
    }

    fn path(&self) -> &'static str {
        "/ads"
    }

    fn primary_keys(&self) -> &'static [&'static str] {
        &["Id"]
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::new()
            .with_title("ads")
            .integer("Id")
            .integer("CampaignId")
            .integer("AdGroupId")
            .string("State")
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
        let adgroup_id = context
            .get("adgroup_id")
            .expect("ads invoked without adgroup_id in context");

        json!({
            "method": "get",
            "params": {
                "SelectionCriteria": {
                    "AdGroupIds": [adgroup_id],
                },
                "FieldNames": FIELD_NAMES,
            }
        })
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Record>> {
        JsonDecoder::with_path(RECORDS_PATH).decode(body)
    }
}
