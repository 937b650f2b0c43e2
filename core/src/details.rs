use indexmap::IndexSet;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::fields::{as_id, first_text, FieldPath};
use crate::upstream::RobloxApi;

pub const UNKNOWN_CREATOR: &str = "Unknown";

const CREATED_PATHS: &[FieldPath] = &[
    FieldPath::top(&["created"]),
    FieldPath::top(&["createdAt"]),
    FieldPath::top(&["createDate"]),
];

const CREATOR_PATHS: &[FieldPath] = &[FieldPath::nested(&["creator", "name"])];

/// One game entry from the batch detail API, decoded leniently.
///
/// Every batch entry yields a record, even a non-object one (which comes out
/// blank). Validation of the timestamp and root place happens at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub name: String,
    /// Creation time as sent by the upstream, possibly empty
    pub created: String,
    pub root_place_id: Option<u64>,
    pub creator_name: String,
}

impl DetailRecord {
    pub fn from_value(raw: &Value) -> Self {
        let creator_name = first_text(raw, CREATOR_PATHS);
        Self {
            name: first_text(raw, &[FieldPath::top(&["name"])]),
            created: first_text(raw, CREATED_PATHS),
            root_place_id: raw.get("rootPlaceId").and_then(as_id),
            creator_name: if creator_name.is_empty() {
                UNKNOWN_CREATOR.to_string()
            } else {
                creator_name
            },
        }
    }
}

/// Fetch detail records for `universe_ids` in one batched request.
///
/// Each id is sent once, in first-seen order.
pub async fn fetch_details(
    api: &dyn RobloxApi,
    universe_ids: &[u64],
) -> Result<Vec<DetailRecord>, UpstreamError> {
    let unique: Vec<u64> = universe_ids
        .iter()
        .copied()
        .collect::<IndexSet<u64>>()
        .into_iter()
        .collect();

    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let games = api.game_details(&unique).await?;
    Ok(games.iter().map(DetailRecord::from_value).collect())
}
