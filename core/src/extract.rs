//! Candidate extraction from omni-search documents

use serde::Serialize;
use serde_json::Value;

use crate::fields::{first_id, first_text, FieldPath};

/// Upper bound on candidates pulled from one search document
pub const MAX_CANDIDATES: usize = 200;

/// Top-level arrays holding result-like objects
const TOP_LEVEL_CONTAINERS: &[&str] = &["searchResults", "results", "data", "items"];

/// Grouping wrapper array whose entries may hold further result arrays
const GROUP_CONTAINER: &str = "searchResults";

/// Arrays searched inside each grouping wrapper entry
const NESTED_CONTAINERS: &[&str] = &["contents", "results", "items"];

const NAME_PATHS: &[FieldPath] = &[
    FieldPath::top(&["name"]),
    FieldPath::top(&["title"]),
    FieldPath::top(&["displayName"]),
    FieldPath::top(&["contentName"]),
    FieldPath::nested(&["content", "name"]),
    FieldPath::nested(&["content", "title"]),
];

const PLACE_ID_PATHS: &[FieldPath] = &[
    FieldPath::top(&["placeId"]),
    FieldPath::top(&["rootPlaceId"]),
    FieldPath::top(&["contentId"]),
    FieldPath::top(&["id"]),
    FieldPath::nested(&["content", "placeId"]),
    FieldPath::nested(&["content", "rootPlaceId"]),
    FieldPath::nested(&["content", "id"]),
];

const UNIVERSE_ID_PATHS: &[FieldPath] = &[
    FieldPath::top(&["universeId"]),
    FieldPath::nested(&["content", "universeId"]),
    FieldPath::nested(&["universe", "id"]),
];

/// A normalized search hit, prior to detail resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub place_id: Option<u64>,
    pub universe_id: Option<u64>,
}

impl Candidate {
    /// Normalize one raw result object. Returns `None` when it carries
    /// neither a title nor an identifier.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let candidate = Candidate {
            name: first_text(raw, NAME_PATHS),
            place_id: first_id(raw, PLACE_ID_PATHS),
            universe_id: first_id(raw, UNIVERSE_ID_PATHS),
        };
        if candidate.name.is_empty()
            && candidate.place_id.is_none()
            && candidate.universe_id.is_none()
        {
            return None;
        }
        Some(candidate)
    }

    /// Case-insensitive title match against an already lower-cased keyword
    pub fn title_matches(&self, keyword_lower: &str) -> bool {
        !self.name.is_empty() && self.name.to_lowercase().contains(keyword_lower)
    }
}

/// Every array of raw result objects found in `document`, in lookup order
fn containers(document: &Value) -> Vec<&Vec<Value>> {
    let mut found: Vec<&Vec<Value>> = TOP_LEVEL_CONTAINERS
        .iter()
        .filter_map(|key| document.get(*key).and_then(Value::as_array))
        .collect();

    if let Some(groups) = document.get(GROUP_CONTAINER).and_then(Value::as_array) {
        for group in groups {
            found.extend(
                NESTED_CONTAINERS
                    .iter()
                    .filter_map(|key| group.get(*key).and_then(Value::as_array)),
            );
        }
    }

    found
}

/// Extract up to [`MAX_CANDIDATES`] candidates from a search document.
///
/// Order follows the document; duplicates across containers are kept.
pub fn extract_candidates(document: &Value) -> Vec<Candidate> {
    containers(document)
        .into_iter()
        .flatten()
        .filter_map(Candidate::from_value)
        .take(MAX_CANDIDATES)
        .collect()
}
