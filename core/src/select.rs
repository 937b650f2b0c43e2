use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::details::DetailRecord;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The winning record of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OldestGame {
    pub place_id: u64,
    pub name: String,
    pub creator: String,
    /// Creation timestamp exactly as the upstream reported it
    pub created: String,
}

/// Parse an upstream creation timestamp. Offset-less values are taken as UTC.
pub fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Pick the earliest-created record whose title contains `keyword`.
///
/// Records without a parsable timestamp or a root place are ignored.
/// Equal timestamps resolve to the first record in input order.
pub fn select_oldest(records: &[DetailRecord], keyword: &str) -> Option<OldestGame> {
    let keyword = keyword.to_lowercase();
    let mut oldest: Option<(DateTime<Utc>, &DetailRecord, u64)> = None;

    for record in records {
        if record.name.is_empty() || !record.name.to_lowercase().contains(&keyword) {
            continue;
        }
        let Some(created_at) = parse_created(&record.created) else {
            continue;
        };
        let Some(place_id) = record.root_place_id else {
            continue;
        };

        let is_older = match &oldest {
            Some((current, _, _)) => created_at < *current,
            None => true,
        };
        if is_older {
            oldest = Some((created_at, record, place_id));
        }
    }

    oldest.map(|(_, record, place_id)| OldestGame {
        place_id,
        name: record.name.clone(),
        creator: record.creator_name.clone(),
        created: record.created.clone(),
    })
}
