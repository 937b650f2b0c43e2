//! Lookup orchestration
//!
//! A lookup runs query validation, search, candidate extraction and title
//! filtering, universe resolution, id dedup, the detail fetch and oldest
//! selection, stopping at the first step that fails.

use std::sync::Arc;

use indexmap::IndexSet;
use serde_json::Value;

use crate::details::fetch_details;
use crate::error::{LookupError, UpstreamError};
use crate::extract::{extract_candidates, Candidate};
use crate::resolve::resolve_universe_ids;
use crate::select::{select_oldest, OldestGame};
use crate::upstream::RobloxApi;

pub const MAX_QUERY_CHARS: usize = 40;
pub const SAMPLE_TITLE_LIMIT: usize = 15;
pub const DEBUG_PREVIEW_LIMIT: usize = 20;

/// Outcome of a search-only diagnostic run
#[derive(Debug, Clone)]
pub struct DebugReport {
    pub status: u16,
    pub search_url: String,
    /// Keys of the decoded document, `None` when it was not a JSON object
    pub top_level_keys: Option<Vec<String>>,
    pub preview: Vec<Candidate>,
}

/// Trim and bound a raw query
pub fn validate_query(raw: &str) -> Result<String, LookupError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(LookupError::QueryTooLong);
    }
    Ok(query.to_string())
}

/// Titles shown when nothing matched: the first few candidates, blanks dropped
fn sample_titles(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .take(SAMPLE_TITLE_LIMIT)
        .filter(|candidate| !candidate.name.is_empty())
        .map(|candidate| candidate.name.clone())
        .collect()
}

#[derive(Clone)]
pub struct OldestFinder {
    api: Arc<dyn RobloxApi>,
    resolve_concurrency: usize,
}

impl OldestFinder {
    pub fn new(api: Arc<dyn RobloxApi>, resolve_concurrency: usize) -> Self {
        Self {
            api,
            resolve_concurrency: resolve_concurrency.max(1),
        }
    }

    /// Find the oldest game whose title contains `raw_query`
    pub async fn find_oldest(&self, raw_query: &str) -> Result<OldestGame, LookupError> {
        let query = validate_query(raw_query)?;
        let keyword = query.to_lowercase();

        let page = self.api.search(&query).await.map_err(LookupError::Search)?;
        if !page.is_success() {
            return Err(LookupError::Search(UpstreamError::Status(page.status)));
        }

        let document = page.document.unwrap_or(Value::Null);
        let all = extract_candidates(&document);
        let mut matches: Vec<Candidate> = all
            .iter()
            .filter(|candidate| candidate.title_matches(&keyword))
            .cloned()
            .collect();
        log::debug!(
            "[Pipeline] '{}': {} candidates, {} matching titles",
            query,
            all.len(),
            matches.len()
        );

        if matches.is_empty() {
            return Err(LookupError::NoMatchingTitles {
                sample_titles: sample_titles(&all),
            });
        }

        let resolved =
            resolve_universe_ids(self.api.as_ref(), &mut matches, self.resolve_concurrency).await;
        log::debug!("[Pipeline] Resolved {} universe ids from place ids", resolved);

        let universe_ids: IndexSet<u64> = matches
            .iter()
            .filter_map(|candidate| candidate.universe_id)
            .collect();
        if universe_ids.is_empty() {
            return Err(LookupError::UnresolvedUniverses);
        }

        let universe_ids: Vec<u64> = universe_ids.into_iter().collect();
        let records = fetch_details(self.api.as_ref(), &universe_ids)
            .await
            .map_err(LookupError::GameInfo)?;
        if records.is_empty() {
            return Err(LookupError::NoGameInfo);
        }

        select_oldest(&records, &keyword).ok_or(LookupError::NotFound)
    }

    /// Run only the search step and report what came back
    pub async fn debug_search(&self, raw_query: &str) -> Result<DebugReport, LookupError> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Err(LookupError::MissingDebugQuery);
        }

        let page = self.api.search(query).await.map_err(LookupError::Search)?;

        let top_level_keys = page
            .document
            .as_ref()
            .and_then(Value::as_object)
            .map(|map| map.keys().cloned().collect());
        let preview = page
            .document
            .as_ref()
            .map(extract_candidates)
            .unwrap_or_default()
            .into_iter()
            .take(DEBUG_PREVIEW_LIMIT)
            .collect();

        Ok(DebugReport {
            status: page.status,
            search_url: page.url,
            top_level_keys,
            preview,
        })
    }
}
