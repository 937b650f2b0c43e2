use futures::stream::{self, StreamExt};

use crate::extract::Candidate;
use crate::upstream::RobloxApi;

/// Fill in missing universe ids from place ids, best-effort.
///
/// Lookups run concurrently, at most `concurrency` at a time. A failed
/// lookup leaves its candidate unresolved without affecting the others.
/// Returns the number of candidates newly resolved.
pub async fn resolve_universe_ids(
    api: &dyn RobloxApi,
    candidates: &mut [Candidate],
    concurrency: usize,
) -> usize {
    let pending: Vec<(usize, u64)> = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.universe_id.is_none())
        .filter_map(|(index, candidate)| candidate.place_id.map(|place_id| (index, place_id)))
        .collect();

    if pending.is_empty() {
        return 0;
    }

    let results: Vec<(usize, Option<u64>)> = stream::iter(pending)
        .map(|(index, place_id)| async move {
            match api.universe_for_place(place_id).await {
                Ok(universe_id) => (index, Some(universe_id)),
                Err(e) => {
                    log::debug!(
                        "[Resolver] Universe lookup failed for place {}: {}",
                        place_id,
                        e
                    );
                    (index, None)
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut resolved = 0;
    for (index, universe_id) in results {
        if let Some(universe_id) = universe_id {
            candidates[index].universe_id = Some(universe_id);
            resolved += 1;
        }
    }
    resolved
}
