use indicatif::ProgressBar;
use std::thread;
use tracing::info;

use super::champion_stats::{MatchStatsTracker, MatchSummary, ParticipantStat};
use crate::api::client::RiotApiClient;
use crate::api::endpoints::clamp_match_count;
use crate::api::models::MatchDto;
use crate::error::AppError;

pub const DEFAULT_MATCH_COUNT: usize = 10;

/// Fetch the player's recent matches and reduce them to one summary.
pub fn aggregate(
    client: &RiotApiClient,
    puuid: &str,
    requested_count: usize,
    progress: &ProgressBar,
) -> Result<MatchSummary, AppError> {
    let count = clamp_match_count(requested_count);
    let match_ids = client.get_match_ids(puuid, count)?;
    info!(requested = requested_count, found = match_ids.len(), "fetched match ids");

    progress.set_length(match_ids.len() as u64);
    progress.set_message("Fetching match details");
    let matches = fetch_matches(client, &match_ids, progress)?;
    progress.finish_with_message("✓ Match data fetched");

    let mut tracker = MatchStatsTracker::new();
    for m in &matches {
        tracker.add_match(m.participant(puuid).map(ParticipantStat::from));
    }

    Ok(tracker.finish())
}

/// One scoped worker per match id. Every worker is joined before any result
/// is inspected; the first failure in id order fails the whole batch.
pub fn fetch_matches(
    client: &RiotApiClient,
    match_ids: &[String],
    progress: &ProgressBar,
) -> Result<Vec<MatchDto>, AppError> {
    let results: Vec<Result<MatchDto, AppError>> = thread::scope(|scope| {
        let handles: Vec<_> = match_ids
            .iter()
            .map(|id| {
                scope.spawn(move || {
                    let result = client.get_match(id);
                    progress.inc(1);
                    result
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(AppError::ApiError(
                        "match fetch worker panicked".to_string(),
                    ))
                })
            })
            .collect()
    });

    results.into_iter().collect()
}
