//! # Match Comparison
//!
//! Aligns two match aggregates by action kind. Deltas read as `match_a - match_b`.

use error::Result;
use stats::{aggregate_match, compare_matches, MatchAggregate};

use super::Reply;
use crate::{
    dto::{catalog::MatchItem, query::CompareQuery, reports::ComparisonResponse},
    queries::{self, CacheTrace},
    AppState,
};

async fn load(state: &AppState, match_id: i32, trace: &mut CacheTrace) -> Result<(MatchItem, MatchAggregate)> {
    let row = trace.track(queries::find_match(state, match_id).await?);
    let (game, phase) = row.as_ref();
    let roster = trace.track(queries::match_roster(state, game).await?);
    let actions = trace.track(queries::match_actions(state, game.id).await?);
    Ok((MatchItem::new(game, phase.as_ref()), aggregate_match(game.id, &roster, &actions)))
}

/// Compare two matches
///
/// Both matches must exist. Comparing a match with itself is allowed and yields zero deltas.
pub async fn compare_handler(state: &AppState, query: &CompareQuery) -> Result<Reply<ComparisonResponse>> {
    let mut trace = CacheTrace::default();
    let (match_a, aggregate_a) = load(state, query.match_a, &mut trace).await?;
    let (match_b, aggregate_b) = load(state, query.match_b, &mut trace).await?;

    let response = ComparisonResponse {
        match_a,
        match_b,
        comparison: compare_matches(&aggregate_a, &aggregate_b),
    };
    Ok(Reply::new(response, &trace))
}
