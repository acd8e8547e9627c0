//! # Rankings
//!
//! Podium of the players of a context by a chosen metric.

use std::collections::HashSet;

use error::{AppError, Result};
use stats::{clamp_limit, rank_players, RankingMetric, RosterEntry};

use super::Reply;
use crate::{
    context::resolve_context,
    dto::{query::RankingQuery, reports::RankingResponse},
    queries::{self, to_roster_entry, CacheTrace},
    AppState,
};

/// Rank the players of a context
///
/// Players who left the team but scored in the context are looked up so they keep
/// their names. Players without a single action are not ranked.
pub async fn rankings_handler(state: &AppState, query: &RankingQuery) -> Result<Reply<RankingResponse>> {
    let metric = match query.metric.as_deref() {
        Some(name) => {
            name.parse::<RankingMetric>()
                .map_err(|e| AppError::validation(e.to_string()))?
        },
        None => RankingMetric::default(),
    };
    let limit = clamp_limit(query.limit);

    let mut trace = CacheTrace::default();
    let context = resolve_context(state, &query.context(), &mut trace).await?;
    let rows = trace.track(queries::list_matches(state, context.team.id, context.season.id, context.phase_id()).await?);
    let match_ids: Vec<i32> = rows.iter().map(|(game, _)| game.id).collect();
    let actions = trace.track(queries::actions_for_matches(state, &match_ids).await?);

    let players = trace.track(queries::list_players(state, context.team.id).await?);
    let mut roster: Vec<RosterEntry> = players.iter().map(to_roster_entry).collect();
    let known: HashSet<i32> = roster.iter().map(|r| r.player_id).collect();
    let mut missing: Vec<i32> = actions
        .iter()
        .map(|a| a.player_id)
        .filter(|id| !known.contains(id))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    missing.sort_unstable();
    if !missing.is_empty() {
        let former = trace.track(queries::find_players(state, &missing).await?);
        roster.extend(former.iter().map(to_roster_entry));
    }

    let response = RankingResponse {
        context: context.to_info(),
        metric,
        limit,
        matches: rows.len(),
        entries: rank_players(&roster, &actions, metric, limit),
    };
    Ok(Reply::new(response, &trace))
}
