//! # Quick Summary
//!
//! Match counts for the home page of a context.

use error::Result;

use super::Reply;
use crate::{
    context::resolve_context,
    dto::{catalog::MatchItem, query::ContextQuery, reports::SummaryResponse},
    queries::{self, CacheTrace},
    AppState,
};

/// Summarize the matches of a context
pub async fn summary_handler(state: &AppState, query: &ContextQuery) -> Result<Reply<SummaryResponse>> {
    let mut trace = CacheTrace::default();
    let context = resolve_context(state, query, &mut trace).await?;
    let rows = trace.track(queries::list_matches(state, context.team.id, context.season.id, context.phase_id()).await?);

    let home_matches = rows.iter().filter(|(game, _)| game.home).count();
    let played = rows
        .iter()
        .filter(|(game, _)| {
            game.result
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty())
        })
        .count();

    let summary = SummaryResponse {
        context: context.to_info(),
        matches: rows.len(),
        home_matches,
        away_matches: rows.len() - home_matches,
        played,
        last_match: rows
            .first()
            .map(|(game, phase)| MatchItem::new(game, phase.as_ref())),
    };
    Ok(Reply::new(summary, &trace))
}
