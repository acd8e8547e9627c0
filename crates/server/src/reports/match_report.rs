//! # Match Report
//!
//! Full aggregation of one match plus its top scorers.

use error::Result;
use stats::{aggregate_match, rank_players, ranking::DEFAULT_LIMIT, RankingMetric};
use tracing::debug;

use super::Reply;
use crate::{
    dto::{catalog::MatchItem, reports::MatchReport},
    queries::{self, CacheTrace},
    AppState,
};

/// Build the report of a match
///
/// A match without scouted actions is reported with every roster player at zero.
pub async fn match_report_handler(state: &AppState, match_id: i32) -> Result<Reply<MatchReport>> {
    let mut trace = CacheTrace::default();
    let row = trace.track(queries::find_match(state, match_id).await?);
    let (game, phase) = row.as_ref();
    let roster = trace.track(queries::match_roster(state, game).await?);
    let actions = trace.track(queries::match_actions(state, game.id).await?);

    let aggregate = aggregate_match(game.id, &roster, &actions);
    let top_scorers = rank_players(&roster, &actions, RankingMetric::Points, DEFAULT_LIMIT as usize);
    debug!(match_id = game.id, actions = actions.len(), "Match report built");

    let report = MatchReport {
        game: MatchItem::new(game, phase.as_ref()),
        has_data: !actions.is_empty(),
        aggregate,
        top_scorers,
    };
    Ok(Reply::new(report, &trace))
}
