//! # Catalog Handlers
//!
//! Selector lists for the dashboard sidebar and pickers.

use error::Result;

use super::Reply;
use crate::{
    context::resolve_context,
    dto::{
        catalog::{MatchItem, PhaseItem, PlayerItem, SeasonItem, TeamItem},
        query::{ContextQuery, TeamQuery},
    },
    queries::{self, CacheTrace},
    AppState,
};

/// List every team
pub async fn list_teams_handler(state: &AppState) -> Result<Reply<Vec<TeamItem>>> {
    let mut trace = CacheTrace::default();
    let teams = trace.track(queries::list_teams(state).await?);
    Ok(Reply::new(teams.iter().map(TeamItem::from).collect(), &trace))
}

/// List every season, newest first
pub async fn list_seasons_handler(state: &AppState) -> Result<Reply<Vec<SeasonItem>>> {
    let mut trace = CacheTrace::default();
    let seasons = trace.track(queries::list_seasons(state).await?);
    Ok(Reply::new(seasons.iter().map(SeasonItem::from).collect(), &trace))
}

/// List the phases of a season
///
/// Returns `NotFound` for an unknown season; a season without phases yields an empty list.
pub async fn list_phases_handler(state: &AppState, season_id: i32) -> Result<Reply<Vec<PhaseItem>>> {
    let mut trace = CacheTrace::default();
    let season = trace.track(queries::find_season(state, season_id).await?);
    let phases = trace.track(queries::list_phases(state, season.id).await?);
    Ok(Reply::new(phases.iter().map(PhaseItem::from).collect(), &trace))
}

/// List the matches of a context, newest first
pub async fn list_matches_handler(state: &AppState, query: &ContextQuery) -> Result<Reply<Vec<MatchItem>>> {
    let mut trace = CacheTrace::default();
    let context = resolve_context(state, query, &mut trace).await?;
    let rows = trace.track(queries::list_matches(state, context.team.id, context.season.id, context.phase_id()).await?);
    let items = rows
        .iter()
        .map(|(game, phase)| MatchItem::new(game, phase.as_ref()))
        .collect();
    Ok(Reply::new(items, &trace))
}

/// List the active players of a team
pub async fn list_players_handler(state: &AppState, query: &TeamQuery) -> Result<Reply<Vec<PlayerItem>>> {
    let mut trace = CacheTrace::default();
    let team = trace.track(queries::find_team(state, query.team_id).await?);
    let players = trace.track(queries::list_players(state, team.id).await?);
    Ok(Reply::new(players.iter().map(PlayerItem::from).collect(), &trace))
}
