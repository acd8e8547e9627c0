//! # Data Access
//!
//! Read-only queries against the statistics tables. Every query goes through the
//! [`QueryCache`](crate::cache::QueryCache) and reports whether it was a cache hit.
//! An empty result is a normal outcome; only connection or SQL failures are errors.

use std::{sync::Arc, time::Instant};

use entity::{actions, matches, phases, players, seasons, teams, Actions, Matches, Phases, Players, Seasons, Teams};
use error::{Context as _, Result};
use logging::log_db_query;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use stats::{ActionKind, ActionRecord, Mark, RosterEntry};

use crate::{cache::CacheClass, AppState};

/// A match with the phase it was played in.
pub type MatchRow = (matches::Model, Option<phases::Model>);

/// Result of a cached query: the value and whether it came from the cache.
pub type Cached<T> = (Arc<T>, bool);

/// Tracks whether every cached lookup of a request was a hit.
#[derive(Debug, Default)]
pub struct CacheTrace {
    lookups: usize,
    hits:    usize,
}

impl CacheTrace {
    pub fn track<T>(&mut self, (value, hit): Cached<T>) -> Arc<T> {
        self.lookups += 1;
        if hit {
            self.hits += 1;
        }
        value
    }

    /// `true` when at least one lookup happened and all of them were hits.
    pub fn all_hits(&self) -> bool { self.lookups > 0 && self.hits == self.lookups }
}

/// Decode a stored action row. A NULL mark decodes as an unknown mark.
pub fn to_record(row: actions::Model) -> ActionRecord {
    ActionRecord {
        id:        row.id,
        match_id:  row.match_id,
        player_id: row.player_id,
        set_no:    row.set_no,
        kind:      ActionKind::parse(row.kind.as_deref().unwrap_or_default()),
        mark:      row.mark.as_deref().and_then(Mark::parse),
        zone:      row.zone,
        rotation:  row.rotation,
    }
}

/// Roster entry for a player row.
pub fn to_roster_entry(player: &players::Model) -> RosterEntry {
    RosterEntry::new(player.id, player.display_name(), player.number)
}

fn ids_key(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// All teams, by name then letter.
pub async fn list_teams(state: &AppState) -> Result<Cached<Vec<teams::Model>>> {
    state
        .cache
        .get_or_load("teams".to_string(), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let rows = Teams::find()
                    .order_by_asc(teams::Column::Name)
                    .order_by_asc(teams::Column::Letter)
                    .all(&state.db)
                    .await?;
                log_db_query!("list_teams", "equipos", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// All seasons, newest name first.
pub async fn list_seasons(state: &AppState) -> Result<Cached<Vec<seasons::Model>>> {
    state
        .cache
        .get_or_load("seasons".to_string(), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let rows = Seasons::find()
                    .order_by_desc(seasons::Column::Name)
                    .all(&state.db)
                    .await?;
                log_db_query!("list_seasons", "temporadas", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// Phases of one season, by name.
pub async fn list_phases(state: &AppState, season_id: i32) -> Result<Cached<Vec<phases::Model>>> {
    state
        .cache
        .get_or_load(format!("phases:{}", season_id), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let rows = Phases::find()
                    .filter(phases::Column::SeasonId.eq(season_id))
                    .order_by_asc(phases::Column::Name)
                    .all(&state.db)
                    .await?;
                log_db_query!("list_phases", "fases", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// Look a team up in the cached catalog.
pub async fn find_team(state: &AppState, team_id: i32) -> Result<Cached<teams::Model>> {
    let (teams, hit) = list_teams(state).await?;
    let team = teams
        .iter()
        .find(|t| t.id == team_id)
        .cloned()
        .or_not_found(format!("Team {} not found", team_id))?;
    Ok((Arc::new(team), hit))
}

/// Look a season up in the cached catalog.
pub async fn find_season(state: &AppState, season_id: i32) -> Result<Cached<seasons::Model>> {
    let (seasons, hit) = list_seasons(state).await?;
    let season = seasons
        .iter()
        .find(|s| s.id == season_id)
        .cloned()
        .or_not_found(format!("Season {} not found", season_id))?;
    Ok((Arc::new(season), hit))
}

/// Matches of a team in a season, optionally one phase; newest first.
pub async fn list_matches(
    state: &AppState,
    team_id: i32,
    season_id: i32,
    phase_id: Option<i32>,
) -> Result<Cached<Vec<MatchRow>>> {
    let phase_key = phase_id.map_or_else(|| "all".to_string(), |id| id.to_string());
    let key = format!("matches:{}:{}:{}", team_id, season_id, phase_key);
    state
        .cache
        .get_or_load(key, CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let mut query = Matches::find()
                    .find_also_related(Phases)
                    .filter(matches::Column::TeamId.eq(team_id))
                    .filter(matches::Column::SeasonId.eq(season_id));
                if let Some(phase_id) = phase_id {
                    query = query.filter(matches::Column::PhaseId.eq(phase_id));
                }
                let rows = query
                    .order_by_desc(matches::Column::Date)
                    .order_by_desc(matches::Column::Id)
                    .all(&state.db)
                    .await?;
                log_db_query!("list_matches", "partidos_new", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// One match with its phase.
pub async fn find_match(state: &AppState, match_id: i32) -> Result<Cached<MatchRow>> {
    state
        .cache
        .get_or_load(format!("match:{}", match_id), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let row = Matches::find_by_id(match_id)
                    .find_also_related(Phases)
                    .one(&state.db)
                    .await?;
                log_db_query!("find_match", "partidos_new", start.elapsed().as_millis());
                row.or_not_found(format!("Match {} not found", match_id))
            }
        })
        .await
}

/// Active players of a team, by surname.
pub async fn list_players(state: &AppState, team_id: i32) -> Result<Cached<Vec<players::Model>>> {
    state
        .cache
        .get_or_load(format!("players:{}", team_id), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let rows = Players::find()
                    .filter(players::Column::TeamId.eq(team_id))
                    .filter(players::Column::Active.eq(true))
                    .order_by_asc(players::Column::Surname)
                    .order_by_asc(players::Column::Id)
                    .all(&state.db)
                    .await?;
                log_db_query!("list_players", "jugadores", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// One player, active or not.
pub async fn find_player(state: &AppState, player_id: i32) -> Result<Cached<players::Model>> {
    state
        .cache
        .get_or_load(format!("player:{}", player_id), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let row = Players::find_by_id(player_id).one(&state.db).await?;
                log_db_query!("find_player", "jugadores", start.elapsed().as_millis());
                row.or_not_found(format!("Player {} not found", player_id))
            }
        })
        .await
}

/// Players by id, active or not, by surname.
pub async fn find_players(state: &AppState, player_ids: &[i32]) -> Result<Cached<Vec<players::Model>>> {
    if player_ids.is_empty() {
        return Ok((Arc::new(Vec::new()), true));
    }
    let ids = player_ids.to_vec();
    state
        .cache
        .get_or_load(format!("players_by_id:{}", ids_key(player_ids)), CacheClass::Catalog, || {
            async move {
                let start = Instant::now();
                let rows = Players::find()
                    .filter(players::Column::Id.is_in(ids))
                    .order_by_asc(players::Column::Surname)
                    .order_by_asc(players::Column::Id)
                    .all(&state.db)
                    .await?;
                log_db_query!("find_players", "jugadores", start.elapsed().as_millis(), rows.len());
                Ok(rows)
            }
        })
        .await
}

/// Roster of a match: active players of its team plus anyone who logged an action in it.
pub async fn match_roster(state: &AppState, game: &matches::Model) -> Result<Cached<Vec<RosterEntry>>> {
    let team_id = game.team_id;
    let match_id = game.id;
    state
        .cache
        .get_or_load(format!("roster:{}", match_id), CacheClass::Actions, || {
            async move {
                let start = Instant::now();
                let mut members = Players::find()
                    .filter(players::Column::TeamId.eq(team_id))
                    .filter(players::Column::Active.eq(true))
                    .all(&state.db)
                    .await?;

                let logged: Vec<i32> = Actions::find()
                    .select_only()
                    .column(actions::Column::PlayerId)
                    .distinct()
                    .filter(actions::Column::MatchId.eq(match_id))
                    .into_tuple()
                    .all(&state.db)
                    .await?;
                let missing: Vec<i32> = logged
                    .into_iter()
                    .filter(|id| !members.iter().any(|p| p.id == *id))
                    .collect();
                if !missing.is_empty() {
                    members.extend(
                        Players::find()
                            .filter(players::Column::Id.is_in(missing))
                            .all(&state.db)
                            .await?,
                    );
                }
                log_db_query!("match_roster", "jugadores", start.elapsed().as_millis(), members.len());
                Ok(members.iter().map(to_roster_entry).collect())
            }
        })
        .await
}

/// Action rows of one match, by id.
pub async fn match_actions(state: &AppState, match_id: i32) -> Result<Cached<Vec<ActionRecord>>> {
    actions_for_matches(state, &[match_id]).await
}

/// Action rows of several matches, by id.
pub async fn actions_for_matches(state: &AppState, match_ids: &[i32]) -> Result<Cached<Vec<ActionRecord>>> {
    if match_ids.is_empty() {
        return Ok((Arc::new(Vec::new()), true));
    }
    let ids = match_ids.to_vec();
    state
        .cache
        .get_or_load(format!("actions:{}", ids_key(match_ids)), CacheClass::Actions, || {
            async move {
                let start = Instant::now();
                let rows = Actions::find()
                    .filter(actions::Column::MatchId.is_in(ids))
                    .order_by_asc(actions::Column::Id)
                    .all(&state.db)
                    .await?;
                log_db_query!("actions_for_matches", "acciones_new", start.elapsed().as_millis(), rows.len());
                Ok(rows.into_iter().map(to_record).collect())
            }
        })
        .await
}

/// Action rows of one player over several matches, by id.
pub async fn player_actions(state: &AppState, player_id: i32, match_ids: &[i32]) -> Result<Cached<Vec<ActionRecord>>> {
    if match_ids.is_empty() {
        return Ok((Arc::new(Vec::new()), true));
    }
    let ids = match_ids.to_vec();
    let key = format!("player_actions:{}:{}", player_id, ids_key(match_ids));
    state
        .cache
        .get_or_load(key, CacheClass::Actions, || {
            async move {
                let start = Instant::now();
                let rows = Actions::find()
                    .filter(actions::Column::PlayerId.eq(player_id))
                    .filter(actions::Column::MatchId.is_in(ids))
                    .order_by_asc(actions::Column::Id)
                    .all(&state.db)
                    .await?;
                log_db_query!("player_actions", "acciones_new", start.elapsed().as_millis(), rows.len());
                Ok(rows.into_iter().map(to_record).collect())
            }
        })
        .await
}
