//! # Player Profile
//!
//! One player's statistics over every match of a context, or over a single match of it.

use error::{AppError, Result};
use stats::{rotation_breakdown, zone_breakdown, ActionKind, PlayerLine};

use super::Reply;
use crate::{
    context::resolve_context,
    dto::{
        catalog::{MatchItem, PlayerItem},
        query::ProfileQuery,
        reports::PlayerProfile,
    },
    queries::{self, to_roster_entry, CacheTrace},
    AppState,
};

/// Build a player profile
///
/// # Errors
///
/// `NotFound` for an unknown player, team or season; `BadRequest` when `match_id`
/// is not one of the context's matches.
pub async fn player_profile_handler(
    state: &AppState,
    player_id: i32,
    query: &ProfileQuery,
) -> Result<Reply<PlayerProfile>> {
    let mut trace = CacheTrace::default();
    let player = trace.track(queries::find_player(state, player_id).await?);
    let context = resolve_context(state, &query.context(), &mut trace).await?;
    let rows = trace.track(queries::list_matches(state, context.team.id, context.season.id, context.phase_id()).await?);

    let selected: Vec<MatchItem> = match query.match_id {
        Some(match_id) => {
            let (game, phase) = rows
                .iter()
                .find(|(game, _)| game.id == match_id)
                .ok_or_else(|| {
                    AppError::bad_request(format!("Match {} is not part of the selected context", match_id))
                })?;
            vec![MatchItem::new(game, phase.as_ref())]
        },
        None => {
            rows.iter()
                .map(|(game, phase)| MatchItem::new(game, phase.as_ref()))
                .collect()
        },
    };
    let match_ids: Vec<i32> = selected.iter().map(|m| m.id).collect();
    let actions = trace.track(queries::player_actions(state, player.id, &match_ids).await?);

    let line = PlayerLine::from_actions(&to_roster_entry(&player), &actions);
    let profile = PlayerProfile {
        player: PlayerItem::from(player.as_ref()),
        context: context.to_info(),
        matches: selected,
        has_data: !actions.is_empty(),
        actions: line.lines(),
        attack_zones: zone_breakdown(&actions, Some(&ActionKind::Attack)),
        rotations: rotation_breakdown(&actions),
        line,
    };
    Ok(Reply::new(profile, &trace))
}
