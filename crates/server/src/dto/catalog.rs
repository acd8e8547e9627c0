//! # Catalog Documents
//!
//! Selector entries for teams, seasons, phases, matches and players.

use chrono::NaiveDate;
use entity::{matches, phases, players, seasons, teams};
use serde::Serialize;

/// Team selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamItem {
    pub id:           i32,
    pub name:         String,
    pub letter:       Option<String>,
    /// `"{name} {letter}"`, or the name alone
    pub display_name: String,
}

impl From<&teams::Model> for TeamItem {
    fn from(team: &teams::Model) -> Self {
        Self {
            id:           team.id,
            name:         team.name.clone(),
            letter:       team.letter.clone(),
            display_name: team.display_name(),
        }
    }
}

/// Season selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonItem {
    pub id:     i32,
    pub name:   String,
    pub active: bool,
}

impl From<&seasons::Model> for SeasonItem {
    fn from(season: &seasons::Model) -> Self {
        Self {
            id:     season.id,
            name:   season.name.clone(),
            active: season.active,
        }
    }
}

/// Phase selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseItem {
    pub id:        i32,
    pub name:      String,
    pub season_id: i32,
}

impl From<&phases::Model> for PhaseItem {
    fn from(phase: &phases::Model) -> Self {
        Self {
            id:        phase.id,
            name:      phase.name.clone(),
            season_id: phase.season_id,
        }
    }
}

/// Match selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchItem {
    pub id:       i32,
    pub opponent: String,
    pub home:     bool,
    pub venue:    &'static str,
    pub date:     NaiveDate,
    pub result:   Option<String>,
    pub phase:    Option<String>,
    pub label:    String,
}

impl MatchItem {
    pub fn new(game: &matches::Model, phase: Option<&phases::Model>) -> Self {
        Self {
            id:       game.id,
            opponent: game.opponent.clone(),
            home:     game.home,
            venue:    game.venue(),
            date:     game.date,
            result:   game.result.clone(),
            phase:    phase.map(|p| p.name.clone()),
            label:    game.label(),
        }
    }
}

/// Player selector entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerItem {
    pub id:         i32,
    pub surname:    String,
    pub first_name: Option<String>,
    pub number:     Option<i32>,
    pub position:   Option<String>,
    pub active:     bool,
    pub label:      String,
}

impl From<&players::Model> for PlayerItem {
    fn from(player: &players::Model) -> Self {
        Self {
            id:         player.id,
            surname:    player.surname.clone(),
            first_name: player.first_name.clone(),
            number:     player.number,
            position:   player.position.clone(),
            active:     player.active,
            label:      player.label(),
        }
    }
}
