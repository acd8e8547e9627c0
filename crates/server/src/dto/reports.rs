//! # Report Documents
//!
//! Payloads bound by the dashboard's chart and table widgets.

use serde::Serialize;
use stats::{ActionLine, MatchAggregate, MatchComparison, PlayerLine, RankingEntry, RankingMetric, RotationLine, ZoneShare};

use super::catalog::{MatchItem, PhaseItem, PlayerItem, SeasonItem, TeamItem};

/// The resolved working context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub team:          TeamItem,
    pub season:        SeasonItem,
    pub phase:         Option<PhaseItem>,
    /// Requested phase that was ignored because it belongs to another season
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_phase: Option<i32>,
}

/// Home page quick summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub context:      ContextInfo,
    pub matches:      usize,
    pub home_matches: usize,
    pub away_matches: usize,
    /// Matches with a recorded result
    pub played:       usize,
    pub last_match:   Option<MatchItem>,
}

/// Full report of one match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    #[serde(rename = "match")]
    pub game:        MatchItem,
    pub has_data:    bool,
    pub aggregate:   MatchAggregate,
    pub top_scorers: Vec<RankingEntry>,
}

/// Player profile over the context or a single match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player:       PlayerItem,
    pub context:      ContextInfo,
    /// Matches the profile covers
    pub matches:      Vec<MatchItem>,
    pub has_data:     bool,
    pub line:         PlayerLine,
    pub actions:      Vec<ActionLine>,
    pub attack_zones: Vec<ZoneShare>,
    pub rotations:    Vec<RotationLine>,
}

/// Comparison of two matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResponse {
    pub match_a:    MatchItem,
    pub match_b:    MatchItem,
    pub comparison: MatchComparison,
}

/// Ranking over every match of a context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResponse {
    pub context: ContextInfo,
    pub metric:  RankingMetric,
    pub limit:   usize,
    pub matches: usize,
    pub entries: Vec<RankingEntry>,
}
