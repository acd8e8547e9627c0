//! # Volley Stats Domain
//!
//! Pure statistics over scouted volleyball actions: outcome marks, action kinds,
//! per-match and per-player aggregation, match comparison and player rankings.
//!
//! Nothing here touches the database. An empty input is never an error; it produces
//! empty or all-zero output.

pub mod action;
pub mod aggregation;
pub mod comparison;
pub mod mark;
pub mod ranking;

pub use action::ActionKind;
pub use aggregation::{
    aggregate_match,
    rotation_breakdown,
    setter_distribution,
    side_out_breakdown,
    summarize_by_action,
    tally_by_action,
    zone_breakdown,
    ActionLine,
    ActionRecord,
    AttackPhase,
    MatchAggregate,
    PhaseLine,
    PlayerLine,
    PointSplit,
    RosterEntry,
    RotationLine,
    ZoneShare,
};
pub use comparison::{compare_matches, ComparisonRow, Delta, MatchComparison};
pub use mark::{Mark, MarkCounts, Rating};
pub use ranking::{clamp_limit, rank_players, RankingEntry, RankingMetric};
