//! # Ranking
//!
//! Orders players by a metric over every match in a context.

use std::{cmp::Ordering, collections::HashMap, fmt, str::FromStr};

use serde::Serialize;

use crate::aggregation::{ActionRecord, PlayerLine, PointSplit, RosterEntry};

/// Entries returned when no limit is requested.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound for the requested limit.
pub const MAX_LIMIT: u64 = 100;

/// Metric a ranking sorts by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    /// Direct points: attack, serve and block `#`.
    #[default]
    Points,
    AttackPoints,
    Aces,
    BlockPoints,
    Efficiency,
    Efficacy,
    Attempts,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 7] = [
        RankingMetric::Points,
        RankingMetric::AttackPoints,
        RankingMetric::Aces,
        RankingMetric::BlockPoints,
        RankingMetric::Efficiency,
        RankingMetric::Efficacy,
        RankingMetric::Attempts,
    ];

    /// Whether the metric counts direct points; a zero count is not ranked.
    pub fn is_point_count(self) -> bool {
        matches!(
            self,
            RankingMetric::Points | RankingMetric::AttackPoints | RankingMetric::Aces | RankingMetric::BlockPoints
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RankingMetric::Points => "points",
            RankingMetric::AttackPoints => "attack_points",
            RankingMetric::Aces => "aces",
            RankingMetric::BlockPoints => "block_points",
            RankingMetric::Efficiency => "efficiency",
            RankingMetric::Efficacy => "efficacy",
            RankingMetric::Attempts => "attempts",
        }
    }

    /// Metric value for a player line. Ratios are percentages.
    pub fn value(self, line: &PlayerLine) -> f64 {
        match self {
            RankingMetric::Points => f64::from(line.points.total),
            RankingMetric::AttackPoints => f64::from(line.points.attack),
            RankingMetric::Aces => f64::from(line.points.serve),
            RankingMetric::BlockPoints => f64::from(line.points.block),
            RankingMetric::Efficiency => line.overall.efficiency_pct(),
            RankingMetric::Efficacy => line.overall.efficacy_pct(),
            RankingMetric::Attempts => f64::from(line.overall.total),
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown ranking metric '{0}'")]
pub struct ParseMetricError(pub String);

impl FromStr for RankingMetric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

/// Clamp a requested limit into `1..=MAX_LIMIT`, defaulting to [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: Option<u64>) -> usize { limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize }

/// One ranked player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank:      usize,
    pub player_id: i32,
    pub name:      String,
    pub number:    Option<i32>,
    pub value:     f64,
    pub attempts:  u32,
    pub points:    PointSplit,
}

/// Rank players over all rows given.
///
/// Lines are built for every roster member and every player with rows; players without
/// any attempt are left out, and so are players on zero for a point-count metric. Sorted by metric descending, then attempts descending, then
/// player id ascending, truncated to `limit`.
pub fn rank_players(
    roster: &[RosterEntry],
    actions: &[ActionRecord],
    metric: RankingMetric,
    limit: usize,
) -> Vec<RankingEntry> {
    let mut lines: HashMap<i32, PlayerLine> = roster
        .iter()
        .map(|entry| (entry.player_id, PlayerLine::new(entry)))
        .collect();
    for action in actions {
        lines
            .entry(action.player_id)
            .or_insert_with(|| PlayerLine::new(&RosterEntry::unknown(action.player_id)))
            .record(action);
    }

    let mut scored: Vec<(f64, PlayerLine)> = lines
        .into_values()
        .filter(|line| line.attempts() > 0)
        .map(|line| (metric.value(&line), line))
        .filter(|(value, _)| !metric.is_point_count() || *value > 0.0)
        .collect();

    scored.sort_by(|(va, a), (vb, b)| {
        vb.partial_cmp(va)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.attempts().cmp(&a.attempts()))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (value, line))| {
            RankingEntry {
                rank: i + 1,
                player_id: line.player_id,
                name: line.name,
                number: line.number,
                value,
                attempts: line.overall.total,
                points: line.points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert_eq!("points".parse::<RankingMetric>().unwrap(), RankingMetric::Points);
        assert_eq!(" Aces ".parse::<RankingMetric>().unwrap(), RankingMetric::Aces);
        assert!("goals".parse::<RankingMetric>().is_err());
        for metric in RankingMetric::ALL {
            assert_eq!(metric.as_str().parse::<RankingMetric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_point_count_metrics() {
        assert!(RankingMetric::Points.is_point_count());
        assert!(RankingMetric::BlockPoints.is_point_count());
        assert!(!RankingMetric::Efficiency.is_point_count());
        assert!(!RankingMetric::Attempts.is_point_count());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }
}
