//! # Match Comparison
//!
//! Lines up two match aggregates by action kind. Deltas are always `a - b`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    action::ActionKind,
    aggregation::MatchAggregate,
    mark::{round1, MarkCounts},
};

/// Differences between the two sides of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Delta {
    pub total:          i64,
    pub points:         i64,
    pub errors:         i64,
    /// Percent points.
    pub efficacy_pct:   f64,
    /// Percent points.
    pub efficiency_pct: f64,
}

impl Delta {
    /// `a − b` per metric.
    pub fn between(a: &MarkCounts, b: &MarkCounts) -> Self {
        Self {
            total:          i64::from(a.total) - i64::from(b.total),
            points:         i64::from(a.point) - i64::from(b.point),
            errors:         i64::from(a.error) - i64::from(b.error),
            efficacy_pct:   round1(a.efficacy_pct() - b.efficacy_pct()),
            efficiency_pct: round1(a.efficiency_pct() - b.efficiency_pct()),
        }
    }

    /// No difference on any tracked metric.
    pub fn is_zero(&self) -> bool {
        self.total == 0 &&
            self.points == 0 &&
            self.errors == 0 &&
            self.efficacy_pct == 0.0 &&
            self.efficiency_pct == 0.0
    }
}

/// One action kind seen in either match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub kind:             ActionKind,
    pub label:            String,
    pub a:                MarkCounts,
    pub b:                MarkCounts,
    pub a_efficacy_pct:   f64,
    pub b_efficacy_pct:   f64,
    pub a_efficiency_pct: f64,
    pub b_efficiency_pct: f64,
    pub delta:            Delta,
}

/// Side-by-side view of two matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchComparison {
    pub match_a:       i32,
    pub match_b:       i32,
    pub rows:          Vec<ComparisonRow>,
    pub overall_delta: Delta,
    pub points_delta:  i64,
}

/// Compare two aggregates.
///
/// Rows cover the union of action kinds of both matches in canonical order; a kind
/// missing on one side is compared against zero counts.
pub fn compare_matches(a: &MatchAggregate, b: &MatchAggregate) -> MatchComparison {
    let kinds: BTreeSet<&ActionKind> = a.actions.keys().chain(b.actions.keys()).collect();

    let rows = kinds
        .into_iter()
        .map(|kind| {
            let left = a.counts(kind);
            let right = b.counts(kind);
            ComparisonRow {
                kind:             kind.clone(),
                label:            kind.label().to_string(),
                a:                left,
                b:                right,
                a_efficacy_pct:   left.efficacy_pct(),
                b_efficacy_pct:   right.efficacy_pct(),
                a_efficiency_pct: left.efficiency_pct(),
                b_efficiency_pct: right.efficiency_pct(),
                delta:            Delta::between(&left, &right),
            }
        })
        .collect();

    MatchComparison {
        match_a: a.match_id,
        match_b: b.match_id,
        rows,
        overall_delta: Delta::between(&a.overall, &b.overall),
        points_delta: i64::from(a.points.total) - i64::from(b.points.total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregation::{aggregate_match, ActionRecord},
        mark::Mark,
    };

    #[test]
    fn test_delta_direction() {
        let a: MarkCounts = [Some(Mark::Point), Some(Mark::Point)].into_iter().collect();
        let b: MarkCounts = [Some(Mark::Error)].into_iter().collect();
        let delta = Delta::between(&a, &b);
        assert_eq!(delta.total, 1);
        assert_eq!(delta.points, 2);
        assert_eq!(delta.errors, -1);
        assert_eq!(delta.efficiency_pct, 200.0);
    }

    #[test]
    fn test_empty_matches_compare_to_nothing() {
        let a = aggregate_match(1, &[], &[]);
        let b = aggregate_match(2, &[], &[]);
        let comparison = compare_matches(&a, &b);
        assert!(comparison.rows.is_empty());
        assert!(comparison.overall_delta.is_zero());
    }

    #[test]
    fn test_rows_in_canonical_order() {
        let a = aggregate_match(1, &[], &[
            ActionRecord::new(1, 1, 1, ActionKind::Dig, Some(Mark::Positive)),
            ActionRecord::new(2, 1, 1, ActionKind::Serve, Some(Mark::Point)),
        ]);
        let b = aggregate_match(2, &[], &[ActionRecord::new(3, 2, 1, ActionKind::Reception, None)]);
        let kinds: Vec<ActionKind> = compare_matches(&a, &b)
            .rows
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![ActionKind::Serve, ActionKind::Reception, ActionKind::Dig]);
    }
}
