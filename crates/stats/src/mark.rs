//! # Outcome Marks
//!
//! Every scouted action carries one quality mark. Symbols follow the scouting sheet
//! convention: `#` point, `+` positive, `!` neutral, `-` negative, `/` forced error,
//! `=` error.

use std::{fmt, ops::AddAssign};

use serde::Serialize;

/// Outcome mark of a single action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Point,
    Positive,
    Neutral,
    Negative,
    ForcedError,
    Error,
}

impl Mark {
    /// Marks in display order.
    pub const ALL: [Mark; 6] = [
        Mark::Point,
        Mark::Positive,
        Mark::Neutral,
        Mark::Negative,
        Mark::ForcedError,
        Mark::Error,
    ];

    /// Parse a stored mark symbol. Unknown symbols yield `None`.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "#" => Some(Mark::Point),
            "+" => Some(Mark::Positive),
            "!" => Some(Mark::Neutral),
            "-" => Some(Mark::Negative),
            "/" => Some(Mark::ForcedError),
            "=" => Some(Mark::Error),
            _ => None,
        }
    }

    /// Symbol as stored in the database.
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Point => "#",
            Mark::Positive => "+",
            Mark::Neutral => "!",
            Mark::Negative => "-",
            Mark::ForcedError => "/",
            Mark::Error => "=",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

/// Round a ratio-derived percentage to one decimal place.
pub fn round1(value: f64) -> f64 { (value * 10.0).round() / 10.0 }

/// Per-mark counters for a set of actions.
///
/// `total` counts every recorded action, including ones with an unknown mark, so the
/// buckets may sum to less than the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkCounts {
    pub point:        u32,
    pub positive:     u32,
    pub neutral:      u32,
    pub negative:     u32,
    pub forced_error: u32,
    pub error:        u32,
    pub total:        u32,
}

impl MarkCounts {
    /// Count one action.
    pub fn record(&mut self, mark: Option<Mark>) {
        self.total += 1;
        match mark {
            Some(Mark::Point) => self.point += 1,
            Some(Mark::Positive) => self.positive += 1,
            Some(Mark::Neutral) => self.neutral += 1,
            Some(Mark::Negative) => self.negative += 1,
            Some(Mark::ForcedError) => self.forced_error += 1,
            Some(Mark::Error) => self.error += 1,
            None => {},
        }
    }

    /// Count for a single mark.
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::Point => self.point,
            Mark::Positive => self.positive,
            Mark::Neutral => self.neutral,
            Mark::Negative => self.negative,
            Mark::ForcedError => self.forced_error,
            Mark::Error => self.error,
        }
    }

    /// No attempts recorded.
    pub fn is_empty(&self) -> bool { self.total == 0 }

    /// (points − errors) / attempts, in `[-1, 1]`; zero without attempts.
    pub fn efficiency(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (f64::from(self.point) - f64::from(self.error)) / f64::from(self.total)
    }

    /// (points + positives) / attempts, in `[0, 1]`; zero without attempts.
    pub fn efficacy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.point + self.positive) / f64::from(self.total)
    }

    /// Efficiency as a percentage, one decimal.
    pub fn efficiency_pct(&self) -> f64 { round1(self.efficiency() * 100.0) }

    /// Efficacy as a percentage, one decimal.
    pub fn efficacy_pct(&self) -> f64 { round1(self.efficacy() * 100.0) }
}

impl AddAssign for MarkCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.point += rhs.point;
        self.positive += rhs.positive;
        self.neutral += rhs.neutral;
        self.negative += rhs.negative;
        self.forced_error += rhs.forced_error;
        self.error += rhs.error;
        self.total += rhs.total;
    }
}

impl FromIterator<Option<Mark>> for MarkCounts {
    fn from_iter<I: IntoIterator<Item = Option<Mark>>>(iter: I) -> Self {
        let mut counts = MarkCounts::default();
        for mark in iter {
            counts.record(mark);
        }
        counts
    }
}

/// Display rating of an efficacy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Regular,
    Poor,
}

impl Rating {
    /// `>= 60` good, `>= 40` regular, otherwise poor.
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 60.0 {
            Rating::Good
        }
        else if pct >= 40.0 {
            Rating::Regular
        }
        else {
            Rating::Poor
        }
    }
}
