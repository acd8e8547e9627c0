//! # Query Parameters
//!
//! Missing or non-numeric required parameters are rejected while deserializing (400);
//! out-of-range values are rejected by validation (422).

use serde::Deserialize;
use validator::Validate;

/// Working context selected in the dashboard sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct ContextQuery {
    /// Team identifier
    #[validate(range(min = 1, message = "team_id must be a positive identifier"))]
    pub team_id:   i32,
    /// Season identifier
    #[validate(range(min = 1, message = "season_id must be a positive identifier"))]
    pub season_id: i32,
    /// Optional phase identifier; dropped when it belongs to another season
    #[validate(range(min = 1, message = "phase_id must be a positive identifier"))]
    pub phase_id:  Option<i32>,
}

/// Team filter for the player selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct TeamQuery {
    #[validate(range(min = 1, message = "team_id must be a positive identifier"))]
    pub team_id: i32,
}

/// Player profile scope: the whole context, or one match of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct ProfileQuery {
    #[validate(range(min = 1, message = "team_id must be a positive identifier"))]
    pub team_id:   i32,
    #[validate(range(min = 1, message = "season_id must be a positive identifier"))]
    pub season_id: i32,
    #[validate(range(min = 1, message = "phase_id must be a positive identifier"))]
    pub phase_id:  Option<i32>,
    /// Restrict the profile to a single match
    #[validate(range(min = 1, message = "match_id must be a positive identifier"))]
    pub match_id:  Option<i32>,
}

impl ProfileQuery {
    pub fn context(&self) -> ContextQuery {
        ContextQuery {
            team_id:   self.team_id,
            season_id: self.season_id,
            phase_id:  self.phase_id,
        }
    }
}

/// Two matches to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct CompareQuery {
    #[validate(range(min = 1, message = "match_a must be a positive identifier"))]
    pub match_a: i32,
    #[validate(range(min = 1, message = "match_b must be a positive identifier"))]
    pub match_b: i32,
}

/// Ranking request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RankingQuery {
    #[validate(range(min = 1, message = "team_id must be a positive identifier"))]
    pub team_id:   i32,
    #[validate(range(min = 1, message = "season_id must be a positive identifier"))]
    pub season_id: i32,
    #[validate(range(min = 1, message = "phase_id must be a positive identifier"))]
    pub phase_id:  Option<i32>,
    /// Metric name, `points` when absent
    #[validate(length(min = 1, max = 32, message = "metric must be between 1 and 32 characters"))]
    pub metric:    Option<String>,
    /// Number of entries; clamped into `1..=100`
    pub limit:     Option<u64>,
}

impl RankingQuery {
    pub fn context(&self) -> ContextQuery {
        ContextQuery {
            team_id:   self.team_id,
            season_id: self.season_id,
            phase_id:  self.phase_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_query_validation() {
        let valid = ContextQuery {
            team_id:   1,
            season_id: 2,
            phase_id:  None,
        };
        assert!(valid.validate().is_ok());

        let invalid = ContextQuery {
            team_id:   0,
            season_id: 2,
            phase_id:  Some(-3),
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("team_id"));
        assert!(errors.field_errors().contains_key("phase_id"));
    }

    #[test]
    fn test_ranking_query_metric_length() {
        let query = RankingQuery {
            team_id:   1,
            season_id: 1,
            phase_id:  None,
            metric:    Some(String::new()),
            limit:     Some(500),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_profile_context() {
        let query = ProfileQuery {
            team_id:   4,
            season_id: 5,
            phase_id:  Some(6),
            match_id:  Some(7),
        };
        assert_eq!(query.context(), ContextQuery {
            team_id:   4,
            season_id: 5,
            phase_id:  Some(6),
        });
    }
}
