//! # Working Context
//!
//! Resolves the team / season / phase selection shared by the summary, profile and
//! ranking views. A phase that belongs to another season is dropped before any
//! aggregation runs.

use std::sync::Arc;

use entity::{phases, seasons, teams};
use error::Result;
use tracing::warn;

use crate::{
    dto::{
        catalog::{PhaseItem, SeasonItem, TeamItem},
        query::ContextQuery,
        reports::ContextInfo,
    },
    queries::{self, CacheTrace},
    AppState,
};

/// A validated team / season / phase selection.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub team:          Arc<teams::Model>,
    pub season:        Arc<seasons::Model>,
    pub phase:         Option<phases::Model>,
    pub dropped_phase: Option<i32>,
}

impl ReportContext {
    /// Phase filter to apply to match queries.
    pub fn phase_id(&self) -> Option<i32> { self.phase.as_ref().map(|p| p.id) }

    pub fn to_info(&self) -> ContextInfo {
        ContextInfo {
            team:          TeamItem::from(self.team.as_ref()),
            season:        SeasonItem::from(self.season.as_ref()),
            phase:         self.phase.as_ref().map(PhaseItem::from),
            dropped_phase: self.dropped_phase,
        }
    }
}

/// Resolve a context selection.
///
/// # Errors
///
/// `NotFound` when the team or season does not exist. An unknown phase, or one from
/// another season, is not an error: it is dropped with a warning.
pub async fn resolve_context(state: &AppState, query: &ContextQuery, trace: &mut CacheTrace) -> Result<ReportContext> {
    let team = trace.track(queries::find_team(state, query.team_id).await?);
    let season = trace.track(queries::find_season(state, query.season_id).await?);

    let mut phase = None;
    let mut dropped_phase = None;
    if let Some(phase_id) = query.phase_id {
        let phases = trace.track(queries::list_phases(state, season.id).await?);
        match phases.iter().find(|p| p.id == phase_id) {
            Some(found) => phase = Some(found.clone()),
            None => {
                warn!(
                    phase_id,
                    season_id = season.id,
                    "Phase does not belong to the selected season, ignoring it"
                );
                dropped_phase = Some(phase_id);
            },
        }
    }

    Ok(ReportContext {
        team,
        season,
        phase,
        dropped_phase,
    })
}
