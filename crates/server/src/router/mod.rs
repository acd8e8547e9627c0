//! # API Router Configuration
//!
//! Configures the dashboard API routes. Route wrappers extract and validate the
//! request, call the report handler and wrap its payload in the response envelope.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension,
        Path,
        Query,
        Request,
        State as AxumState,
    },
    middleware::{self, Next},
    routing::get,
    Json,
    Router,
};
use error::{ApiResponse, ResponseMeta, Result};
use logging::RequestId;
use serde::Serialize;
use validator::Validate;

use crate::{
    dto::{
        catalog::{MatchItem, PhaseItem, PlayerItem, SeasonItem, TeamItem},
        query::{CompareQuery, ContextQuery, ProfileQuery, RankingQuery, TeamQuery},
        reports::{ComparisonResponse, MatchReport, PlayerProfile, RankingResponse, SummaryResponse},
    },
    middleware::{
        cors::{cors_middleware, CorsConfig},
        request_id::request_id_middleware,
    },
    reports::{self, Reply},
    AppState,
};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing the DB connection and query cache
/// * `cors` - Origins allowed to read the API from a browser
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_app_router(state: AppState, cors: CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/context/teams", get(teams_handler))
        .route("/api/v1/context/seasons", get(seasons_handler))
        .route("/api/v1/context/seasons/:id/phases", get(phases_handler))
        .route("/api/v1/summary", get(summary_handler))
        .route("/api/v1/matches", get(matches_handler))
        .route("/api/v1/matches/:id/report", get(match_report_handler))
        .route("/api/v1/players", get(players_handler))
        .route("/api/v1/players/:id/profile", get(player_profile_handler))
        .route("/api/v1/compare", get(compare_handler))
        .route("/api/v1/rankings", get(rankings_handler))
        .fallback(error::middleware::not_found_fallback)
        .with_state(state)
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            cors_middleware(request, next, cors.clone())
        }))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Wrap a handler reply in the success envelope.
fn envelope<T: Serialize>(reply: Reply<T>, request_id: Option<Extension<RequestId>>) -> ApiResponse<T> {
    ApiResponse::success(reply.data, ResponseMeta {
        request_id: request_id.map(|Extension(id)| id.into_string()),
        cached:     Some(reply.cached),
    })
}

/// Liveness payload
#[derive(Debug, Serialize)]
struct HealthStatus {
    status:      &'static str,
    version:     &'static str,
    uptime_secs: u64,
}

/// Liveness probe; does not touch the database
async fn health_handler(AxumState(state): AxumState<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status:      "ok",
        version:     env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// Wrapper handler for the team selector
async fn teams_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Result<ApiResponse<Vec<TeamItem>>> {
    let reply = reports::catalog::list_teams_handler(&state).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the season selector
async fn seasons_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Result<ApiResponse<Vec<SeasonItem>>> {
    let reply = reports::catalog::list_seasons_handler(&state).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the phase selector
async fn phases_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    season_id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<Vec<PhaseItem>>> {
    let Path(season_id) = season_id?;
    let reply = reports::catalog::list_phases_handler(&state, season_id).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the home summary
async fn summary_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: std::result::Result<Query<ContextQuery>, QueryRejection>,
) -> Result<ApiResponse<SummaryResponse>> {
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::summary::summary_handler(&state, &query).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the match selector
async fn matches_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: std::result::Result<Query<ContextQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<MatchItem>>> {
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::catalog::list_matches_handler(&state, &query).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for a match report
async fn match_report_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    match_id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<MatchReport>> {
    let Path(match_id) = match_id?;
    let reply = reports::match_report::match_report_handler(&state, match_id).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the player selector
async fn players_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: std::result::Result<Query<TeamQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<PlayerItem>>> {
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::catalog::list_players_handler(&state, &query).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for a player profile
async fn player_profile_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    player_id: std::result::Result<Path<i32>, PathRejection>,
    query: std::result::Result<Query<ProfileQuery>, QueryRejection>,
) -> Result<ApiResponse<PlayerProfile>> {
    let Path(player_id) = player_id?;
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::player_profile::player_profile_handler(&state, player_id, &query).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the match comparison
async fn compare_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: std::result::Result<Query<CompareQuery>, QueryRejection>,
) -> Result<ApiResponse<ComparisonResponse>> {
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::compare::compare_handler(&state, &query).await?;
    Ok(envelope(reply, request_id))
}

/// Wrapper handler for the rankings podium
async fn rankings_handler(
    AxumState(state): AxumState<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: std::result::Result<Query<RankingQuery>, QueryRejection>,
) -> Result<ApiResponse<RankingResponse>> {
    let Query(query) = query?;
    query.validate()?;
    let reply = reports::rankings::rankings_handler(&state, &query).await?;
    Ok(envelope(reply, request_id))
}
