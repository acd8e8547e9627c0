//! # Common Test Utilities
//!
//! Shared test infrastructure: one-time logging setup, an in-memory SQLite database
//! with the statistics tables, fixture builders and a request helper.

#![allow(dead_code)]

use std::sync::Once;

use axum::{body::Body, http::Request, Router};
use chrono::NaiveDate;
use entity::{actions, matches, phases, players, seasons, teams, Actions, Matches, Phases, Players, Seasons, Teams};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DbConn, Schema, Set};
use server::{create_app_router, AppState, CacheConfig, CorsConfig};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Create an empty in-memory database with every statistics table
pub async fn empty_db() -> DbConn {
    init_test_env();

    // one connection, otherwise every pooled connection sees its own empty database
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        schema.create_table_from_entity(Teams),
        schema.create_table_from_entity(Seasons),
        schema.create_table_from_entity(Phases),
        schema.create_table_from_entity(Players),
        schema.create_table_from_entity(Matches),
        schema.create_table_from_entity(Actions),
    ];
    for statement in &statements {
        db.execute(backend.build(statement))
            .await
            .expect("Failed to create table");
    }
    db
}

pub async fn insert_team(db: &DbConn, id: i32, name: &str, letter: Option<&str>) {
    teams::ActiveModel {
        id:     Set(id),
        name:   Set(name.to_string()),
        letter: Set(letter.map(str::to_string)),
    }
    .insert(db)
    .await
    .expect("Failed to insert team");
}

pub async fn insert_season(db: &DbConn, id: i32, name: &str, active: bool) {
    seasons::ActiveModel {
        id:     Set(id),
        name:   Set(name.to_string()),
        active: Set(active),
    }
    .insert(db)
    .await
    .expect("Failed to insert season");
}

pub async fn insert_phase(db: &DbConn, id: i32, name: &str, season_id: i32) {
    phases::ActiveModel {
        id:        Set(id),
        name:      Set(name.to_string()),
        season_id: Set(season_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert phase");
}

pub async fn insert_player(
    db: &DbConn,
    id: i32,
    surname: &str,
    first_name: &str,
    number: Option<i32>,
    team_id: i32,
    active: bool,
) {
    players::ActiveModel {
        id:         Set(id),
        surname:    Set(surname.to_string()),
        first_name: Set(Some(first_name.to_string())),
        number:     Set(number),
        position:   Set(None),
        team_id:    Set(team_id),
        active:     Set(active),
    }
    .insert(db)
    .await
    .expect("Failed to insert player");
}

/// Match fixture; ids of team, season and phase are given by the caller
pub struct MatchFixture {
    pub id:        i32,
    pub opponent:  &'static str,
    pub home:      bool,
    pub date:      (i32, u32, u32),
    pub result:    Option<&'static str>,
    pub team_id:   i32,
    pub season_id: i32,
    pub phase_id:  Option<i32>,
}

pub async fn insert_match(db: &DbConn, fixture: MatchFixture) {
    let (year, month, day) = fixture.date;
    matches::ActiveModel {
        id:          Set(fixture.id),
        opponent:    Set(fixture.opponent.to_string()),
        home:        Set(fixture.home),
        date:        Set(NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")),
        result:      Set(fixture.result.map(str::to_string)),
        source_file: Set(None),
        team_id:     Set(fixture.team_id),
        season_id:   Set(fixture.season_id),
        phase_id:    Set(fixture.phase_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert match");
}

/// Insert `times` identical actions
pub async fn insert_actions(
    db: &DbConn,
    match_id: i32,
    player_id: i32,
    kind: &str,
    mark: &str,
    zone: Option<&str>,
    times: usize,
) {
    for _ in 0 .. times {
        actions::ActiveModel {
            match_id: Set(match_id),
            player_id: Set(player_id),
            set_no: Set(1),
            kind: Set(Some(kind.to_string())),
            mark: Set(Some(mark.to_string())),
            zone: Set(zone.map(str::to_string)),
            rotation: Set(Some(1)),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert action");
    }
}

/// Insert one action whose `marca` is NULL, as some scouting imports leave it
pub async fn insert_unmarked_action(db: &DbConn, match_id: i32, player_id: i32, kind: &str) {
    actions::ActiveModel {
        match_id: Set(match_id),
        player_id: Set(player_id),
        set_no: Set(1),
        kind: Set(Some(kind.to_string())),
        mark: Set(None),
        zone: Set(None),
        rotation: Set(Some(1)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert action");
}

/// Seed the standard dataset used by the API tests.
///
/// Team 1 plays season 2 ("2024-25") with phases 1 ("Liga") and 2 ("Copa"); phase 3
/// belongs to season 1. Matches 1 and 2 have actions, match 3 has none. Player 3 has
/// left the team but scored in match 2.
///
/// Expected season 2 totals: player 1 has 4 points in 6 attempts, player 2 has 2 points
/// in 3 attempts, player 3 has 2 points in 2 attempts.
pub async fn seeded_db() -> DbConn {
    let db = empty_db().await;

    insert_team(&db, 1, "Club Volei", Some("A")).await;
    insert_team(&db, 2, "Club Volei", Some("B")).await;
    insert_season(&db, 1, "2023-24", false).await;
    insert_season(&db, 2, "2024-25", true).await;
    insert_phase(&db, 1, "Liga", 2).await;
    insert_phase(&db, 2, "Copa", 2).await;
    insert_phase(&db, 3, "Liga", 1).await;

    insert_player(&db, 1, "Garcia", "Laia", Some(7), 1, true).await;
    insert_player(&db, 2, "Puig", "Marta", Some(10), 1, true).await;
    insert_player(&db, 3, "Soler", "Anna", Some(4), 1, false).await;
    insert_player(&db, 4, "Vidal", "Nuria", Some(1), 2, true).await;

    insert_match(&db, MatchFixture {
        id:        1,
        opponent:  "Sant Cugat",
        home:      true,
        date:      (2024, 10, 5),
        result:    Some("3-1"),
        team_id:   1,
        season_id: 2,
        phase_id:  Some(1),
    })
    .await;
    insert_match(&db, MatchFixture {
        id:        2,
        opponent:  "Manresa",
        home:      false,
        date:      (2024, 10, 12),
        result:    Some("1-3"),
        team_id:   1,
        season_id: 2,
        phase_id:  Some(1),
    })
    .await;
    insert_match(&db, MatchFixture {
        id:        3,
        opponent:  "Sabadell",
        home:      true,
        date:      (2024, 11, 2),
        result:    None,
        team_id:   1,
        season_id: 2,
        phase_id:  Some(2),
    })
    .await;

    insert_actions(&db, 1, 1, "atacar", "#", Some("4"), 3).await;
    insert_actions(&db, 1, 1, "atacar", "=", Some("2"), 1).await;
    insert_actions(&db, 1, 2, "saque", "#", None, 1).await;
    insert_actions(&db, 1, 2, "recepción", "+", None, 1).await;

    insert_actions(&db, 2, 1, "atacar", "#", Some("4"), 1).await;
    insert_actions(&db, 2, 1, "atacar", "/", Some("4"), 1).await;
    insert_actions(&db, 2, 2, "bloqueo", "#", None, 1).await;
    insert_actions(&db, 2, 3, "atacar", "#", Some("1"), 2).await;

    db
}

/// Router over the given database with default cache and CORS settings
pub fn app(db: DbConn) -> Router { create_app_router(AppState::new(db, CacheConfig::default()), CorsConfig::default()) }

/// Send a GET request and decode the JSON body
pub async fn get_json(app: &Router, uri: &str) -> (u16, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
