//! # API Integration Tests
//!
//! Drives the full router against a seeded in-memory database.

mod common;

#[cfg(test)]
mod catalog_tests {
    use crate::common::{app, get_json, seeded_db};

    #[tokio::test]
    async fn test_health() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/health").await;
        assert_eq!(status, 200);
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_teams_and_cache_flag() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/context/teams").await;
        assert_eq!(status, 200);
        assert_eq!(json["cached"], false);
        let teams = json["data"].as_array().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0]["display_name"], "Club Volei A");

        let (_, again) = get_json(&app, "/api/v1/context/teams").await;
        assert_eq!(again["cached"], true);
    }

    #[tokio::test]
    async fn test_seasons_newest_first() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/context/seasons").await;
        assert_eq!(json["data"][0]["name"], "2024-25");
        assert_eq!(json["data"][0]["active"], true);
        assert_eq!(json["data"][1]["name"], "2023-24");
    }

    #[tokio::test]
    async fn test_phases_of_season() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/context/seasons/2/phases").await;
        assert_eq!(status, 200);
        let names: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Copa", "Liga"]);
    }

    #[tokio::test]
    async fn test_phases_of_unknown_season() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/context/seasons/99/phases").await;
        assert_eq!(status, 404);
        assert_eq!(json["code"], "NOT_FOUND");

        let (status, _) = get_json(&app, "/api/v1/context/seasons/abc/phases").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn test_matches_newest_first() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/matches?team_id=1&season_id=2").await;
        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(json["data"][2]["label"], "vs Sant Cugat (home)");
        assert_eq!(json["data"][2]["phase"], "Liga");
    }

    #[tokio::test]
    async fn test_matches_filtered_by_phase() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/matches?team_id=1&season_id=2&phase_id=1").await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_phase_from_other_season_is_dropped() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/matches?team_id=1&season_id=2&phase_id=3").await;
        assert_eq!(status, 200);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_active_players_only() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/players?team_id=1").await;
        let players = json["data"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0]["label"], "Garcia Laia (#7)");
        assert_eq!(players[1]["surname"], "Puig");
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let app = app(seeded_db().await);
        let (status, _) = get_json(&app, "/api/v1/players?team_id=42").await;
        assert_eq!(status, 404);
    }
}

#[cfg(test)]
mod summary_tests {
    use crate::common::{app, empty_db, get_json, insert_season, insert_team, seeded_db};

    #[tokio::test]
    async fn test_summary_counts() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/summary?team_id=1&season_id=2").await;
        assert_eq!(status, 200);
        let data = &json["data"];
        assert_eq!(data["matches"], 3);
        assert_eq!(data["home_matches"], 2);
        assert_eq!(data["away_matches"], 1);
        assert_eq!(data["played"], 2);
        assert_eq!(data["last_match"]["id"], 3);
        assert_eq!(data["context"]["team"]["display_name"], "Club Volei A");
        assert!(data["context"].get("dropped_phase").is_none());
    }

    #[tokio::test]
    async fn test_summary_reports_dropped_phase() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/summary?team_id=1&season_id=2&phase_id=3").await;
        assert_eq!(json["data"]["context"]["dropped_phase"], 3);
        assert!(json["data"]["context"]["phase"].is_null());
        assert_eq!(json["data"]["matches"], 3);
    }

    #[tokio::test]
    async fn test_summary_of_empty_context() {
        let db = empty_db().await;
        insert_team(&db, 1, "Club Volei", None).await;
        insert_season(&db, 1, "2024-25", true).await;
        let app = app(db);

        let (status, json) = get_json(&app, "/api/v1/summary?team_id=1&season_id=1").await;
        assert_eq!(status, 200);
        assert_eq!(json["data"]["matches"], 0);
        assert!(json["data"]["last_match"].is_null());
    }

    #[tokio::test]
    async fn test_summary_parameter_errors() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/summary?team_id=1").await;
        assert_eq!(status, 400);
        assert_eq!(json["code"], "BAD_REQUEST");

        let (status, json) = get_json(&app, "/api/v1/summary?team_id=0&season_id=2").await;
        assert_eq!(status, 422);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[cfg(test)]
mod report_tests {
    use crate::common::{app, get_json, insert_unmarked_action, seeded_db};

    #[tokio::test]
    async fn test_match_report() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/matches/1/report").await;
        assert_eq!(status, 200);
        let data = &json["data"];
        assert_eq!(data["match"]["opponent"], "Sant Cugat");
        assert_eq!(data["has_data"], true);
        assert_eq!(data["aggregate"]["overall"]["total"], 6);
        assert_eq!(data["aggregate"]["points"]["total"], 4);
        assert_eq!(data["aggregate"]["players"].as_array().unwrap().len(), 2);
        assert_eq!(data["top_scorers"][0]["player_id"], 1);
        assert_eq!(data["top_scorers"][0]["value"], 3.0);
    }

    #[tokio::test]
    async fn test_match_report_counts_rows_without_mark() {
        let db = seeded_db().await;
        insert_unmarked_action(&db, 1, 1, "atacar").await;
        let app = app(db);

        let (status, json) = get_json(&app, "/api/v1/matches/1/report").await;
        assert_eq!(status, 200);
        let data = &json["data"];
        assert_eq!(data["aggregate"]["overall"]["total"], 7);
        assert_eq!(data["aggregate"]["points"]["total"], 4);
        let garcia = data["aggregate"]["players"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["player_id"] == 1)
            .unwrap();
        assert_eq!(garcia["overall"]["total"], 5);
        assert_eq!(data["top_scorers"][0]["value"], 3.0);
    }

    #[tokio::test]
    async fn test_match_report_includes_former_players() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/matches/2/report").await;
        let names: Vec<&str> = json["data"]["aggregate"]["players"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Garcia Laia", "Puig Marta", "Soler Anna"]);
    }

    #[tokio::test]
    async fn test_match_without_actions_reports_zeroes() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/matches/3/report").await;
        assert_eq!(status, 200);
        let data = &json["data"];
        assert_eq!(data["has_data"], false);
        let players = data["aggregate"]["players"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        assert!(players
            .iter()
            .all(|p| p["overall"]["total"] == 0));
        assert!(data["top_scorers"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_match() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/matches/99/report").await;
        assert_eq!(status, 404);
        assert_eq!(json["message"], "Match 99 not found");
    }

    #[tokio::test]
    async fn test_player_profile_over_context() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/players/1/profile?team_id=1&season_id=2").await;
        assert_eq!(status, 200);
        let data = &json["data"];
        assert_eq!(data["matches"].as_array().unwrap().len(), 3);
        assert_eq!(data["line"]["overall"]["total"], 6);
        assert_eq!(data["line"]["points"]["attack"], 4);
        assert_eq!(data["attack_zones"][0]["zone"], "4");
        assert_eq!(data["attack_zones"][0]["count"], 5);
    }

    #[tokio::test]
    async fn test_player_profile_single_match() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/players/1/profile?team_id=1&season_id=2&match_id=2").await;
        assert_eq!(json["data"]["matches"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"]["line"]["overall"]["total"], 2);
    }

    #[tokio::test]
    async fn test_player_profile_without_data() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/players/2/profile?team_id=1&season_id=2&match_id=3").await;
        assert_eq!(status, 200);
        assert_eq!(json["data"]["has_data"], false);
        assert_eq!(json["data"]["line"]["overall"]["total"], 0);
    }

    #[tokio::test]
    async fn test_player_profile_errors() {
        let app = app(seeded_db().await);
        let (status, _) = get_json(&app, "/api/v1/players/99/profile?team_id=1&season_id=2").await;
        assert_eq!(status, 404);

        let (status, json) = get_json(&app, "/api/v1/players/1/profile?team_id=1&season_id=2&match_id=99").await;
        assert_eq!(status, 400);
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[cfg(test)]
mod comparison_tests {
    use crate::common::{app, get_json, seeded_db};

    #[tokio::test]
    async fn test_compare_match_with_itself() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/compare?match_a=1&match_b=1").await;
        assert_eq!(status, 200);
        let comparison = &json["data"]["comparison"];
        assert_eq!(comparison["overall_delta"]["total"], 0);
        assert_eq!(comparison["points_delta"], 0);
        assert!(comparison["rows"]
            .as_array()
            .unwrap()
            .iter()
            .all(|row| row["delta"]["total"] == 0 && row["delta"]["points"] == 0));
    }

    #[tokio::test]
    async fn test_compare_union_of_kinds() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/compare?match_a=1&match_b=2").await;
        let comparison = &json["data"]["comparison"];
        let kinds: Vec<&str> = comparison["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["saque", "recepción", "atacar", "bloqueo"]);
        assert_eq!(comparison["overall_delta"]["total"], 1);
        assert_eq!(json["data"]["match_b"]["venue"], "away");
    }

    #[tokio::test]
    async fn test_compare_unknown_match() {
        let app = app(seeded_db().await);
        let (status, _) = get_json(&app, "/api/v1/compare?match_a=1&match_b=99").await;
        assert_eq!(status, 404);
    }
}

#[cfg(test)]
mod ranking_tests {
    use crate::common::{app, get_json, seeded_db};

    fn ids(json: &serde_json::Value) -> Vec<i64> {
        json["data"]["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["player_id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_points_ranking_with_tie_break() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2").await;
        assert_eq!(status, 200);
        assert_eq!(json["data"]["metric"], "points");
        assert_eq!(json["data"]["matches"], 3);
        assert_eq!(ids(&json), vec![1, 2, 3]);
        assert_eq!(json["data"]["entries"][2]["name"], "Soler Anna");
        assert_eq!(json["data"]["entries"][2]["rank"], 3);
    }

    #[tokio::test]
    async fn test_attempts_ranking() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2&metric=attempts").await;
        assert_eq!(ids(&json), vec![1, 2, 3]);
        assert_eq!(json["data"]["entries"][0]["value"], 6.0);
    }

    #[tokio::test]
    async fn test_ranking_limit_is_clamped() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2&limit=1").await;
        assert_eq!(ids(&json), vec![1]);

        let (_, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2&limit=0").await;
        assert_eq!(json["data"]["limit"], 1);
    }

    #[tokio::test]
    async fn test_ranking_of_phase_without_actions() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2&phase_id=2").await;
        assert_eq!(status, 200);
        assert!(json["data"]["entries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_metric() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/rankings?team_id=1&season_id=2&metric=kills").await;
        assert_eq!(status, 422);
        assert_eq!(json["message"], "Unknown ranking metric 'kills'");
    }
}

#[cfg(test)]
mod envelope_tests {
    use axum::{body::Body, http::Request};
    use sea_orm::Database;
    use tower::ServiceExt;

    use crate::common::{app, get_json, init_test_env, seeded_db};

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = app(seeded_db().await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/context/seasons")
                    .header("x-request-id", "dashboard-req-0001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "dashboard-req-0001");
    }

    #[tokio::test]
    async fn test_request_id_in_body() {
        let app = app(seeded_db().await);
        let (_, json) = get_json(&app, "/api/v1/context/seasons").await;
        assert!(json["requestId"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app(seeded_db().await);
        let (status, json) = get_json(&app, "/api/v1/nope").await;
        assert_eq!(status, 404);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_database_failure_is_reported() {
        init_test_env();
        // no tables: every query fails
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let app = app(db);
        let (status, json) = get_json(&app, "/api/v1/context/teams").await;
        assert_eq!(status, 500);
        assert_eq!(json["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = app(seeded_db().await);
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/v1/rankings")
                    .header("origin", "http://dashboard.local")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 204);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://dashboard.local"
        );
    }
}
