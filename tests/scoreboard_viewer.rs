mod support;

use axum::http::StatusCode;
use serde_json::json;

use fantasy_console::config::settings::ApiSettings;
use fantasy_console::errors::{ApiError, ConsoleError};
use fantasy_console::render::render_scoreboard;
use fantasy_console::services::ScoreboardService;
use support::{fail, ok, FakeBackend};

#[tokio::test]
async fn test_season_standings_rows() {
    let backend = FakeBackend::start(|_| {
        ok(json!({"rows": [
            {"team": "Bravo", "points_1x2": 12.5, "bonus": 4, "coach": 3, "total": 19.5},
            {"team": "Alpha", "points_1x2": 10, "bonus": 2, "coach": 1, "total": 13}
        ]}))
    })
    .await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let standings = service.season_standings().await.unwrap();

    assert_eq!(backend.lines(), vec!["GET /api/season/standings"]);
    assert_eq!(standings.matchday, None);
    assert_eq!(standings.rows.len(), 2);
    assert_eq!(standings.rows[0].team, "Bravo");
    assert_eq!(standings.rows[0].total, 19.5);

    let rendered = render_scoreboard(&standings);
    assert!(rendered.contains("Season standings"));
    assert!(rendered.contains("19.5"));
}

#[tokio::test]
async fn test_matchday_scoreboard_accepts_round_field_names() {
    let backend = FakeBackend::start(|_| {
        ok(json!({"rows": [
            {"team": "Alpha", "points_1x2": 6.1, "bonus": 2, "coach_points": 1, "total_round": 9.1}
        ]}))
    })
    .await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let scoreboard = service.matchday_scoreboard(4).await.unwrap();

    assert_eq!(backend.lines(), vec!["GET /api/rounds/4/scoreboard"]);
    assert_eq!(scoreboard.matchday, Some(4));
    assert_eq!(scoreboard.rows[0].coach, 1.0);
    assert_eq!(scoreboard.rows[0].total, 9.1);
    assert!(render_scoreboard(&scoreboard).contains("Scoreboard matchday 4"));
}

#[tokio::test]
async fn test_matchday_from_response_is_kept() {
    let backend = FakeBackend::start(|_| ok(json!({"matchday": 6, "rows": []}))).await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let scoreboard = service.matchday_scoreboard(5).await.unwrap();

    assert_eq!(scoreboard.matchday, Some(6));
    assert!(render_scoreboard(&scoreboard).contains("No scoreboard data."));
}

#[tokio::test]
async fn test_error_marker_in_successful_body() {
    let backend = FakeBackend::start(|_| ok(json!({"rows": [], "error": "Scoring not finished yet"}))).await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let err = service.matchday_scoreboard(2).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Api(ApiError::Reported(_))));
    assert_eq!(err.to_string(), "Scoring not finished yet");
}

#[tokio::test]
async fn test_not_found_detail_is_message() {
    let backend = FakeBackend::start(|_| fail(StatusCode::NOT_FOUND, json!({"detail": "Round not found."}))).await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let err = service.matchday_scoreboard(38).await.unwrap_err();

    assert_eq!(err.to_string(), "Round not found.");
}

#[tokio::test]
async fn test_non_json_failure_uses_status_line() {
    let backend = FakeBackend::start(|_| (StatusCode::BAD_GATEWAY, "<html>upstream</html>".to_string())).await;
    let service = ScoreboardService::new(&backend.settings()).unwrap();

    let err = service.season_standings().await.unwrap_err();

    assert_eq!(err.to_string(), "502 Bad Gateway");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = ApiSettings {
        base_url: format!("http://127.0.0.1:{}", port),
        user_agent: "FantasyConsoleTests/1.0",
    };
    let service = ScoreboardService::new(&settings).unwrap();

    let err = service.season_standings().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Api(ApiError::Transport(_))));
}
