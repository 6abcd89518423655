//! Open-data client tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shot_report::config::{AppConfig, OpenDataConfig};
use shot_report::data::loader::load_events_file;
use shot_report::data::open_data::OpenDataClient;
use shot_report::data::source::{load_or_empty, EventSource};
use shot_report::report::{analyze, ReportScope};

fn client_for(server: &MockServer) -> OpenDataClient {
    OpenDataClient::new(&OpenDataConfig {
        base_url: format!("{}/data", server.uri()),
        request_timeout_seconds: 5,
        user_agent: "shot-report-test".to_string(),
    })
    .expect("client should build")
}

fn events_body() -> serde_json::Value {
    json!([
        {"id": "e1", "type": {"name": "Shot"}, "team": {"name": "A"},
         "player": {"name": "p1"}, "location": [110.0, 40.0],
         "shot": {"statsbomb_xg": 0.4, "outcome": {"name": "Goal"}}},
        {"id": "e2", "type": {"name": "Pass"}, "team": {"name": "A"},
         "player": {"name": "p1"}, "location": [50.0, 40.0]}
    ])
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("shot_report_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn competitions_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/competitions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"competition_id": 9, "season_id": 281, "country_name": "Germany",
             "competition_name": "1. Bundesliga", "competition_gender": "male",
             "season_name": "2023/2024", "match_updated": "2024-07-15T14:15:54.671676"}
        ])))
        .mount(&server)
        .await;

    let competitions = client_for(&server).competitions().await.unwrap();
    assert_eq!(competitions.len(), 1);
    assert_eq!(competitions[0].competition_id, 9);
    assert_eq!(competitions[0].season_name, "2023/2024");
    assert_eq!(competitions[0].country_name.as_deref(), Some("Germany"));
}

#[tokio::test]
async fn matches_flatten_team_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/matches/9/281.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"match_id": 3895302, "match_date": "2024-04-14",
             "home_team": {"home_team_id": 904, "home_team_name": "Bayer Leverkusen"},
             "away_team": {"away_team_id": 176, "away_team_name": "Werder Bremen"},
             "home_score": 5, "away_score": 0}
        ])))
        .mount(&server)
        .await;

    let matches = client_for(&server).matches(9, 281).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].to_string(), "Bayer Leverkusen vs Werder Bremen (5-0)");
}

#[tokio::test]
async fn events_are_tagged_with_match_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let events = client_for(&server).events(42).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.match_id == Some(42)));
    assert_eq!(events[0].shot_outcome.as_deref(), Some("Goal"));
}

#[tokio::test]
async fn missing_match_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/404.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client_for(&server).events(404).await.is_err());
}

#[tokio::test]
async fn download_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("download");
    let client = client_for(&server);

    let dest = dir.join("7.json");

    let first = client.download_events(7, &dest).await.unwrap();
    let second = client.download_events(7, &dest).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, dest);
    assert!(!dir.join("7.json.tmp").exists());

    let events = load_events_file(&first).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].match_id, Some(7));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn non_json_download_is_not_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/8.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let dir = temp_dir("bad_download");
    let dest = dir.join("8.json");
    assert!(client_for(&server).download_events(8, &dest).await.is_err());
    assert!(!dest.exists());
}

#[tokio::test]
async fn truncated_cache_is_fetched_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/9.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir("truncated");
    std::fs::create_dir_all(&dir).unwrap();
    let dest = dir.join("9.json");
    std::fs::write(&dest, r#"[{"id": "trunc"#).unwrap();

    let path = client_for(&server).download_events(9, &dest).await.unwrap();
    let events = load_events_file(&path).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].match_id, Some(9));

    let _ = std::fs::remove_dir_all(&dir);
}

// ──────────────────────────────────────────
// Season and source loading
// ──────────────────────────────────────────

fn config_for(server: &MockServer, data_dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::from_toml(include_str!("../config/default.toml")).unwrap();
    config.open_data.base_url = format!("{}/data", server.uri());
    config.data.dir = data_dir.to_path_buf();
    config
}

async fn mount_season(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/matches/9/281.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"match_id": 101,
             "home_team": {"home_team_name": "A"}, "away_team": {"away_team_name": "B"}},
            {"match_id": 102,
             "home_team": {"home_team_name": "C"}, "away_team": {"away_team_name": "A"}}
        ])))
        .mount(server)
        .await;
    for id in [101, 102] {
        Mock::given(method("GET"))
            .and(path(format!("/data/events/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn season_events_span_every_match() {
    let server = MockServer::start().await;
    mount_season(&server).await;

    let events = client_for(&server).season_events(9, 281).await.unwrap();
    assert_eq!(events.len(), 4);

    let report = analyze(&events, &ReportScope::team("A"));
    assert_eq!(report.games_played, 2);
    assert_eq!(report.metrics.goals, 2);
    assert_eq!(report.goals_per_game, 1.0);
}

#[tokio::test]
async fn season_source_loads_through_config() {
    let server = MockServer::start().await;
    mount_season(&server).await;

    let dir = temp_dir("season_source");
    let source = EventSource::Season {
        competition_id: 9,
        season_id: 281,
    };
    let events = load_or_empty(&config_for(&server, &dir), &source).await;
    assert_eq!(analyze(&events, &ReportScope::team("A")).games_played, 2);
}

#[tokio::test]
async fn match_source_downloads_into_data_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/11.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let dir = temp_dir("match_source");
    let config = config_for(&server, &dir);
    let events = load_or_empty(&config, &EventSource::Matches(vec![11])).await;
    assert_eq!(events.len(), 2);
    assert!(config.data.match_events_path(11).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unreachable_match_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/events/404.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = temp_dir("no_data");
    let events = load_or_empty(&config_for(&server, &dir), &EventSource::Matches(vec![404])).await;
    assert!(events.is_empty());

    let report = analyze(&events, &ReportScope::team("A"));
    assert!(report.is_empty());
    assert_eq!(report.games_played, 0);
}
