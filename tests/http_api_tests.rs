use eventcat::catalog::Status;
use eventcat::server::{self, AppState, GetRaceResponse, GetSportResponse, ListRacesResponse, ListSportsResponse};
use eventcat::storage::{Store, StoreOptions};
use serde_json::json;

async fn spawn_server(rows: usize) -> (String, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = Store::open(&StoreOptions::file(tmp.path().join("events.db"))).expect("open store");
    let state = AppState::new(store);
    let seeding = state.clone();
    tokio::task::spawn_blocking(move || seeding.seed(rows)).await.unwrap().expect("seed");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server::serve(listener, state).await;
    });
    (format!("http://{}", addr), tmp)
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (base, _tmp) = spawn_server(1).await;
    let body = reqwest::get(format!("{}/health", base)).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn list_races_without_filter_returns_everything() {
    let (base, _tmp) = spawn_server(30).await;
    let client = reqwest::Client::new();
    let resp = client.post(format!("{}/v1/list-races", base)).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: ListRacesResponse = resp.json().await.unwrap();
    assert_eq!(body.races.len(), 30);
}

#[tokio::test]
async fn list_with_empty_body_is_unfiltered() {
    let (base, _tmp) = spawn_server(12).await;
    let client = reqwest::Client::new();
    let resp = client.post(format!("{}/v1/list-races", base)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: ListRacesResponse = resp.json().await.unwrap();
    assert_eq!(body.races.len(), 12);

    let resp = client.post(format!("{}/v1/list-sports", base)).body("").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: ListSportsResponse = resp.json().await.unwrap();
    assert_eq!(body.sports.len(), 12);
}

#[tokio::test]
async fn malformed_filter_is_a_json_bad_request() {
    let (base, _tmp) = spawn_server(4).await;
    let client = reqwest::Client::new();
    for path in ["list-races", "list-sports"] {
        let resp = client
            .post(format!("{}/v1/{}", base, path))
            .json(&json!({ "filter": { "sortBy": {} } }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let err: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(err["type"], "user_input");
        assert_eq!(err["code"], "invalid_filter");
        assert!(err["message"].as_str().unwrap().contains("direction"));
    }
}

#[tokio::test]
async fn list_races_honours_meeting_and_visibility_filter() {
    let (base, _tmp) = spawn_server(60).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/v1/list-races", base))
        .json(&json!({ "filter": { "meetingIds": [1, 2, 3], "onlyVisible": true } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: ListRacesResponse = resp.json().await.unwrap();
    assert!(body.races.iter().all(|r| r.visible && [1, 2, 3].contains(&r.meeting_id)));
}

#[tokio::test]
async fn list_sports_sorted_by_advertised_start() {
    let (base, _tmp) = spawn_server(40).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/v1/list-sports", base))
        .json(&json!({ "filter": { "sortBy": { "field": "advertised_start_time", "direction": "DESC" } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: ListSportsResponse = resp.json().await.unwrap();
    assert_eq!(body.sports.len(), 40);
    assert!(body.sports.windows(2).all(|w| w[0].advertised_start_time >= w[1].advertised_start_time));
}

#[tokio::test]
async fn invalid_sort_is_a_bad_request() {
    let (base, _tmp) = spawn_server(5).await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/v1/list-sports", base))
        .json(&json!({ "filter": { "sortBy": { "field": "id; DROP TABLE sports", "direction": "ASC" } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(err["type"], "user_input");
    assert_eq!(err["code"], "invalid_sort");

    // Still there.
    let resp = client.post(format!("{}/v1/list-sports", base)).json(&json!({})).send().await.unwrap();
    let body: ListSportsResponse = resp.json().await.unwrap();
    assert_eq!(body.sports.len(), 5);
}

#[tokio::test]
async fn get_race_and_sport_by_id() {
    let (base, _tmp) = spawn_server(10).await;
    let race: GetRaceResponse = reqwest::get(format!("{}/v1/races/4", base)).await.unwrap().json().await.unwrap();
    assert_eq!(race.race.id, 4);
    assert!(matches!(race.race.status, Status::Open | Status::Closed));

    let sport: GetSportResponse = reqwest::get(format!("{}/v1/sports/7", base)).await.unwrap().json().await.unwrap();
    assert_eq!(sport.sport.id, 7);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (base, _tmp) = spawn_server(3).await;
    let resp = reqwest::get(format!("{}/v1/races/999", base)).await.unwrap();
    assert_eq!(resp.status(), 404);
    let err: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(err["code"], "not_found");
}
