use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use flixarr::api::AppState;
use flixarr::config::Config;
use flixarr::services::{EnrichmentService, seed_catalog};

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = flixarr::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    seed_catalog(&state.store).await.expect("Failed to seed");

    (flixarr::api::router(state.clone()), state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_home_context() {
    let (app, _) = spawn_app().await;

    let (status, json) = get_json(&app, "/api/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["featured_movies"].as_array().unwrap().len(), 6);
    assert_eq!(data["featured_shows"].as_array().unwrap().len(), 4);
    assert_eq!(data["genres"].as_array().unwrap().len(), 8);
    assert!(data["recent_movies"].as_array().unwrap().len() <= 12);
    assert!(data["my_list_movies"].as_array().unwrap().is_empty());
    assert!(data["active_profile"].is_null());
}

#[tokio::test]
async fn test_movie_detail() {
    let (app, _) = spawn_app().await;

    let (status, json) = get_json(&app, "/api/movies/2").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["movie"]["title"], "Inception");
    assert!(!data["genres"].as_array().unwrap().is_empty());
    assert!(data["reviews"].as_array().unwrap().is_empty());
    assert_eq!(data["in_watchlist"], false);

    // No TMDB key configured: enrichment fields are present but empty.
    assert!(data["poster_url"].is_null());
    assert!(data["backdrop_url"].is_null());
    assert!(data["trailer_url"].is_null());
}

#[tokio::test]
async fn test_movie_detail_not_found() {
    let (app, _) = spawn_app().await;

    let (status, json) = get_json(&app, "/api/movies/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_show_detail_groups_episodes_by_season() {
    let (app, _) = spawn_app().await;

    // Stranger Things: three season-1 episodes plus one season-2 episode.
    let (status, json) = get_json(&app, "/api/shows/1").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["show"]["title"], "Stranger Things");

    let seasons = data["seasons"].as_array().unwrap();
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons[0]["season_number"], 1);
    assert_eq!(seasons[0]["episodes"].as_array().unwrap().len(), 3);
    assert_eq!(seasons[1]["season_number"], 2);
    assert_eq!(seasons[1]["episodes"].as_array().unwrap().len(), 1);

    let season_one = seasons[0]["episodes"].as_array().unwrap();
    let numbers: Vec<i64> = season_one
        .iter()
        .map(|e| e["episode_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_show_without_episodes_has_no_seasons() {
    let (app, _) = spawn_app().await;

    let (status, json) = get_json(&app, "/api/shows/3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["seasons"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_episode_detail_neighbors() {
    let (app, _) = spawn_app().await;

    // Middle of season one: both neighbors present.
    let (status, json) = get_json(&app, "/api/episodes/2").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["show"]["title"], "Stranger Things");
    assert_eq!(data["prev_episode"]["episode_number"], 1);
    assert_eq!(data["next_episode"]["episode_number"], 3);

    // Sole episode of season two: neighbors never cross seasons.
    let (_, json) = get_json(&app, "/api/episodes/4").await;
    assert!(json["data"]["prev_episode"].is_null());
    assert!(json["data"]["next_episode"].is_null());

    let (status, _) = get_json(&app, "/api/episodes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_matches_title_and_description() {
    let (app, _) = spawn_app().await;

    let (status, json) = get_json(&app, "/api/search?q=Matrix").await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["movies"].as_array().unwrap().len(), 1);
    assert_eq!(data["movies"][0]["title"], "The Matrix");
    assert!(data["shows"].as_array().unwrap().is_empty());

    // Substring of a description, not a title.
    let (_, json) = get_json(&app, "/api/search?q=wormhole").await;
    assert_eq!(json["data"]["movies"][0]["title"], "Interstellar");

    // Shows are searched too.
    let (_, json) = get_json(&app, "/api/search?q=chemistry%20teacher").await;
    assert_eq!(json["data"]["shows"][0]["title"], "Breaking Bad");
}

#[tokio::test]
async fn test_blank_search_returns_empty_results() {
    let (app, _) = spawn_app().await;

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let (status, json) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["movies"].as_array().unwrap().is_empty());
        assert!(json["data"]["shows"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_genre_view() {
    let (app, _) = spawn_app().await;

    // Genre 5 is Sci-Fi in the sample catalog.
    let (status, json) = get_json(&app, "/api/genres/5").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["genre"]["name"], "Sci-Fi");

    let titles: Vec<&str> = data["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Inception"));
    assert!(titles.contains(&"Interstellar"));
    assert!(titles.contains(&"The Matrix"));
    assert!(!titles.contains(&"Pulp Fiction"));

    let (status, _) = get_json(&app, "/api/genres/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_routes_require_account() {
    let (app, _) = spawn_app().await;

    for uri in ["/api/profiles", "/api/watchlist"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unreachable_tmdb_degrades_to_empty_enrichment() {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.tmdb.api_key = "test-key".to_string();

    let state = flixarr::api::create_app_state(config.clone(), None)
        .await
        .expect("Failed to create app state");
    seed_catalog(&state.store).await.expect("Failed to seed");

    // Swap in a client pointed at a port nothing listens on.
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(250))
        .build()
        .unwrap();
    let tmdb = flixarr::clients::tmdb::TmdbClient::new(client, "test-key".to_string())
        .with_base_url("http://127.0.0.1:9");
    let state = Arc::new(AppState {
        store: state.store.clone(),
        config,
        enrichment: EnrichmentService::new(Some(tmdb)),
        prometheus_handle: None,
    });
    let app = flixarr::api::router(state);

    let (status, json) = get_json(&app, "/api/movies/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["movie"]["title"], "The Dark Knight");
    assert!(json["data"]["poster_url"].is_null());
    assert!(json["data"]["trailer_url"].is_null());
}
