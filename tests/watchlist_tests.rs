use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use flixarr::api::AppState;
use flixarr::config::Config;
use flixarr::services::seed_catalog;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = flixarr::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    seed_catalog(&state.store).await.expect("Failed to seed");

    (flixarr::api::router(state.clone()), state)
}

/// Session carried across requests via the session cookie, the way a browser
/// would. The account header only needs to be sent once.
struct TestSession {
    app: Router,
    account_id: i32,
    cookie: Option<String>,
}

impl TestSession {
    fn new(app: Router, account_id: i32) -> Self {
        Self {
            app,
            account_id,
            cookie: None,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> axum::response::Response {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let value = set_cookie.to_str().unwrap();
            self.cookie = value.split(';').next().map(str::to_string);
        }
        response
    }

    fn builder(&self, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .uri(uri)
            .header("X-Account-Id", self.account_id.to_string());
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn get_json(&mut self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .send(self.builder(uri).body(Body::empty()).unwrap())
            .await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(&mut self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .send(
                self.builder(uri)
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_form(&mut self, uri: &str, form: &str) -> axum::response::Response {
        self.send(
            self.builder(uri)
                .method("POST")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates a profile and makes it the active one, returning its id.
    async fn activate_new_profile(&mut self, name: &str) -> i64 {
        let (status, json) = self
            .post_json("/api/profiles", serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK);
        let profile_id = json["data"]["id"].as_i64().unwrap();

        let response = self
            .send(
                self.builder(&format!("/api/profiles/{profile_id}/activate"))
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        profile_id
    }
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);

    let (status, json) = alice.get_json("/api/profiles").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["profiles"].as_array().unwrap().is_empty());

    let (status, json) = alice
        .post_json("/api/profiles", serde_json::json!({ "name": "Kids" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Kids");
    let profile_id = json["data"]["id"].as_i64().unwrap();

    let (_, json) = alice.get_json("/api/profiles").await;
    assert_eq!(json["data"]["profiles"].as_array().unwrap().len(), 1);
    assert!(json["data"]["active_profile"].is_null());

    // Activation lands back on the home context.
    let response = alice
        .send(
            alice
                .builder(&format!("/api/profiles/{profile_id}/activate"))
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/home");

    let (_, json) = alice.get_json("/api/profiles").await;
    assert_eq!(json["data"]["active_profile"]["name"], "Kids");

    let response = alice
        .send(
            alice
                .builder(&format!("/api/profiles/{profile_id}"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting the active profile clears the selection.
    let (_, json) = alice.get_json("/api/profiles").await;
    assert!(json["data"]["profiles"].as_array().unwrap().is_empty());
    assert!(json["data"]["active_profile"].is_null());
}

#[tokio::test]
async fn test_profile_validation() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);

    let (status, _) = alice
        .post_json("/api/profiles", serde_json::json!({ "name": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = alice
        .post_json("/api/profiles", serde_json::json!({ "name": "x".repeat(51) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profiles_are_scoped_to_account() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app.clone(), 1);
    let mut bob = TestSession::new(app, 2);

    let (_, json) = alice
        .post_json("/api/profiles", serde_json::json!({ "name": "Alice" }))
        .await;
    let profile_id = json["data"]["id"].as_i64().unwrap();

    // Another account can neither see, activate, nor delete it.
    let (_, json) = bob.get_json("/api/profiles").await;
    assert!(json["data"]["profiles"].as_array().unwrap().is_empty());

    let response = bob
        .send(
            bob.builder(&format!("/api/profiles/{profile_id}/activate"))
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = bob
        .send(
            bob.builder(&format!("/api/profiles/{profile_id}"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watchlist_add_is_idempotent() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    let response = alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=2")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Second add of the same title is a silent no-op.
    let response = alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=2")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, json) = alice.get_json("/api/watchlist").await;
    assert_eq!(status, StatusCode::OK);
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Inception");
    assert_eq!(items[0]["media_type"], "movie");
}

#[tokio::test]
async fn test_watchlist_remove() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=1")
        .await;
    alice
        .post_form("/api/watchlist/add", "content_type=tv_show&content_id=2")
        .await;

    let (_, json) = alice.get_json("/api/watchlist").await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);

    let response = alice
        .post_form("/api/watchlist/remove", "content_type=movie&content_id=1")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Removing an absent item succeeds without changing anything.
    let response = alice
        .post_form("/api/watchlist/remove", "content_type=movie&content_id=1")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, json) = alice.get_json("/api/watchlist").await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Breaking Bad");
}

#[tokio::test]
async fn test_watchlist_mutation_without_profile_redirects_to_picker() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);

    let response = alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=1")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/profiles");

    // The rejection leaves a one-shot flash message on the picker.
    let (_, json) = alice.get_json("/api/profiles").await;
    assert_eq!(json["data"]["flash"], "Select a profile first.");

    let (_, json) = alice.get_json("/api/profiles").await;
    assert!(json["data"]["flash"].is_null());
}

#[tokio::test]
async fn test_watchlist_rejects_bad_targets() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    let response = alice
        .post_form("/api/watchlist/add", "content_type=book&content_id=1")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=999")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watchlist_movies_appear_on_home() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=5")
        .await;

    let (_, json) = alice.get_json("/api/home").await;
    let my_list = json["data"]["my_list_movies"].as_array().unwrap();
    assert_eq!(my_list.len(), 1);
    assert_eq!(my_list[0]["title"], "Interstellar");

    // Movie detail reflects the active profile's list too.
    let (_, json) = alice.get_json("/api/movies/5").await;
    assert_eq!(json["data"]["in_watchlist"], true);
    let (_, json) = alice.get_json("/api/movies/1").await;
    assert_eq!(json["data"]["in_watchlist"], false);
}

#[tokio::test]
async fn test_deleting_profile_cascades_watchlist() {
    let (app, state) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    let profile_id = alice.activate_new_profile("Main").await;

    alice
        .post_form("/api/watchlist/add", "content_type=movie&content_id=3")
        .await;

    let rows = state
        .store
        .watchlist_for_profile(profile_id as i32)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let response = alice
        .send(
            alice
                .builder(&format!("/api/profiles/{profile_id}"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = state
        .store
        .watchlist_for_profile(profile_id as i32)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_review_upsert() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    let response = alice
        .post_form(
            "/api/reviews",
            "content_type=movie&content_id=4&rating=4&comment=Great",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, json) = alice.get_json("/api/movies/4").await;
    let reviews = json["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 4);
    assert_eq!(reviews[0]["comment"], "Great");

    // Resubmitting replaces the existing review instead of adding a second.
    let response = alice
        .post_form(
            "/api/reviews",
            "content_type=movie&content_id=4&rating=2&comment=Rewatched",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, json) = alice.get_json("/api/movies/4").await;
    let reviews = json["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 2);
    assert_eq!(reviews[0]["comment"], "Rewatched");
}

#[tokio::test]
async fn test_review_validation() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);

    for rating in ["0", "6", "-1"] {
        let response = alice
            .post_form(
                "/api/reviews",
                &format!("content_type=movie&content_id=1&rating={rating}"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = alice
        .post_form("/api/reviews", "content_type=tv_show&content_id=999&rating=3")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reviews_from_different_accounts_coexist() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app.clone(), 1);
    let mut bob = TestSession::new(app, 2);

    alice
        .post_form("/api/reviews", "content_type=movie&content_id=6&rating=5")
        .await;
    bob.post_form("/api/reviews", "content_type=movie&content_id=6&rating=3")
        .await;

    let (_, json) = alice.get_json("/api/movies/6").await;
    assert_eq!(json["data"]["reviews"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_mutations_redirect_back_to_referer() {
    let (app, _) = spawn_app().await;
    let mut alice = TestSession::new(app, 1);
    alice.activate_new_profile("Main").await;

    let response = alice
        .send(
            alice
                .builder("/api/watchlist/add")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::REFERER, "/api/movies/2")
                .body(Body::from("content_type=movie&content_id=2"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/movies/2");
}
