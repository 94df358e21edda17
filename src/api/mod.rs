use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use metrics_exporter_prometheus::PrometheusHandle;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::EnrichmentService;

pub mod account;
mod episodes;
mod error;
mod genres;
mod home;
mod movies;
mod observability;
mod profiles;
mod reviews;
mod search;
mod shows;
mod types;
mod watchlist;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub enrichment: EnrichmentService,
    pub prometheus_handle: Option<PrometheusHandle>,
}

pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::new(&config.general.database_path).await?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.tmdb.timeout_seconds))
        .user_agent("Flixarr/1.0")
        .pool_max_idle_per_host(4)
        .build()?;

    let tmdb = if config.tmdb.api_key.is_empty() {
        None
    } else {
        Some(TmdbClient::new(http_client, config.tmdb.api_key.clone()))
    };
    let enrichment = EnrichmentService::new(tmdb);

    Ok(Arc::new(AppState {
        store,
        config,
        enrichment,
        prometheus_handle,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let idle_minutes = state.config.server.session_idle_minutes;

    let protected_routes = create_protected_router();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(idle_minutes)));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/home", get(home::home_context))
        .route("/movies/{id}", get(movies::movie_detail))
        .route("/shows/{id}", get(shows::show_detail))
        .route("/episodes/{id}", get(episodes::episode_detail))
        .route("/search", get(search::search))
        .route("/genres/{id}", get(genres::genre_view))
        .route("/metrics", get(observability::get_metrics))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles", post(profiles::create_profile))
        .route("/profiles/{id}", delete(profiles::delete_profile))
        .route("/profiles/{id}/activate", post(profiles::activate_profile))
        .route("/watchlist", get(watchlist::view_watchlist))
        .route("/watchlist/add", post(watchlist::add_to_watchlist))
        .route("/watchlist/remove", post(watchlist::remove_from_watchlist))
        .route("/reviews", post(reviews::submit_review))
        .route_layer(middleware::from_fn(account::account_middleware))
}
