use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::domain::MediaRef;
use crate::entities::{episodes, genres, movies, profiles, reviews, tv_shows, watchlist_items};

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::{NewMovie, NewShow};
pub use repositories::episode::NewEpisode;

/// Facade over the per-aggregate repositories, sharing one connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        // Every pooled connection to an in-memory SQLite database gets its
        // own empty database, so force a single connection there.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn list_genres(&self, limit: Option<u64>) -> Result<Vec<genres::Model>> {
        self.catalog_repo().list_genres(limit).await
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<genres::Model>> {
        self.catalog_repo().get_genre(id).await
    }

    pub async fn insert_genre(&self, name: &str, description: &str) -> Result<i32> {
        self.catalog_repo().insert_genre(name, description).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<movies::Model>> {
        self.catalog_repo().get_movie(id).await
    }

    pub async fn get_movies_by_ids(&self, ids: &[i32]) -> Result<Vec<movies::Model>> {
        self.catalog_repo().get_movies_by_ids(ids).await
    }

    pub async fn featured_movies(&self, limit: u64) -> Result<Vec<movies::Model>> {
        self.catalog_repo().featured_movies(limit).await
    }

    pub async fn recent_movies(&self, limit: u64) -> Result<Vec<movies::Model>> {
        self.catalog_repo().recent_movies(limit).await
    }

    pub async fn movies_for_genre(&self, genre_id: i32) -> Result<Vec<movies::Model>> {
        self.catalog_repo().movies_for_genre(genre_id).await
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<movies::Model>> {
        self.catalog_repo().search_movies(query).await
    }

    pub async fn genres_for_movie(&self, movie_id: i32) -> Result<Vec<genres::Model>> {
        self.catalog_repo().genres_for_movie(movie_id).await
    }

    pub async fn insert_movie(&self, movie: &NewMovie) -> Result<i32> {
        self.catalog_repo().insert_movie(movie).await
    }

    pub async fn remove_movie(&self, id: i32) -> Result<bool> {
        self.catalog_repo().remove_movie(id).await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<tv_shows::Model>> {
        self.catalog_repo().get_show(id).await
    }

    pub async fn featured_shows(&self, limit: u64) -> Result<Vec<tv_shows::Model>> {
        self.catalog_repo().featured_shows(limit).await
    }

    pub async fn recent_shows(&self, limit: u64) -> Result<Vec<tv_shows::Model>> {
        self.catalog_repo().recent_shows(limit).await
    }

    pub async fn shows_for_genre(&self, genre_id: i32) -> Result<Vec<tv_shows::Model>> {
        self.catalog_repo().shows_for_genre(genre_id).await
    }

    pub async fn search_shows(&self, query: &str) -> Result<Vec<tv_shows::Model>> {
        self.catalog_repo().search_shows(query).await
    }

    pub async fn genres_for_show(&self, show_id: i32) -> Result<Vec<genres::Model>> {
        self.catalog_repo().genres_for_show(show_id).await
    }

    pub async fn insert_show(&self, show: &NewShow) -> Result<i32> {
        self.catalog_repo().insert_show(show).await
    }

    pub async fn remove_show(&self, id: i32) -> Result<bool> {
        self.catalog_repo().remove_show(id).await
    }

    // ========================================================================
    // Episodes
    // ========================================================================

    pub async fn get_episode(&self, id: i32) -> Result<Option<episodes::Model>> {
        self.episode_repo().get(id).await
    }

    pub async fn episodes_for_show(&self, tv_show_id: i32) -> Result<Vec<episodes::Model>> {
        self.episode_repo().for_show(tv_show_id).await
    }

    pub async fn episode_neighbors(
        &self,
        episode: &episodes::Model,
    ) -> Result<(Option<episodes::Model>, Option<episodes::Model>)> {
        self.episode_repo().neighbors(episode).await
    }

    pub async fn insert_episode(&self, episode: &NewEpisode) -> Result<i32> {
        self.episode_repo().insert(episode).await
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    pub async fn list_profiles(&self, account_id: i32) -> Result<Vec<profiles::Model>> {
        self.profile_repo().list_for_account(account_id).await
    }

    pub async fn get_profile_for_account(
        &self,
        id: i32,
        account_id: i32,
    ) -> Result<Option<profiles::Model>> {
        self.profile_repo().get_for_account(id, account_id).await
    }

    pub async fn create_profile(
        &self,
        account_id: i32,
        name: &str,
        avatar: Option<&str>,
    ) -> Result<profiles::Model> {
        self.profile_repo().create(account_id, name, avatar).await
    }

    pub async fn remove_profile(&self, id: i32, account_id: i32) -> Result<bool> {
        self.profile_repo().remove_for_account(id, account_id).await
    }

    // ========================================================================
    // Watchlists
    // ========================================================================

    pub async fn add_to_watchlist(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        self.watchlist_repo().add(profile_id, media).await
    }

    pub async fn remove_from_watchlist(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        self.watchlist_repo().remove(profile_id, media).await
    }

    pub async fn watchlist_contains(&self, profile_id: i32, media: MediaRef) -> Result<bool> {
        self.watchlist_repo().contains(profile_id, media).await
    }

    pub async fn watchlist_for_profile(
        &self,
        profile_id: i32,
    ) -> Result<Vec<watchlist_items::Model>> {
        self.watchlist_repo().list_for_profile(profile_id).await
    }

    pub async fn watchlist_movie_ids(&self, profile_id: i32) -> Result<Vec<i32>> {
        self.watchlist_repo().movie_ids_for_profile(profile_id).await
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    pub async fn upsert_review(
        &self,
        account_id: i32,
        media: MediaRef,
        rating: i32,
        comment: &str,
    ) -> Result<reviews::Model> {
        self.review_repo()
            .upsert(account_id, media, rating, comment)
            .await
    }

    pub async fn latest_reviews(&self, media: MediaRef, limit: u64) -> Result<Vec<reviews::Model>> {
        self.review_repo().latest_for_media(media, limit).await
    }
}
