use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;

use crate::entities::{genres, movie_genres, movies, prelude::*, tv_show_genres, tv_shows};

/// Input for inserting a movie, used by seeding and tests.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub duration: i32,
    pub rating: f32,
    pub poster: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: bool,
    pub genre_ids: Vec<i32>,
}

/// Input for inserting a TV show.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub rating: f32,
    pub poster: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: bool,
    pub genre_ids: Vec<i32>,
}

/// Repository for genres, movies, and TV shows.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Genres
    // ========================================================================

    pub async fn list_genres(&self, limit: Option<u64>) -> Result<Vec<genres::Model>> {
        let mut query = Genres::find().order_by_asc(genres::Column::Name);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&self.conn).await?)
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<genres::Model>> {
        Ok(Genres::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn insert_genre(&self, name: &str, description: &str) -> Result<i32> {
        let active = genres::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };
        let res = Genres::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn get_movie(&self, id: i32) -> Result<Option<movies::Model>> {
        Ok(Movies::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_movies_by_ids(&self, ids: &[i32]) -> Result<Vec<movies::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Movies::find()
            .filter(movies::Column::Id.is_in(ids.iter().copied()))
            .order_by_desc(movies::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn featured_movies(&self, limit: u64) -> Result<Vec<movies::Model>> {
        Ok(Movies::find()
            .filter(movies::Column::Featured.eq(true))
            .order_by_desc(movies::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn recent_movies(&self, limit: u64) -> Result<Vec<movies::Model>> {
        Ok(Movies::find()
            .order_by_desc(movies::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn movies_for_genre(&self, genre_id: i32) -> Result<Vec<movies::Model>> {
        Ok(Movies::find()
            .inner_join(MovieGenres)
            .filter(movie_genres::Column::GenreId.eq(genre_id))
            .order_by_desc(movies::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    /// Case-insensitive substring search over title and description.
    pub async fn search_movies(&self, query: &str) -> Result<Vec<movies::Model>> {
        Ok(Movies::find()
            .filter(
                Condition::any()
                    .add(movies::Column::Title.contains(query))
                    .add(movies::Column::Description.contains(query)),
            )
            .order_by_desc(movies::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn genres_for_movie(&self, movie_id: i32) -> Result<Vec<genres::Model>> {
        Ok(Genres::find()
            .inner_join(MovieGenres)
            .filter(movie_genres::Column::MovieId.eq(movie_id))
            .order_by_asc(genres::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn insert_movie(&self, movie: &NewMovie) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = movies::ActiveModel {
            title: Set(movie.title.clone()),
            description: Set(movie.description.clone()),
            release_date: Set(movie.release_date.clone()),
            duration: Set(movie.duration),
            rating: Set(movie.rating),
            poster: Set(movie.poster.clone()),
            trailer_url: Set(movie.trailer_url.clone()),
            featured: Set(movie.featured),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let movie_id = Movies::insert(active).exec(&self.conn).await?.last_insert_id;

        for genre_id in &movie.genre_ids {
            movie_genres::ActiveModel {
                movie_id: Set(movie_id),
                genre_id: Set(*genre_id),
            }
            .insert(&self.conn)
            .await?;
        }

        info!("Added movie {}: {}", movie_id, movie.title);
        Ok(movie_id)
    }

    pub async fn remove_movie(&self, id: i32) -> Result<bool> {
        let res = Movies::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    // ========================================================================
    // TV shows
    // ========================================================================

    pub async fn get_show(&self, id: i32) -> Result<Option<tv_shows::Model>> {
        Ok(TvShows::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn featured_shows(&self, limit: u64) -> Result<Vec<tv_shows::Model>> {
        Ok(TvShows::find()
            .filter(tv_shows::Column::Featured.eq(true))
            .order_by_desc(tv_shows::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn recent_shows(&self, limit: u64) -> Result<Vec<tv_shows::Model>> {
        Ok(TvShows::find()
            .order_by_desc(tv_shows::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn shows_for_genre(&self, genre_id: i32) -> Result<Vec<tv_shows::Model>> {
        Ok(TvShows::find()
            .inner_join(TvShowGenres)
            .filter(tv_show_genres::Column::GenreId.eq(genre_id))
            .order_by_desc(tv_shows::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn search_shows(&self, query: &str) -> Result<Vec<tv_shows::Model>> {
        Ok(TvShows::find()
            .filter(
                Condition::any()
                    .add(tv_shows::Column::Title.contains(query))
                    .add(tv_shows::Column::Description.contains(query)),
            )
            .order_by_desc(tv_shows::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn genres_for_show(&self, show_id: i32) -> Result<Vec<genres::Model>> {
        Ok(Genres::find()
            .inner_join(TvShowGenres)
            .filter(tv_show_genres::Column::TvShowId.eq(show_id))
            .order_by_asc(genres::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn insert_show(&self, show: &NewShow) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = tv_shows::ActiveModel {
            title: Set(show.title.clone()),
            description: Set(show.description.clone()),
            release_date: Set(show.release_date.clone()),
            rating: Set(show.rating),
            poster: Set(show.poster.clone()),
            trailer_url: Set(show.trailer_url.clone()),
            featured: Set(show.featured),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let show_id = TvShows::insert(active).exec(&self.conn).await?.last_insert_id;

        for genre_id in &show.genre_ids {
            tv_show_genres::ActiveModel {
                tv_show_id: Set(show_id),
                genre_id: Set(*genre_id),
            }
            .insert(&self.conn)
            .await?;
        }

        info!("Added TV show {}: {}", show_id, show.title);
        Ok(show_id)
    }

    pub async fn remove_show(&self, id: i32) -> Result<bool> {
        let res = TvShows::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
