use serde::{Deserialize, Serialize};

use crate::entities::{episodes, genres, movies, profiles, reviews, tv_shows};
use crate::services::MovieEnrichment;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<genres::Model> for GenreDto {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub duration: i32,
    pub rating: f32,
    pub poster: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: bool,
}

impl From<movies::Model> for MovieDto {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration,
            rating: model.rating,
            poster: model.poster,
            trailer_url: model.trailer_url,
            featured: model.featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub rating: f32,
    pub poster: Option<String>,
    pub trailer_url: Option<String>,
    pub featured: bool,
}

impl From<tv_shows::Model> for ShowDto {
    fn from(model: tv_shows::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
            rating: model.rating,
            poster: model.poster,
            trailer_url: model.trailer_url,
            featured: model.featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeDto {
    pub id: i32,
    pub tv_show_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub video_url: String,
    pub release_date: String,
}

impl From<episodes::Model> for EpisodeDto {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: model.id,
            tv_show_id: model.tv_show_id,
            season_number: model.season_number,
            episode_number: model.episode_number,
            title: model.title,
            description: model.description,
            duration: model.duration,
            video_url: model.video_url,
            release_date: model.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewDto {
    pub id: i32,
    pub account_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<reviews::Model> for ReviewDto {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub id: i32,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: String,
}

impl From<profiles::Model> for ProfileDto {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            avatar: model.avatar,
            created_at: model.created_at,
        }
    }
}

/// Session-held "who's watching" selection, echoed in contexts that scope
/// reads to a profile.
#[derive(Debug, Serialize)]
pub struct ActiveProfileDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HomeDto {
    pub featured_movies: Vec<MovieDto>,
    pub featured_shows: Vec<ShowDto>,
    pub genres: Vec<GenreDto>,
    pub recent_movies: Vec<MovieDto>,
    pub recent_shows: Vec<ShowDto>,
    pub my_list_movies: Vec<MovieDto>,
    pub active_profile: Option<ActiveProfileDto>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailDto {
    pub movie: MovieDto,
    pub genres: Vec<GenreDto>,
    pub reviews: Vec<ReviewDto>,
    pub in_watchlist: bool,
    #[serde(flatten)]
    pub enrichment: MovieEnrichment,
}

#[derive(Debug, Serialize)]
pub struct SeasonDto {
    pub season_number: i32,
    pub episodes: Vec<EpisodeDto>,
}

#[derive(Debug, Serialize)]
pub struct ShowDetailDto {
    pub show: ShowDto,
    pub genres: Vec<GenreDto>,
    pub seasons: Vec<SeasonDto>,
    pub reviews: Vec<ReviewDto>,
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize)]
pub struct EpisodeDetailDto {
    pub episode: EpisodeDto,
    pub show: ShowDto,
    pub prev_episode: Option<EpisodeDto>,
    pub next_episode: Option<EpisodeDto>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultsDto {
    pub query: String,
    pub movies: Vec<MovieDto>,
    pub shows: Vec<ShowDto>,
}

#[derive(Debug, Serialize)]
pub struct GenreViewDto {
    pub genre: GenreDto,
    pub movies: Vec<MovieDto>,
    pub shows: Vec<ShowDto>,
}

#[derive(Debug, Serialize)]
pub struct ProfileListDto {
    pub profiles: Vec<ProfileDto>,
    pub genres: Vec<GenreDto>,
    pub active_profile: Option<ActiveProfileDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistItemDto {
    pub media_type: String,
    pub media_id: i32,
    pub title: String,
    pub poster: Option<String>,
    pub added_at: String,
}

#[derive(Debug, Serialize)]
pub struct WatchlistDto {
    pub profile: ProfileDto,
    pub items: Vec<WatchlistItemDto>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Form body shared by watchlist add/remove, mirroring the content_type +
/// content_id pair mutation forms post.
#[derive(Debug, Deserialize)]
pub struct WatchlistForm {
    pub content_type: String,
    pub content_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub content_type: String,
    pub content_id: i32,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
