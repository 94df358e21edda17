use axum::{Json, extract::State, http::HeaderMap};
use std::sync::Arc;
use tower_sessions::Session;

use super::account;
use super::{ActiveProfileDto, ApiError, ApiResponse, AppState, HomeDto};

const FEATURED_LIMIT: u64 = 6;
const RECENT_LIMIT: u64 = 12;
const GENRE_LIMIT: u64 = 8;

/// Home context: featured and recent content, genre rail, and the active
/// profile's saved movies when a profile is selected.
pub async fn home_context(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Json<ApiResponse<HomeDto>>, ApiError> {
    let store = &state.store;

    let featured_movies = store.featured_movies(FEATURED_LIMIT).await?;
    let featured_shows = store.featured_shows(FEATURED_LIMIT).await?;
    let genres = store.list_genres(Some(GENRE_LIMIT)).await?;
    let recent_movies = store.recent_movies(RECENT_LIMIT).await?;
    let recent_shows = store.recent_shows(RECENT_LIMIT).await?;

    let account_id = account::session_account(&headers, &session).await;
    let active = account::active_profile(&session).await;

    let my_list_movies = match (&account_id, &active) {
        (Some(_), Some((profile_id, _))) => {
            let ids = store.watchlist_movie_ids(*profile_id).await?;
            store.get_movies_by_ids(&ids).await?
        }
        _ => Vec::new(),
    };

    Ok(Json(ApiResponse::success(HomeDto {
        featured_movies: featured_movies.into_iter().map(Into::into).collect(),
        featured_shows: featured_shows.into_iter().map(Into::into).collect(),
        genres: genres.into_iter().map(Into::into).collect(),
        recent_movies: recent_movies.into_iter().map(Into::into).collect(),
        recent_shows: recent_shows.into_iter().map(Into::into).collect(),
        my_list_movies: my_list_movies.into_iter().map(Into::into).collect(),
        active_profile: active.map(|(id, name)| ActiveProfileDto { id, name }),
    })))
}
