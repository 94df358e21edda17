use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, GenreViewDto};

/// All movies and shows linked to one genre.
pub async fn genre_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<GenreViewDto>>, ApiError> {
    let store = &state.store;

    let genre = store
        .get_genre(id)
        .await?
        .ok_or_else(|| ApiError::genre_not_found(id))?;

    let movies = store.movies_for_genre(id).await?;
    let shows = store.shows_for_genre(id).await?;

    Ok(Json(ApiResponse::success(GenreViewDto {
        genre: genre.into(),
        movies: movies.into_iter().map(Into::into).collect(),
        shows: shows.into_iter().map(Into::into).collect(),
    })))
}
