use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::account;
use super::{ApiError, ApiResponse, AppState, MovieDetailDto};
use crate::domain::MediaRef;

const REVIEW_LIMIT: u64 = 5;

/// Movie detail context: catalog data, latest reviews, watchlist flag for
/// the active profile, and best-effort TMDB enrichment.
pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieDetailDto>>, ApiError> {
    let store = &state.store;

    let movie = store
        .get_movie(id)
        .await?
        .ok_or_else(|| ApiError::movie_not_found(id))?;

    let genres = store.genres_for_movie(id).await?;
    let reviews = store
        .latest_reviews(MediaRef::Movie(id), REVIEW_LIMIT)
        .await?;

    let in_watchlist = match account::active_profile(&session).await {
        Some((profile_id, _)) => {
            store
                .watchlist_contains(profile_id, MediaRef::Movie(id))
                .await?
        }
        None => false,
    };

    // Best-effort: failures inside the service degrade to empty fields.
    let enrichment = state
        .enrichment
        .enrich_movie(&movie.title, &movie.release_date)
        .await;

    Ok(Json(ApiResponse::success(MovieDetailDto {
        movie: movie.into(),
        genres: genres.into_iter().map(Into::into).collect(),
        reviews: reviews.into_iter().map(Into::into).collect(),
        in_watchlist,
        enrichment,
    })))
}
