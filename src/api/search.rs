use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SearchResultsDto};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Substring search over titles and descriptions, movies and shows as two
/// separate result sets. Blank queries short-circuit to empty results.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResultsDto>>, ApiError> {
    let query = params.q.trim().to_string();

    if query.is_empty() {
        return Ok(Json(ApiResponse::success(SearchResultsDto {
            query,
            movies: Vec::new(),
            shows: Vec::new(),
        })));
    }

    let movies = state.store.search_movies(&query).await?;
    let shows = state.store.search_shows(&query).await?;

    Ok(Json(ApiResponse::success(SearchResultsDto {
        query,
        movies: movies.into_iter().map(Into::into).collect(),
        shows: shows.into_iter().map(Into::into).collect(),
    })))
}
