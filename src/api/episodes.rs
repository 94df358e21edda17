use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, EpisodeDetailDto};

/// Episode detail context with its show and the neighboring episodes of the
/// same season.
pub async fn episode_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EpisodeDetailDto>>, ApiError> {
    let store = &state.store;

    let episode = store
        .get_episode(id)
        .await?
        .ok_or_else(|| ApiError::episode_not_found(id))?;

    let show = store
        .get_show(episode.tv_show_id)
        .await?
        .ok_or_else(|| ApiError::show_not_found(episode.tv_show_id))?;

    let (prev, next) = store.episode_neighbors(&episode).await?;

    Ok(Json(ApiResponse::success(EpisodeDetailDto {
        episode: episode.into(),
        show: show.into(),
        prev_episode: prev.map(Into::into),
        next_episode: next.map(Into::into),
    })))
}
