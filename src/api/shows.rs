use axum::{
    Json,
    extract::{Path, State},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_sessions::Session;

use super::account;
use super::{ApiError, ApiResponse, AppState, EpisodeDto, SeasonDto, ShowDetailDto};
use crate::domain::MediaRef;
use crate::entities::episodes;

const REVIEW_LIMIT: u64 = 5;

/// Show detail context with episodes grouped by season.
pub async fn show_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ShowDetailDto>>, ApiError> {
    let store = &state.store;

    let show = store
        .get_show(id)
        .await?
        .ok_or_else(|| ApiError::show_not_found(id))?;

    let genres = store.genres_for_show(id).await?;
    let episodes = store.episodes_for_show(id).await?;
    let reviews = store.latest_reviews(MediaRef::Show(id), REVIEW_LIMIT).await?;

    let in_watchlist = match account::active_profile(&session).await {
        Some((profile_id, _)) => {
            store
                .watchlist_contains(profile_id, MediaRef::Show(id))
                .await?
        }
        None => false,
    };

    Ok(Json(ApiResponse::success(ShowDetailDto {
        show: show.into(),
        genres: genres.into_iter().map(Into::into).collect(),
        seasons: group_by_season(episodes),
        reviews: reviews.into_iter().map(Into::into).collect(),
        in_watchlist,
    })))
}

/// Seasons ascending; episode order within a season is preserved from the
/// store query (episode number ascending).
fn group_by_season(episodes: Vec<episodes::Model>) -> Vec<SeasonDto> {
    let mut seasons: BTreeMap<i32, Vec<EpisodeDto>> = BTreeMap::new();
    for episode in episodes {
        seasons
            .entry(episode.season_number)
            .or_default()
            .push(episode.into());
    }

    seasons
        .into_iter()
        .map(|(season_number, episodes)| SeasonDto {
            season_number,
            episodes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(season: i32, number: i32) -> episodes::Model {
        episodes::Model {
            id: season * 100 + number,
            tv_show_id: 1,
            season_number: season,
            episode_number: number,
            title: format!("S{season}E{number}"),
            description: String::new(),
            duration: 45,
            video_url: "https://example.com/video".to_string(),
            release_date: "2016-07-15".to_string(),
        }
    }

    #[test]
    fn seasons_sorted_ascending_with_episodes_in_input_order() {
        let grouped = group_by_season(vec![
            episode(1, 1),
            episode(1, 2),
            episode(2, 1),
            episode(3, 1),
        ]);

        let season_numbers: Vec<i32> = grouped.iter().map(|s| s.season_number).collect();
        assert_eq!(season_numbers, vec![1, 2, 3]);
        assert_eq!(grouped[0].episodes.len(), 2);
        assert_eq!(grouped[0].episodes[1].episode_number, 2);
    }

    #[test]
    fn empty_episode_list_yields_no_seasons() {
        assert!(group_by_season(Vec::new()).is_empty());
    }
}
