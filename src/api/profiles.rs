use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Redirect,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::account::{self, CurrentAccount};
use super::{
    ActiveProfileDto, ApiError, ApiResponse, AppState, CreateProfileRequest, ProfileDto,
    ProfileListDto,
};

const GENRE_LIMIT: u64 = 8;

/// "Who's watching?" context: the account's profiles plus any pending flash
/// message (e.g. after a rejected watchlist mutation).
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
) -> Result<Json<ApiResponse<ProfileListDto>>, ApiError> {
    let profiles = state.store.list_profiles(account_id).await?;
    let genres = state.store.list_genres(Some(GENRE_LIMIT)).await?;
    let flash = account::take_flash(&session).await;
    let active = account::active_profile(&session).await;

    Ok(Json(ApiResponse::success(ProfileListDto {
        profiles: profiles.into_iter().map(Into::into).collect(),
        genres: genres.into_iter().map(Into::into).collect(),
        active_profile: active.map(|(id, name)| ActiveProfileDto { id, name }),
        flash,
    })))
}

pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Profile name cannot be empty"));
    }
    if name.len() > 50 {
        return Err(ApiError::validation(
            "Profile name must be 50 characters or less",
        ));
    }

    let profile = state
        .store
        .create_profile(account_id, name, payload.avatar.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Removes a profile owned by the caller; its watchlist rows cascade. Clears
/// the active selection when it pointed at the removed profile.
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let removed = state.store.remove_profile(id, account_id).await?;
    if !removed {
        return Err(ApiError::profile_not_found(id));
    }

    if let Some((active_id, _)) = account::active_profile(&session).await
        && active_id == id
    {
        account::clear_active_profile(&session).await;
    }

    Ok(Json(ApiResponse::success(())))
}

/// Stores the selection in the session and sends the caller home. Profiles
/// of other accounts are indistinguishable from missing ones.
pub async fn activate_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let profile = state
        .store
        .get_profile_for_account(id, account_id)
        .await?
        .ok_or_else(|| ApiError::profile_not_found(id))?;

    account::set_active_profile(&session, profile.id, &profile.name).await?;

    Ok(Redirect::to("/api/home"))
}
