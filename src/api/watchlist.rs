use axum::{
    Extension, Json,
    extract::{Form, State},
    http::HeaderMap,
    response::Redirect,
};
use std::sync::Arc;
use tower_sessions::Session;

use crate::domain::{MediaKind, MediaRef};
use crate::entities::watchlist_items;

use super::account::{self, CurrentAccount};
use super::{ApiError, ApiResponse, AppState, WatchlistDto, WatchlistForm, WatchlistItemDto};

/// The active profile's saved titles, newest first. Rows whose media has
/// since been removed from the catalog are skipped rather than surfaced as
/// holes.
pub async fn view_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
) -> Result<Json<ApiResponse<WatchlistDto>>, ApiError> {
    let Some((profile_id, _)) = account::active_profile(&session).await else {
        return Err(ApiError::validation("No active profile selected"));
    };

    let profile = state
        .store
        .get_profile_for_account(profile_id, account_id)
        .await?
        .ok_or_else(|| ApiError::profile_not_found(profile_id))?;

    let rows = state.store.watchlist_for_profile(profile.id).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(item) = resolve_item(&state, &row).await? {
            items.push(item);
        }
    }

    Ok(Json(ApiResponse::success(WatchlistDto {
        profile: profile.into(),
        items,
    })))
}

async fn resolve_item(
    state: &AppState,
    row: &watchlist_items::Model,
) -> Result<Option<WatchlistItemDto>, ApiError> {
    let kind = match MediaKind::parse(&row.media_type) {
        Some(kind) => kind,
        None => return Ok(None),
    };

    let resolved = match kind {
        MediaKind::Movie => state
            .store
            .get_movie(row.media_id)
            .await?
            .map(|m| (m.title, m.poster)),
        MediaKind::TvShow => state
            .store
            .get_show(row.media_id)
            .await?
            .map(|s| (s.title, s.poster)),
    };

    Ok(resolved.map(|(title, poster)| WatchlistItemDto {
        media_type: kind.as_str().to_string(),
        media_id: row.media_id,
        title,
        poster,
        added_at: row.added_at.clone(),
    }))
}

pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<WatchlistForm>,
) -> Result<Redirect, ApiError> {
    let media = parse_media(&form.content_type, form.content_id)?;
    ensure_media_exists(&state, media).await?;

    let Some(profile_id) = require_profile(&state, account_id, &session).await? else {
        return Ok(Redirect::to("/api/profiles"));
    };

    state.store.add_to_watchlist(profile_id, media).await?;
    account::set_flash(&session, "Added to My List").await;

    Ok(redirect_back(&headers))
}

pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<WatchlistForm>,
) -> Result<Redirect, ApiError> {
    let media = parse_media(&form.content_type, form.content_id)?;
    ensure_media_exists(&state, media).await?;

    let Some(profile_id) = require_profile(&state, account_id, &session).await? else {
        return Ok(Redirect::to("/api/profiles"));
    };

    state.store.remove_from_watchlist(profile_id, media).await?;
    account::set_flash(&session, "Removed from My List").await;

    Ok(redirect_back(&headers))
}

pub(super) fn parse_media(content_type: &str, content_id: i32) -> Result<MediaRef, ApiError> {
    let kind = MediaKind::parse(content_type)
        .ok_or_else(|| ApiError::validation(format!("Unknown content type: {content_type}")))?;
    Ok(MediaRef::new(kind, content_id))
}

pub(super) async fn ensure_media_exists(state: &AppState, media: MediaRef) -> Result<(), ApiError> {
    match media {
        MediaRef::Movie(id) => {
            state
                .store
                .get_movie(id)
                .await?
                .ok_or_else(|| ApiError::movie_not_found(id))?;
        }
        MediaRef::Show(id) => {
            state
                .store
                .get_show(id)
                .await?
                .ok_or_else(|| ApiError::show_not_found(id))?;
        }
    }
    Ok(())
}

/// Active profile id for a mutation, verified to belong to the caller.
/// `Ok(None)` means no profile is selected; the caller flashes and redirects
/// to the profile picker.
async fn require_profile(
    state: &AppState,
    account_id: i32,
    session: &Session,
) -> Result<Option<i32>, ApiError> {
    let Some((profile_id, _)) = account::active_profile(session).await else {
        account::set_flash(session, "Select a profile first.").await;
        return Ok(None);
    };

    match state
        .store
        .get_profile_for_account(profile_id, account_id)
        .await?
    {
        Some(profile) => Ok(Some(profile.id)),
        None => {
            account::clear_active_profile(session).await;
            account::set_flash(session, "Select a profile first.").await;
            Ok(None)
        }
    }
}

/// Sends the caller back where they came from, falling back to the home
/// context.
pub(super) fn redirect_back(headers: &HeaderMap) -> Redirect {
    let target = headers
        .get(axum::http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with('/') || v.starts_with("http"))
        .unwrap_or("/api/home");
    Redirect::to(target)
}
