use axum::{
    Extension,
    extract::{Form, State},
    http::HeaderMap,
    response::Redirect,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::account::{self, CurrentAccount};
use super::watchlist::{ensure_media_exists, parse_media, redirect_back};
use super::{ApiError, AppState, ReviewForm};

/// Creates or replaces the account's review of a title. One review per
/// account per title; resubmitting overwrites the rating and comment.
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect, ApiError> {
    if !(1..=5).contains(&form.rating) {
        return Err(ApiError::validation("Rating must be between 1 and 5"));
    }

    let media = parse_media(&form.content_type, form.content_id)?;
    ensure_media_exists(&state, media).await?;

    state
        .store
        .upsert_review(account_id, media, form.rating, form.comment.trim())
        .await?;
    account::set_flash(&session, "Review saved").await;

    Ok(redirect_back(&headers))
}
