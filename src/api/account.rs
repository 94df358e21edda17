//! Account identity and session state.
//!
//! Authentication itself happens upstream in the user-account service; it
//! forwards the authenticated account as an `X-Account-Id` header. The
//! middleware pins that identity into the session so later requests on the
//! same session need no header, and exposes it to handlers as a
//! [`CurrentAccount`] extension. Everything profile-scoped (the active
//! "who's watching" selection, flash messages) lives in the session too.

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use tower_sessions::Session;

use super::ApiError;

pub const ACCOUNT_KEY: &str = "account_id";
pub const ACTIVE_PROFILE_ID_KEY: &str = "active_profile_id";
pub const ACTIVE_PROFILE_NAME_KEY: &str = "active_profile_name";
pub const FLASH_KEY: &str = "flash";

/// Authenticated account for the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub i32);

/// Requires an account identity from the session or the upstream header.
pub async fn account_middleware(
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(account_id)) = session.get::<i32>(ACCOUNT_KEY).await {
        request.extensions_mut().insert(CurrentAccount(account_id));
        return Ok(next.run(request).await);
    }

    if let Some(account_id) = extract_account_id(&headers) {
        session
            .insert(ACCOUNT_KEY, account_id)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to store session: {e}")))?;
        request.extensions_mut().insert(CurrentAccount(account_id));
        return Ok(next.run(request).await);
    }

    Ok((StatusCode::UNAUTHORIZED, "Unauthorized").into_response())
}

fn extract_account_id(headers: &HeaderMap) -> Option<i32> {
    headers
        .get("X-Account-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Account id when one is established, without requiring it. Used by public
/// pages that display profile-scoped extras opportunistically.
pub async fn session_account(headers: &HeaderMap, session: &Session) -> Option<i32> {
    if let Ok(Some(account_id)) = session.get::<i32>(ACCOUNT_KEY).await {
        return Some(account_id);
    }
    extract_account_id(headers)
}

pub async fn active_profile(session: &Session) -> Option<(i32, String)> {
    let id = session.get::<i32>(ACTIVE_PROFILE_ID_KEY).await.ok()??;
    let name = session
        .get::<String>(ACTIVE_PROFILE_NAME_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    Some((id, name))
}

pub async fn set_active_profile(session: &Session, id: i32, name: &str) -> Result<(), ApiError> {
    session
        .insert(ACTIVE_PROFILE_ID_KEY, id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store session: {e}")))?;
    session
        .insert(ACTIVE_PROFILE_NAME_KEY, name.to_string())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store session: {e}")))?;
    Ok(())
}

pub async fn clear_active_profile(session: &Session) {
    let _ = session.remove::<i32>(ACTIVE_PROFILE_ID_KEY).await;
    let _ = session.remove::<String>(ACTIVE_PROFILE_NAME_KEY).await;
}

pub async fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message.to_string()).await;
}

/// Reads and clears the pending flash message.
pub async fn take_flash(session: &Session) -> Option<String> {
    session.remove::<String>(FLASH_KEY).await.ok().flatten()
}
