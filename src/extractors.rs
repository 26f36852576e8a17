use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{db::models::AuthUser, rejections::AppError, AppState};

/// Extracts the authenticated user from a bearer token, rejecting the
/// request with 401 before the handler runs. Token issuance happens outside
/// this service; tokens are validated against the sessions table.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user_name = state
            .db
            .session_user(token)
            .await
            .map_err(|e| {
                tracing::error!("session lookup failed: {e}");
                AppError::Internal("session lookup failed")
            })?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthGuard(AuthUser { name: user_name }))
    }
}
