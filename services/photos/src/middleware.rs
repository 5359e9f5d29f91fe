//! Authentication middleware for bearer token validation

use axum::{
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::ApiError, models::UserProfile, state::AppState};

/// Authenticated request context, available to handlers as
/// `Extension<AuthContext>` on protected routes
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: UserProfile,
}

/// Extract the bearer token from the request headers
///
/// A missing header is `Unauthorized`; a header that is present but does not
/// carry a non-empty bearer token is `InvalidToken`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(AUTHORIZATION).ok_or(ApiError::Unauthorized)?;
    let value = value.to_str().map_err(|_| ApiError::InvalidToken)?;

    let token = match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => "",
    };

    if token.is_empty() {
        return Err(ApiError::InvalidToken);
    }

    Ok(token)
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state.jwt_service.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::InvalidToken
    })?;

    // A well-signed token may still name a user that no longer exists
    let user = state
        .user_repository
        .find_by_id(claims.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(AuthContext {
        user: user.profile(),
    });

    Ok(next.run(req).await)
}
