//! Photos service routes

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use common::error::DatabaseError;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    middleware::{AuthContext, auth_middleware},
    models::{CreatePhotoRequest, LoginRequest, NewUser, RegisterRequest, TokenResponse},
    password,
    state::AppState,
    validation,
};

/// Create the router for the photos service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/photos", get(get_photos).post(create_photo))
        .route("/photos/:id", get(get_photo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "photos"
    }))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    validation::validate_registration(&payload).map_err(ApiError::Validation)?;

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(email_taken());
    }

    let password_hash = password::hash_password(&payload.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    // Concurrent registrations can both pass the lookup above
    let user = match state
        .user_repository
        .create(&NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(DatabaseError::UniqueViolation(_)) => return Err(email_taken()),
        Err(e) => return Err(e.into()),
    };

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user.profile())))
}

fn email_taken() -> ApiError {
    ApiError::Validation("Email already registered".to_string())
}

/// Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&payload.password, &user.password).map_err(|e| {
        error!("Failed to verify password for user {}: {}", user.id, e);
        ApiError::InternalServerError
    })?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.jwt_service.sign(user.id, &user.email).map_err(|e| {
        error!("Failed to sign token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

/// Get all photos
///
/// Photos are not filtered by the requesting user.
pub async fn get_photos(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let photos = state.photo_repository.get_all().await?;

    Ok(Json(photos))
}

/// Get a photo by ID with its owner
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Ids that cannot name a row are reported like absent rows
    let id: i32 = id.parse().map_err(|_| ApiError::NotFound)?;

    let photo = state
        .photo_repository
        .get_detail(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(photo))
}

/// Create a photo owned by the authenticated user
pub async fn create_photo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload = photo_payload(&headers, &body)?;
    let new_photo =
        validation::validate_photo(payload, auth.user.id).map_err(ApiError::Validation)?;

    let photo = state.photo_repository.create(&new_photo).await?;

    info!("User {} created photo {}", auth.user.id, photo.id);
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Decode a photo creation body
///
/// A missing body, or one not declared as JSON, carries no fields, so the
/// field rules report what is missing instead of a decoding error.
pub fn photo_payload(headers: &HeaderMap, body: &[u8]) -> Result<CreatePhotoRequest, ApiError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false);

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreatePhotoRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| ApiError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    #[test]
    fn test_missing_body_has_no_fields() {
        let payload = photo_payload(&HeaderMap::new(), b"").unwrap();
        assert!(payload.title.is_none());
        assert!(payload.image_url.is_none());

        let payload = photo_payload(&json_headers(), b"  \n").unwrap();
        assert!(payload.title.is_none());
    }

    #[test]
    fn test_undeclared_body_is_ignored() {
        let payload = photo_payload(&HeaderMap::new(), br#"{"title":"Sky"}"#).unwrap();
        assert!(payload.title.is_none());
    }

    #[test]
    fn test_json_body_is_decoded() {
        let payload = photo_payload(
            &json_headers(),
            br#"{"title":"Sky","image_url":"http://image.com/sky.png"}"#,
        )
        .unwrap();
        assert_eq!(payload.title.as_deref(), Some("Sky"));
        assert_eq!(payload.image_url.as_deref(), Some("http://image.com/sky.png"));
    }

    #[test]
    fn test_broken_json_is_a_validation_error() {
        assert!(matches!(
            photo_payload(&json_headers(), b"{\"title\":"),
            Err(ApiError::Validation(_))
        ));
    }
}
