//! HTTP request handlers
//!
//! Implementation of the clip server endpoints: the HTML player page, the
//! random-clip route, and the secret-guarded blacklist routes. Every failure
//! becomes a structured JSON error body; handler panics or raw errors never
//! reach the client.

use crate::{
    server::app::AppState,
    types::{
        BlacklistRequest, BlacklistResponse, ErrorResponse, RandomClipResponse, SecretQuery,
        StatusResponse,
    },
};
use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use rand::seq::IndexedRandom;

/// Player page template, embedded at compile time
const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

/// Substitution marker for the configured loading image
const LOADING_IMAGE_MARKER: &str = "[PICTURE_LOAD_HERE]";

/// Error responses the clip server can produce
#[derive(Debug)]
pub enum ApiError {
    /// Request is missing required data
    BadRequest(String),
    /// Secret token missing or wrong
    Unauthorized,
    /// Nothing matches the request
    NotFound(String),
    /// Store or task failure; details are logged, not exposed
    Internal(crate::Error),
}

impl From<crate::Error> for ApiError {
    fn from(e: crate::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(e) => {
                tracing::error!("Request failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Player page endpoint
///
/// GET /
///
/// Serves the embedded player page with one of the configured loading
/// images substituted in.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let loading_image = state
        .settings
        .server
        .loading_images
        .choose(&mut rand::rng())
        .cloned()
        .unwrap_or_default();
    Html(INDEX_TEMPLATE.replace(LOADING_IMAGE_MARKER, &loading_image))
}

/// Random clip endpoint
///
/// GET /clip
///
/// Returns one uniformly-random clip that is not blacklisted.
pub async fn random_clip(
    State(state): State<AppState>,
) -> Result<Json<RandomClipResponse>, ApiError> {
    match state.store.random_eligible().await? {
        Some(clip) => Ok(Json(clip.into())),
        None => Err(ApiError::NotFound("No clips found".to_string())),
    }
}

/// Blacklist listing endpoint
///
/// GET /get_blacklisted_clips
///
/// Returns every blacklisted clip joined with its metadata.
pub async fn get_blacklisted_clips(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
) -> Result<Json<BlacklistResponse>, ApiError> {
    authorize(&state, &query)?;
    let blacklisted_clips = state.store.list_blacklisted().await?;
    Ok(Json(BlacklistResponse { blacklisted_clips }))
}

/// Blacklist insertion endpoint
///
/// POST /add_to_blacklist
///
/// Blacklists the clip named in the body. Unknown slugs are acknowledged
/// without effect, so the route stays idempotent.
pub async fn add_to_blacklist(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
    body: Result<Json<BlacklistRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    authorize(&state, &query)?;
    let slug = extract_slug(body)?;
    state.store.blacklist_add(&slug).await?;
    tracing::info!("Clip {slug} added to the blacklist");
    Ok(Json(StatusResponse::success()))
}

/// Blacklist removal endpoint
///
/// POST /remove_from_blacklist
///
/// Removes the clip named in the body from the blacklist.
pub async fn remove_from_blacklist(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
    body: Result<Json<BlacklistRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    authorize(&state, &query)?;
    let slug = extract_slug(body)?;
    state.store.blacklist_remove(&slug).await?;
    tracing::info!("Clip {slug} removed from the blacklist");
    Ok(Json(StatusResponse::success()))
}

/// Compare the caller's secret against the configured one
fn authorize(state: &AppState, query: &SecretQuery) -> Result<(), ApiError> {
    if query.webserver_secret_token.as_deref() == Some(state.settings.server.secret_token.as_str())
    {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Pull the slug out of a blacklist mutation body.
///
/// A missing body, malformed JSON, an absent slug and an empty slug all
/// collapse into the same 400.
fn extract_slug(body: Result<Json<BlacklistRequest>, JsonRejection>) -> Result<String, ApiError> {
    body.ok()
        .and_then(|Json(request)| request.slug)
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No slug provided".to_string()))
}
