//! Twitch API wire types
//!
//! Typed shapes for the OAuth token endpoint and the Helix clips endpoint.
//! Parsing happens at the API boundary; a response that does not match these
//! shapes aborts the current operation instead of propagating loose JSON.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// OAuth client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token value
    pub access_token: String,
    /// Validity window in seconds, relative to the response
    pub expires_in: i64,
}

/// An acquired bearer token with its absolute expiry instant
#[derive(Debug, Clone)]
pub struct BearerToken {
    /// Token value sent in the `Authorization` header
    pub access_token: String,
    /// Instant after which the token must be renewed
    pub expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Build a token from the endpoint response, anchoring expiry to now
    pub fn from_response(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: Utc::now() + chrono::Duration::seconds(response.expires_in),
        }
    }

    /// Check whether the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// One page of the Helix clips listing
#[derive(Debug, Clone, Deserialize)]
pub struct ClipsPage {
    /// Clip objects on this page, possibly empty
    pub data: Vec<ApiClip>,
    /// Continuation cursor, absent on the last page
    #[serde(default)]
    pub pagination: Pagination,
}

/// Pagination envelope of a clips page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    /// Opaque cursor for the next page
    pub cursor: Option<String>,
}

/// A clip object as returned by the clips API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiClip {
    /// Platform-unique clip id
    pub id: String,
    /// Clip title
    pub title: String,
    /// Public watch page URL
    pub url: String,
    /// Creation timestamp, ISO-8601
    pub created_at: String,
    /// Clip length in seconds; the API reports fractions
    pub duration: f64,
    /// Curator display name, may be empty
    pub creator_name: String,
    /// Preview thumbnail URL
    pub thumbnail_url: String,
}
