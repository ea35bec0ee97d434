//! Response type definitions
//!
//! Outbound shapes for the clip server's routes.

use crate::types::clip::EligibleClip;
use serde::{Deserialize, Serialize};

/// Response of `GET /clip`: one random eligible clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomClipResponse {
    /// Clip identifier
    pub slug: String,
    /// Direct video URL, playable in a `<video>` tag
    pub mp4_url: String,
    /// Clip title
    pub title: String,
}

impl From<EligibleClip> for RandomClipResponse {
    fn from(clip: EligibleClip) -> Self {
        Self {
            slug: clip.slug,
            mp4_url: clip.video_url,
            title: clip.title,
        }
    }
}

/// One blacklisted clip with its joined metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistedClip {
    /// Clip identifier
    pub slug: String,
    /// Clip title
    pub title: String,
    /// Public watch page URL
    pub url: String,
}

/// Response of `GET /get_blacklisted_clips`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistResponse {
    /// Every blacklisted clip, joined with the clip table
    pub blacklisted_clips: Vec<BlacklistedClip>,
}

/// Success acknowledgement for the blacklist mutation routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Outcome marker, always `"success"`
    pub status: String,
}

impl StatusResponse {
    /// The canonical success acknowledgement
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
