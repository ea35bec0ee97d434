//! Clip entity definitions
//!
//! The `Clip` value entity is built once from an API clip object and never
//! mutated afterwards; the store persists it as-is.

use crate::types::twitch::ApiClip;
use serde::{Deserialize, Serialize};

/// Thumbnail-naming suffix the platform's CDN currently uses
const THUMBNAIL_SUFFIX: &str = "-preview-480x272.jpg";

/// Video-file suffix substituted for the thumbnail suffix
const VIDEO_SUFFIX: &str = ".mp4";

/// A clip as discovered by the fetcher, immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Platform-unique identifier, primary key everywhere
    pub slug: String,
    /// Clip title as entered by the curator
    pub title: String,
    /// Public watch page URL
    pub url: String,
    /// Creation timestamp, ISO-8601 string as returned by the API
    pub created_at: String,
    /// Clip length in whole seconds
    pub duration_seconds: i64,
    /// Curator display name, absent when the clip has no attributed curator
    pub curator_name: Option<String>,
    /// Curator channel URL, derived from the curator name
    pub curator_url: Option<String>,
    /// Preview thumbnail URL
    pub thumbnail_url: String,
    /// Direct video URL, derived from the thumbnail URL
    pub video_url: String,
}

impl Clip {
    /// Build a `Clip` from an API clip object.
    ///
    /// The `video_url` is derived from the thumbnail URL (see
    /// [`derive_video_url`]); an empty `creator_name` is treated as an
    /// unattributed clip.
    pub fn from_api(clip: ApiClip) -> Self {
        let curator_name = Some(clip.creator_name).filter(|name| !name.is_empty());
        let curator_url = curator_name
            .as_deref()
            .map(|name| format!("https://www.twitch.tv/{name}"));
        let video_url = derive_video_url(&clip.thumbnail_url);

        Self {
            slug: clip.id,
            title: clip.title,
            url: clip.url,
            created_at: clip.created_at,
            duration_seconds: clip.duration as i64,
            curator_name,
            curator_url,
            thumbnail_url: clip.thumbnail_url,
            video_url,
        }
    }

    /// File name used when uploading the video asset
    pub fn video_file_name(&self) -> String {
        format!("{}.mp4", self.slug)
    }
}

/// Derive a direct video URL from a thumbnail URL.
///
/// Best-effort heuristic tied to the platform's current CDN naming
/// convention: the `-preview-480x272.jpg` suffix becomes `.mp4`. A thumbnail
/// that does not follow the convention is returned unchanged, and the
/// resulting URL may simply fail to download later.
pub fn derive_video_url(thumbnail_url: &str) -> String {
    thumbnail_url.replace(THUMBNAIL_SUFFIX, VIDEO_SUFFIX)
}

/// Row shape returned by the store's random eligible-clip selection
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleClip {
    /// Clip identifier
    pub slug: String,
    /// Direct video URL
    pub video_url: String,
    /// Clip title
    pub title: String,
}
