//! Type definitions for clipcast
//!
//! Domain entities, external API wire shapes, and the clip server's
//! request/response structures.

pub mod clip;
pub mod request;
pub mod response;
pub mod telegram;
pub mod twitch;

pub use clip::{Clip, EligibleClip, derive_video_url};
pub use request::{BlacklistRequest, SecretQuery};
pub use response::{
    BlacklistResponse, BlacklistedClip, ErrorResponse, RandomClipResponse, StatusResponse,
};
