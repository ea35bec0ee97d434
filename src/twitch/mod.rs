//! Twitch API integration
//!
//! Token acquisition and the clip polling loop.

pub mod auth;
pub mod fetcher;

pub use auth::TokenManager;
pub use fetcher::ClipFetcher;
