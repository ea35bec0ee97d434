//! Telegram Bot API wire types
//!
//! The Bot API wraps every reply in an `ok`/`result` envelope; errors carry a
//! `description` and, for rate limits, a `parameters.retry_after` value.

use serde::Deserialize;

/// Bot API response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply<T> {
    /// Whether the call succeeded
    pub ok: bool,
    /// Payload, present when `ok` is true
    pub result: Option<T>,
    /// Human-readable error description, present when `ok` is false
    pub description: Option<String>,
    /// Numeric error code, present when `ok` is false
    pub error_code: Option<i64>,
    /// Extra error parameters (rate-limit wait time)
    pub parameters: Option<ReplyParameters>,
}

/// Extra parameters attached to Bot API errors
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyParameters {
    /// Seconds the caller must wait before retrying
    pub retry_after: Option<u64>,
}

/// The bot's own profile, returned by the `getMe` handshake
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    /// Numeric bot account id
    pub id: i64,
    /// Always true for bot tokens
    pub is_bot: bool,
    /// Display name
    pub first_name: String,
    /// Bot username, used for logging
    pub username: Option<String>,
}
