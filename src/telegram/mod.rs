//! Telegram delivery integration
//!
//! The Bot API client and the caption formatter.

pub mod caption;
pub mod client;

pub use caption::build_caption;
pub use client::{SendVideoOptions, TelegramClient};
