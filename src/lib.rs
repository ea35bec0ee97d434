//! Clipcast - Twitch clip relay
//!
//! Watches a broadcaster's Twitch clips and relays every new one to a set of
//! Telegram chats, with an optional HTTP server that plays back a random
//! stored clip and manages a blacklist.
//!
//! # Architecture
//!
//! Three pipeline stages run as sibling tasks, joined by in-memory queues:
//! - **Fetcher**: polls the Helix clips API on a fixed interval and emits
//!   everything it sees
//! - **Dispatcher**: records clips in the SQLite store and forwards only the
//!   genuinely new ones
//! - **Delivery**: downloads each clip's video and uploads it to every
//!   configured chat via the Bot API
//!
//! The optional clip server shares the same store and exposes the player
//! page, a random-clip route and secret-guarded blacklist management.
//!
//! # Examples
//!
//! ```rust
//! use clipcast::{ClipStore, Settings};
//!
//! # fn example() -> clipcast::Result<()> {
//! let settings = Settings::from_env()?;
//! let store = ClipStore::open_in_memory()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod store;
pub mod telegram;
pub mod twitch;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use store::ClipStore;
pub use types::{Clip, ErrorResponse};
