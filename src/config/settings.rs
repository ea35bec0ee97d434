//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for clipcast. All
//! components receive an immutable, already-validated `Settings` at
//! construction time; nothing reads the environment after startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration settings for clipcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Broadcaster being watched for clips
    pub broadcaster: BroadcasterSettings,
    /// Twitch API credentials and polling configuration
    pub twitch: TwitchSettings,
    /// Telegram delivery configuration
    pub telegram: TelegramSettings,
    /// Clip server configuration
    pub server: ServerSettings,
    /// Clip store configuration
    pub database: DatabaseSettings,
}

/// The broadcaster whose clips are polled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcasterSettings {
    /// Numeric broadcaster id used by the clips API
    pub id: u64,
    /// Broadcaster login name, used in caption links
    pub name: String,
}

/// Twitch API access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitchSettings {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Seconds between fetch cycles
    pub fetch_interval_secs: u64,
}

/// Telegram delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Bot API token
    pub bot_token: String,
    /// Companion channel name used in caption share links
    pub channel_name: String,
    /// Numeric chat ids every new clip is delivered to
    pub chat_ids: Vec<i64>,
}

/// Clip server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Whether the clip server runs at all
    pub enabled: bool,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Shared secret guarding the blacklist routes
    pub secret_token: String,
    /// Loading-image URLs for the index page substitution
    pub loading_images: Vec<String>,
}

/// Clip store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path of the SQLite database file
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            broadcaster: BroadcasterSettings {
                id: 0,
                name: String::new(),
            },
            twitch: TwitchSettings {
                client_id: String::new(),
                client_secret: String::new(),
                fetch_interval_secs: 120,
            },
            telegram: TelegramSettings {
                bot_token: String::new(),
                channel_name: String::new(),
                chat_ids: Vec::new(),
            },
            server: ServerSettings {
                enabled: false,
                host: "0.0.0.0".to_string(),
                port: 5000,
                secret_token: String::new(),
                loading_images: Vec::new(),
            },
            database: DatabaseSettings {
                path: PathBuf::from("database/clips.db"),
            },
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();

        if let Ok(id) = std::env::var("BROADCASTER_ID") {
            settings.broadcaster.id = id
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid BROADCASTER_ID: {e}")))?;
        }

        if let Ok(name) = std::env::var("BROADCASTER_NAME") {
            settings.broadcaster.name = name;
        }

        if let Ok(client_id) = std::env::var("TWITCH_CLIENT_ID") {
            settings.twitch.client_id = client_id;
        }

        if let Ok(client_secret) = std::env::var("TWITCH_CLIENT_SECRET") {
            settings.twitch.client_secret = client_secret;
        }

        if let Ok(interval) = std::env::var("CLIP_FETCH_INTERVAL") {
            settings.twitch.fetch_interval_secs = interval
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid CLIP_FETCH_INTERVAL: {e}")))?;
        }

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            settings.telegram.bot_token = token;
        }

        if let Ok(channel) = std::env::var("TELEGRAM_CHANNEL_NAME") {
            settings.telegram.channel_name = channel;
        }

        if let Ok(ids) = std::env::var("TARGET_CHAT_IDS") {
            settings.telegram.chat_ids = parse_chat_ids(&ids)?;
        }

        if let Ok(enabled) = std::env::var("ENABLE_CLIP_SERVER") {
            settings.server.enabled = enabled.trim().eq_ignore_ascii_case("true");
        }

        if let Ok(host) = std::env::var("CLIP_SERVER_HOST") {
            settings.server.host = host;
        }

        if let Ok(port) = std::env::var("CLIP_SERVER_PORT") {
            settings.server.port = port
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid CLIP_SERVER_PORT: {e}")))?;
        }

        if let Ok(secret) = std::env::var("WEBSERVER_SECRET_TOKEN") {
            settings.server.secret_token = secret;
        }

        if let Ok(pictures) = std::env::var("LOADING_VIDEO_PICTURES") {
            settings.server.loading_images = pictures
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            settings.database.path = PathBuf::from(path);
        }

        Ok(settings)
    }

    /// Reject configuration the pipeline cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.broadcaster.id == 0 {
            return Err(crate::Error::config("BROADCASTER_ID must be set"));
        }
        if self.broadcaster.name.is_empty() {
            return Err(crate::Error::config("BROADCASTER_NAME must be set"));
        }
        if self.twitch.client_id.is_empty() || self.twitch.client_secret.is_empty() {
            return Err(crate::Error::config(
                "TWITCH_CLIENT_ID and TWITCH_CLIENT_SECRET must be set",
            ));
        }
        if self.twitch.fetch_interval_secs == 0 {
            return Err(crate::Error::config(
                "CLIP_FETCH_INTERVAL must be at least 1 second",
            ));
        }
        if self.telegram.bot_token.is_empty() {
            return Err(crate::Error::config("TELEGRAM_BOT_TOKEN must be set"));
        }
        if self.telegram.chat_ids.is_empty() {
            return Err(crate::Error::config(
                "TARGET_CHAT_IDS must list at least one chat id",
            ));
        }
        if self.server.enabled && self.server.secret_token.is_empty() {
            return Err(crate::Error::config(
                "WEBSERVER_SECRET_TOKEN must be set when the clip server is enabled",
            ));
        }
        Ok(())
    }

    /// Fixed sleep between fetch cycles
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.twitch.fetch_interval_secs)
    }
}

/// Parse a comma-separated chat id list
fn parse_chat_ids(raw: &str) -> crate::Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|e| crate::Error::config(format!("Invalid chat id {s:?}: {e}")))
        })
        .collect()
}
