//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

/// Test helper functions
pub mod helpers {
    use clipcast::{Clip, Settings};

    /// Shared secret the test settings configure for the clip server
    pub const SECRET_TOKEN: &str = "hunter2";

    /// Settings that pass validation, with the clip server enabled
    pub fn create_test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.broadcaster.id = 141981764;
        settings.broadcaster.name = "twitchdev".to_string();
        settings.twitch.client_id = "client".to_string();
        settings.twitch.client_secret = "secret".to_string();
        settings.telegram.bot_token = "12345:token".to_string();
        settings.telegram.channel_name = "myclips".to_string();
        settings.telegram.chat_ids = vec![-1001234567890];
        settings.server.enabled = true;
        settings.server.secret_token = SECRET_TOKEN.to_string();
        settings.server.loading_images = vec!["https://cdn.test/spin.gif".to_string()];
        settings
    }

    /// A fully-populated clip for store seeding
    pub fn sample_clip(slug: &str, title: &str) -> Clip {
        Clip {
            slug: slug.to_string(),
            title: title.to_string(),
            url: format!("https://clips.twitch.tv/{slug}"),
            created_at: "2024-05-01T12:00:00Z".to_string(),
            duration_seconds: 30,
            curator_name: Some("curator".to_string()),
            curator_url: Some("https://www.twitch.tv/curator".to_string()),
            thumbnail_url: format!("https://cdn.test/{slug}-preview-480x272.jpg"),
            video_url: format!("https://cdn.test/{slug}.mp4"),
        }
    }
}
