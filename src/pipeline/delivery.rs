//! Delivery stage
//!
//! Consumes the deduplicated clip queue and relays each clip to every
//! configured chat: download the video asset fully into memory, then upload
//! it with its caption. A rate-limited upload waits exactly as long as the
//! API asked and is retried once with enriched options; any other failure
//! abandons that clip/chat pair. Delivery failures never propagate out of
//! the stage, only the startup handshake can.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::telegram::{build_caption, SendVideoOptions, TelegramClient};
use crate::types::Clip;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Poll interval while waiting for the messaging session to come up
const READY_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Send progress for one clip/chat pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendAttempt {
    /// First try, no optional fields
    Plain,
    /// Single retry after a rate limit, with enriched options
    Enriched,
}

impl SendAttempt {
    /// Optional fields this attempt sends
    fn options(self, clip: &Clip) -> SendVideoOptions {
        match self {
            Self::Plain => SendVideoOptions::default(),
            Self::Enriched => SendVideoOptions {
                thumbnail_url: Some(clip.thumbnail_url.clone()),
                disable_notification: true,
                supports_streaming: true,
            },
        }
    }
}

/// Relays deduplicated clips to the configured chats
pub struct DeliveryWorker {
    /// HTTP client used for video downloads
    client: Client,
    /// Application settings (destinations, caption inputs)
    settings: Arc<Settings>,
    /// Bot API client
    telegram: TelegramClient,
}

impl DeliveryWorker {
    /// Create a new delivery worker with its own Bot API client
    pub fn new(client: Client, settings: Arc<Settings>) -> Self {
        let telegram = TelegramClient::new(client.clone(), settings.telegram.bot_token.clone());
        Self {
            client,
            settings,
            telegram,
        }
    }

    /// Override the Bot API host of the owned client
    pub fn with_telegram_base_url(mut self, url: impl Into<String>) -> Self {
        self.telegram = self.telegram.with_base_url(url);
        self
    }

    /// Run the delivery loop until the queue closes.
    ///
    /// The `getMe` handshake runs first and a failure there is fatal; once
    /// the session reports ready, consumption starts and never stops for a
    /// delivery failure.
    pub async fn run(self, mut queue: UnboundedReceiver<Clip>) -> Result<()> {
        let bot = self.telegram.start().await?;
        tracing::info!(
            "Telegram bot @{} connected",
            bot.username.as_deref().unwrap_or(&bot.first_name)
        );

        while !self.telegram.is_ready() {
            tracing::info!("Waiting for the Telegram session to initialize");
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }

        while let Some(clip) = queue.recv().await {
            for chat_id in &self.settings.telegram.chat_ids {
                self.deliver(&clip, *chat_id).await;
            }
        }

        Ok(())
    }

    /// Deliver one clip to one chat, logging instead of failing
    async fn deliver(&self, clip: &Clip, chat_id: i64) {
        let video = match self.download_video(clip).await {
            Ok(video) => video,
            Err(e) => {
                tracing::error!("Error downloading clip: {e}");
                return;
            }
        };

        let caption = build_caption(
            clip,
            &self.settings.broadcaster.name,
            &self.settings.telegram.channel_name,
        );
        let file_name = clip.video_file_name();

        let mut attempt = SendAttempt::Plain;
        loop {
            let options = attempt.options(clip);
            match self
                .telegram
                .send_video(chat_id, video.clone(), &file_name, &caption, &options)
                .await
            {
                Ok(()) => {
                    tracing::info!("Clip {} was sent to chat {} successfully", clip.slug, chat_id);
                    return;
                }
                Err(Error::RateLimited { retry_after }) if attempt == SendAttempt::Plain => {
                    tracing::warn!(
                        "Rate limited sending clip {} to chat {}, waiting {}s before the enriched retry",
                        clip.slug,
                        chat_id,
                        retry_after.as_secs()
                    );
                    tokio::time::sleep(retry_after).await;
                    attempt = SendAttempt::Enriched;
                }
                Err(e) => {
                    tracing::error!("Error sending clip {} to chat {}: {e}", clip.slug, chat_id);
                    return;
                }
            }
        }
    }

    /// Download the clip's video asset fully into memory
    async fn download_video(&self, clip: &Clip) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&clip.video_url)
            .send()
            .await
            .map_err(|e| Error::download(format!("{e} - {} - {}", clip.video_url, clip.slug)))?;

        if !response.status().is_success() {
            return Err(Error::download(format!(
                "{} - {} - {}",
                response.status(),
                clip.video_url,
                clip.slug
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(format!("{e} - {} - {}", clip.video_url, clip.slug)))?;
        Ok(bytes.to_vec())
    }
}
