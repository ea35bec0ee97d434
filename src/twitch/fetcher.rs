//! Clip polling loop
//!
//! Polls the Helix clips listing for the configured broadcaster on a fixed
//! interval and pushes every discovered clip into the raw queue. The fetcher
//! performs no deduplication; downstream stages decide what is new.
//!
//! A cycle queries a trailing seven-day window and follows the pagination
//! cursor until the listing runs out. Any error inside a cycle aborts that
//! cycle only: the loop always reaches its fixed sleep and tries again on the
//! next tick, so a flaky API or expired credential never terminates the
//! process.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::twitch::auth::TokenManager;
use crate::types::twitch::{BearerToken, ClipsPage};
use crate::types::Clip;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Helix clips endpoint
const CLIPS_URL: &str = "https://api.twitch.tv/helix/clips";

/// Clips requested per page, the API maximum
const PAGE_SIZE: &str = "100";

/// Trailing window each cycle queries
const FETCH_WINDOW_DAYS: i64 = 7;

/// Timestamp format the clips API expects for window bounds
const WINDOW_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Polls the clips API and feeds the raw clip queue
pub struct ClipFetcher {
    /// HTTP client shared with the rest of the process
    client: Client,
    /// Application settings
    settings: Arc<Settings>,
    /// Token manager owned by this fetcher; expiry is checked once per cycle
    token_manager: TokenManager,
    /// Clips endpoint, overridable for tests
    clips_url: String,
    /// Sleep between cycles, overridable for tests
    interval: Duration,
}

impl ClipFetcher {
    /// Create a new fetcher with its own token manager
    pub fn new(client: Client, settings: Arc<Settings>) -> Self {
        let token_manager = TokenManager::new(client.clone(), Arc::clone(&settings));
        let interval = settings.fetch_interval();
        Self {
            client,
            settings,
            token_manager,
            clips_url: CLIPS_URL.to_string(),
            interval,
        }
    }

    /// Override the clips endpoint URL
    pub fn with_clips_url(mut self, url: impl Into<String>) -> Self {
        self.clips_url = url.into();
        self
    }

    /// Override the token endpoint URL of the owned token manager
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_manager = self.token_manager.with_token_url(url);
        self
    }

    /// Override the sleep between cycles
    pub fn with_fetch_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the fetch loop forever.
    ///
    /// Cycle errors are logged and swallowed; every cycle ends in the same
    /// fixed sleep regardless of outcome.
    pub async fn run(mut self, queue: UnboundedSender<Clip>) -> Result<()> {
        tracing::info!(
            "Watching broadcaster {} for new clips",
            self.settings.broadcaster.id
        );
        loop {
            if let Err(e) = self.run_cycle(&queue).await {
                tracing::error!("Fetch cycle aborted: {e}");
            }
            tracing::info!("Cycle ended! Sleeping for {} seconds", self.interval.as_secs());
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One poll cycle: renew the token if needed, then page through the
    /// trailing window and enqueue everything found.
    async fn run_cycle(&mut self, queue: &UnboundedSender<Clip>) -> Result<()> {
        let token = self.token_manager.bearer().await?;
        let started_at = (Utc::now() - chrono::Duration::days(FETCH_WINDOW_DAYS))
            .format(WINDOW_TIME_FORMAT)
            .to_string();

        let mut cursor = String::new();
        let mut total = 0usize;

        loop {
            let page = self.fetch_page(&token, &cursor, &started_at).await?;
            if page.data.is_empty() {
                tracing::info!("No clips found for this cycle");
                break;
            }

            for api_clip in page.data {
                let clip = Clip::from_api(api_clip);
                tracing::debug!("Found clip {}", clip.slug);
                queue
                    .send(clip)
                    .map_err(|_| Error::internal("raw clip queue closed"))?;
                total += 1;
            }

            match page.pagination.cursor {
                Some(next) if !next.is_empty() => cursor = next,
                _ => break,
            }
        }

        tracing::debug!("Enqueued {total} clips this cycle");
        Ok(())
    }

    /// Fetch one page of the clips listing
    async fn fetch_page(
        &self,
        token: &BearerToken,
        cursor: &str,
        started_at: &str,
    ) -> Result<ClipsPage> {
        let broadcaster_id = self.settings.broadcaster.id.to_string();
        let ended_at = Utc::now().format(WINDOW_TIME_FORMAT).to_string();

        let response = self
            .client
            .get(&self.clips_url)
            .query(&[
                ("broadcaster_id", broadcaster_id.as_str()),
                ("after", cursor),
                ("started_at", started_at),
                ("ended_at", ended_at.as_str()),
                ("first", PAGE_SIZE),
                ("is_featured", "false"),
            ])
            .bearer_auth(&token.access_token)
            .header("Client-Id", &self.settings.twitch.client_id)
            .send()
            .await
            .map_err(|e| Error::fetch(format!("clips request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::fetch(format!(
                "clips API returned {}",
                response.status()
            )));
        }

        response
            .json::<ClipsPage>()
            .await
            .map_err(|e| Error::fetch(format!("malformed clips page: {e}")))
    }
}
