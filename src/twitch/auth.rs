//! OAuth2 client-credentials token management
//!
//! Acquires the bearer token the clips API requires and keeps the current one
//! cached together with its absolute expiry. The fetcher owns the single
//! manager instance and asks for the token at the start of every poll cycle;
//! there is no background refresh timer.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::types::twitch::{BearerToken, TokenResponse};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Twitch OAuth2 token endpoint
const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Maximum acquisition attempts per `acquire` call
const MAX_ATTEMPTS: u32 = 3;

/// Fixed delay between failed acquisition attempts
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Acquires and caches the client-credentials bearer token
#[derive(Debug)]
pub struct TokenManager {
    /// HTTP client shared with the rest of the process
    client: Client,
    /// Application settings (client id/secret)
    settings: Arc<Settings>,
    /// Token endpoint, overridable for tests
    token_url: String,
    /// Delay between failed attempts, overridable for tests
    retry_delay: Duration,
    /// Currently cached token, if any
    current: Option<BearerToken>,
}

impl TokenManager {
    /// Create a new token manager
    pub fn new(client: Client, settings: Arc<Settings>) -> Self {
        Self {
            client,
            settings,
            token_url: TOKEN_URL.to_string(),
            retry_delay: RETRY_DELAY,
            current: None,
        }
    }

    /// Override the token endpoint URL
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the delay between failed attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Return a valid bearer token, acquiring or renewing it as needed.
    ///
    /// The expiry check happens here and nowhere else; callers invoke this
    /// once per poll cycle.
    pub async fn bearer(&mut self) -> Result<BearerToken> {
        if let Some(token) = &self.current {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            tracing::info!("Bearer token expired, renewing");
        }

        let token = self.acquire().await?;
        tracing::info!("Bearer token acquired, expires at {}", token.expires_at);
        self.current = Some(token.clone());
        Ok(token)
    }

    /// Acquire a fresh token from the credential endpoint.
    ///
    /// Makes at most [`MAX_ATTEMPTS`] attempts with a fixed delay between
    /// them, logging each failure; exhausting them surfaces a terminal
    /// [`Error::Auth`] instead of looping forever.
    pub async fn acquire(&self) -> Result<BearerToken> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.request_token().await {
                Ok(response) => return Ok(BearerToken::from_response(response)),
                Err(e) => {
                    tracing::warn!("Failed to fetch token (attempt {attempt}/{MAX_ATTEMPTS}): {e}");
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(Error::auth(
            "max retries reached, unable to fetch bearer token",
        ))
    }

    /// One POST to the credential endpoint
    async fn request_token(&self) -> Result<TokenResponse> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.settings.twitch.client_id.as_str()),
                ("client_secret", self.settings.twitch.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| Error::auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::auth(format!("malformed token response: {e}")))
    }
}
