//! Telegram Bot API client
//!
//! Thin client over the HTTP Bot API: the `getMe` startup handshake and the
//! multipart `sendVideo` upload the delivery stage uses. Rate limits are
//! surfaced as a dedicated error variant carrying the wait the API asked for,
//! so the caller can decide how to retry.

use crate::error::{Error, Result};
use crate::types::telegram::{ApiReply, BotUser};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bot API host
const API_BASE_URL: &str = "https://api.telegram.org";

/// MIME type of the uploaded video asset
const VIDEO_MIME: &str = "video/mp4";

/// Optional fields of a `sendVideo` call.
///
/// The plain first attempt sends none of them; the retry after a rate limit
/// sends all of them.
#[derive(Debug, Clone, Default)]
pub struct SendVideoOptions {
    /// Thumbnail URL passed alongside the upload
    pub thumbnail_url: Option<String>,
    /// Deliver without a notification sound
    pub disable_notification: bool,
    /// Mark the upload as suitable for streaming
    pub supports_streaming: bool,
}

/// Client for the Bot API methods the pipeline needs
#[derive(Debug, Clone)]
pub struct TelegramClient {
    /// HTTP client shared with the rest of the process
    client: Client,
    /// API host, overridable for tests
    base_url: String,
    /// Bot token embedded in every method URL
    bot_token: String,
    /// Set once the handshake has succeeded
    ready: Arc<AtomicBool>,
}

impl TelegramClient {
    /// Create a new client for the given bot token
    pub fn new(client: Client, bot_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: API_BASE_URL.to_string(),
            bot_token: bot_token.into(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the API host
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Perform the startup handshake and mark the client ready
    pub async fn start(&self) -> Result<BotUser> {
        let bot = self.get_me().await?;
        self.ready.store(true, Ordering::SeqCst);
        Ok(bot)
    }

    /// Whether the startup handshake has completed
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Call `getMe` to verify the token and identify the bot account
    pub async fn get_me(&self) -> Result<BotUser> {
        let response = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(|e| Error::internal(format!("getMe request failed: {e}")))?;

        let reply: ApiReply<BotUser> = response
            .json()
            .await
            .map_err(|e| Error::internal(format!("malformed getMe reply: {e}")))?;

        match reply.result {
            Some(user) if reply.ok => Ok(user),
            _ => Err(Error::internal(format!(
                "getMe rejected: {}",
                reply.description.as_deref().unwrap_or("unknown error")
            ))),
        }
    }

    /// Upload a video with its caption to one chat.
    ///
    /// A rate-limited reply becomes [`Error::RateLimited`] with the wait the
    /// API requested; every other rejection becomes [`Error::Send`].
    pub async fn send_video(
        &self,
        chat_id: i64,
        video: Vec<u8>,
        file_name: &str,
        caption: &str,
        options: &SendVideoOptions,
    ) -> Result<()> {
        let part = Part::bytes(video)
            .file_name(file_name.to_string())
            .mime_str(VIDEO_MIME)
            .map_err(|e| Error::send(format!("invalid video part: {e}")))?;

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", "HTML")
            .part("video", part);

        if let Some(thumbnail_url) = &options.thumbnail_url {
            form = form.text("thumbnail", thumbnail_url.clone());
        }
        if options.disable_notification {
            form = form.text("disable_notification", "true");
        }
        if options.supports_streaming {
            form = form.text("supports_streaming", "true");
        }

        let response = self
            .client
            .post(self.method_url("sendVideo"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::send(format!("sendVideo request failed: {e}")))?;

        let status = response.status();
        let reply: ApiReply<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::send(format!("malformed sendVideo reply: {e}")))?;

        if reply.ok {
            return Ok(());
        }

        if status == StatusCode::TOO_MANY_REQUESTS || reply.error_code == Some(429) {
            let retry_after = reply
                .parameters
                .and_then(|p| p.retry_after)
                .unwrap_or(1);
            return Err(Error::rate_limited(retry_after));
        }

        Err(Error::send(
            reply
                .description
                .unwrap_or_else(|| format!("sendVideo rejected with status {status}")),
        ))
    }

    /// Method URL with the token embedded, never logged
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOT_TOKEN: &str = "12345:token";

    fn test_client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(Client::new(), BOT_TOKEN).with_base_url(server.uri())
    }

    fn get_me_body() -> serde_json::Value {
        serde_json::json!({
            "ok": true,
            "result": {"id": 7, "is_bot": true, "first_name": "clipcast", "username": "clipcast_bot"}
        })
    }

    fn sent_body() -> serde_json::Value {
        serde_json::json!({"ok": true, "result": {"message_id": 42}})
    }

    #[tokio::test]
    async fn test_start_sets_ready() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{BOT_TOKEN}/getMe")))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_me_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(!client.is_ready());

        let bot = client.start().await.unwrap();
        assert_eq!(bot.username.as_deref(), Some("clipcast_bot"));
        assert!(client.is_ready());
    }

    #[tokio::test]
    async fn test_get_me_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{BOT_TOKEN}/getMe")))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.start().await.unwrap_err();
        assert!(err.to_string().contains("Unauthorized"));
        assert!(!client.is_ready());
    }

    #[tokio::test]
    async fn test_send_video_plain() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{BOT_TOKEN}/sendVideo")))
            .and(body_string_contains("chat_id"))
            .and(body_string_contains("parse_mode"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .send_video(
                -100123,
                b"video bytes".to_vec(),
                "slug.mp4",
                "<b>caption</b>",
                &SendVideoOptions::default(),
            )
            .await
            .unwrap();

        // The plain attempt must not carry the enrichment fields.
        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(!body.contains("supports_streaming"));
        assert!(!body.contains("disable_notification"));
        assert!(!body.contains("thumbnail"));
    }

    #[tokio::test]
    async fn test_send_video_enriched_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{BOT_TOKEN}/sendVideo")))
            .and(body_string_contains("supports_streaming"))
            .and(body_string_contains("disable_notification"))
            .and(body_string_contains("https://cdn.test/thumb.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let options = SendVideoOptions {
            thumbnail_url: Some("https://cdn.test/thumb.jpg".to_string()),
            disable_notification: true,
            supports_streaming: true,
        };
        client
            .send_video(-100123, b"video bytes".to_vec(), "slug.mp4", "caption", &options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_video_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{BOT_TOKEN}/sendVideo")))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 429,
                "description": "Too Many Requests: retry after 23",
                "parameters": {"retry_after": 23}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_video(1, vec![0u8], "a.mp4", "c", &SendVideoOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_rate_limited());
        assert!(matches!(
            err,
            Error::RateLimited { retry_after } if retry_after == Duration::from_secs(23)
        ));
    }

    #[tokio::test]
    async fn test_send_video_other_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{BOT_TOKEN}/sendVideo")))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_video(1, vec![0u8], "a.mp4", "c", &SendVideoOptions::default())
            .await
            .unwrap_err();

        assert!(!err.is_rate_limited());
        assert!(matches!(err, Error::Send(_)));
        assert!(err.to_string().contains("chat not found"));
    }
}
