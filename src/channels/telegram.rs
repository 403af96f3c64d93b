//! Telegram channel — long-polls the Bot API for updates.
//!
//! Native Rust Telegram Bot API implementation over `reqwest`: `getUpdates`
//! for inbound text, `sendMessage` with reply keyboards or inline URL buttons
//! for outbound replies.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::channels::{
    Channel, IncomingMessage, Markup, MessageStream, OutgoingMessage, Reply, TextFormat,
};
use crate::config::BotConfig;
use crate::error::{ChannelError, ConfigError};

/// Pause after a failed poll before trying again.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Telegram channel — connects to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: SecretString,
    api_base: String,
    poll_timeout: Duration,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(
        bot_token: SecretString,
        api_base: impl Into<String>,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            bot_token,
            api_base: api_base.into(),
            poll_timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(
            SecretString::from(config.telegram_token.expose_secret().to_owned()),
            config.telegram_api_url.clone(),
            config.poll_timeout,
        )
    }

    /// Build the channel and check the token with `getMe`. A token the Bot API
    /// rejects is a configuration error; an unreachable API is only logged,
    /// since polling retries on its own.
    pub async fn connect(config: &BotConfig) -> crate::error::Result<Self> {
        let channel = Self::from_config(config);
        match channel.health_check().await {
            Ok(()) => {}
            Err(ChannelError::Unauthorized { status, .. }) => {
                return Err(ConfigError::InvalidValue {
                    key: "TELEGRAM_TOKEN".into(),
                    message: format!("rejected by the Bot API (HTTP {status})"),
                }
                .into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram health check failed; polling anyway");
            }
        }
        Ok(channel)
    }

    fn api_url(&self, method: &str) -> String {
        method_url(&self.api_base, &self.bot_token, method)
    }

    /// Send a reply, trying Markdown first. Only a 400 (unparsable entities)
    /// is retried as plain text; any other failure is returned as is.
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), ChannelError> {
        let body = send_message_body(chat_id, reply, reply.format);
        let resp = self.post("sendMessage", &body).await?;
        if resp.status().is_success() {
            return Ok(());
        }

        let status = resp.status();
        let err = resp.text().await.unwrap_or_default();
        if reply.format == TextFormat::Plain || status != reqwest::StatusCode::BAD_REQUEST {
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!("sendMessage returned {status}: {err}"),
            });
        }

        tracing::warn!(
            status = ?status,
            "Telegram sendMessage with Markdown failed; retrying without parse_mode"
        );

        let plain_body = send_message_body(chat_id, reply, TextFormat::Plain);
        let plain_resp = self.post("sendMessage", &plain_body).await?;
        if !plain_resp.status().is_success() {
            let plain_err = plain_resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!("sendMessage failed (markdown: {status}, plain: {plain_err})"),
            });
        }

        Ok(())
    }

    async fn post(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ChannelError> {
        self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: e.without_url().to_string(),
            })
    }
}

// ── Channel trait implementation ────────────────────────────────────

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let url = self.api_url("getUpdates");
        let timeout_secs = self.poll_timeout.as_secs();
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;

            tracing::info!("Telegram channel listening for messages...");

            loop {
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": timeout_secs,
                    "allowed_updates": ["message"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Telegram poll error: {}", e.without_url());
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                        continue;
                    }
                };

                let data: serde_json::Value = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {}", e.without_url());
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                        continue;
                    }
                };

                let Some(results) = data.get("result").and_then(serde_json::Value::as_array)
                else {
                    tracing::warn!(response = %data, "Telegram getUpdates returned no result");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                };

                for update in results {
                    // Advance offset past this update
                    if let Some(uid) = update.get("update_id").and_then(serde_json::Value::as_i64)
                    {
                        offset = uid + 1;
                    }

                    let Some(incoming) = parse_update(update) else {
                        continue;
                    };

                    if tx.send(incoming).is_err() {
                        tracing::info!("Telegram listener channel closed");
                        return;
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), ChannelError> {
        self.send_reply(message.chat_id, &message.reply).await
    }

    async fn send_to_chat(&self, chat_id: i64, text: &str) -> Result<(), ChannelError> {
        self.send_reply(chat_id, &Reply::text(text)).await
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::NOT_FOUND
        {
            Err(ChannelError::Unauthorized {
                name: "telegram".into(),
                status: status.as_u16(),
            })
        } else {
            Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("getMe returned {status}"),
            })
        }
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        tracing::info!("Telegram channel shutting down");
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn method_url(base: &str, token: &SecretString, method: &str) -> String {
    format!("{base}/bot{}/{method}", token.expose_secret())
}

/// Build the `sendMessage` JSON body for a reply.
fn send_message_body(chat_id: i64, reply: &Reply, format: TextFormat) -> serde_json::Value {
    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "text": reply.text,
    });
    if format == TextFormat::Markdown {
        body["parse_mode"] = "Markdown".into();
    }
    if let Some(markup) = reply_markup(&reply.markup) {
        body["reply_markup"] = markup;
    }
    body
}

/// Map transport-neutral markup onto Bot API keyboard objects. Link buttons
/// go one per row.
fn reply_markup(markup: &Markup) -> Option<serde_json::Value> {
    match markup {
        Markup::None => None,
        Markup::Keyboard(kb) => {
            let keyboard: Vec<Vec<serde_json::Value>> = kb
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|label| serde_json::json!({ "text": label }))
                        .collect()
                })
                .collect();
            Some(serde_json::json!({
                "keyboard": keyboard,
                "resize_keyboard": true,
            }))
        }
        Markup::Links(links) => {
            let rows: Vec<Vec<serde_json::Value>> = links
                .iter()
                .map(|b| vec![serde_json::json!({ "text": b.label, "url": b.url })])
                .collect();
            Some(serde_json::json!({ "inline_keyboard": rows }))
        }
    }
}

/// Turn one `getUpdates` entry into an inbound message. Non-text updates and
/// updates without a sender are skipped.
fn parse_update(update: &serde_json::Value) -> Option<IncomingMessage> {
    let message = update.get("message")?;
    let text = message.get("text").and_then(serde_json::Value::as_str)?;
    let from = message.get("from")?;
    let user_id = from.get("id").and_then(serde_json::Value::as_i64)?;
    let chat_id = message
        .get("chat")
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(user_id);

    let mut incoming = IncomingMessage::new("telegram", chat_id, user_id, text);
    if let Some(username) = from.get("username").and_then(serde_json::Value::as_str) {
        incoming = incoming.with_username(username);
    }
    Some(incoming)
}

// ── Tests ───────────────────────────────────────────────────────────
