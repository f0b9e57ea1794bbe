//! Notification dispatch
//!
//! Best-effort delivery of order and retailer events to a chat sink and an
//! email sink. Failures are logged and never reach the caller; there is no
//! retry or queue.

pub mod email;
pub mod messages;
pub mod recording;
pub mod telegram;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

pub use email::LogEmailSink;
pub use recording::RecordingSink;
pub use telegram::TelegramSink;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API responded with {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Chat channel (one fixed chat per deployment)
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[async_trait]
pub trait EmailSink: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Fan-out to the configured sinks
#[derive(Clone)]
pub struct Notifier {
    chat: Option<Arc<dyn ChatSink>>,
    email: Arc<dyn EmailSink>,
}

impl Notifier {
    pub fn new(chat: Option<Arc<dyn ChatSink>>, email: Arc<dyn EmailSink>) -> Self {
        Self { chat, email }
    }

    /// Telegram when both token and chat id are configured, log-only email
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let chat: Option<Arc<dyn ChatSink>> =
            match (&config.telegram_bot_token, &config.telegram_chat_id) {
                (Some(token), Some(chat_id)) => Some(Arc::new(TelegramSink::new(
                    &config.telegram_api_base,
                    token,
                    chat_id,
                    Duration::from_secs(config.notify_timeout_secs),
                )?)),
                _ => {
                    tracing::info!("Telegram not configured, chat notifications disabled");
                    None
                }
            };

        Ok(Self::new(
            chat,
            Arc::new(LogEmailSink::new(config.email_from.clone())),
        ))
    }

    /// Same sink for both channels (tests)
    pub fn recording(sink: Arc<RecordingSink>) -> Self {
        let chat: Arc<dyn ChatSink> = sink.clone();
        Self::new(Some(chat), sink)
    }

    pub async fn chat(&self, text: &str) {
        let Some(chat) = &self.chat else {
            return;
        };
        match chat.send(text).await {
            Ok(()) => tracing::debug!("Chat notification sent"),
            Err(e) => tracing::warn!(error = %e, "Chat notification failed"),
        }
    }

    pub async fn email(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.email.send(to, subject, body).await {
            tracing::warn!(to = to, error = %e, "Email notification failed");
        }
    }
}
