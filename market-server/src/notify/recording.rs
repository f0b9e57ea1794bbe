//! In-memory sink that records every message, for tests and local runs

use async_trait::async_trait;
use std::sync::Mutex;

use super::{ChatSink, EmailSink, NotifyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingSink {
    chats: Mutex<Vec<String>>,
    emails: Mutex<Vec<SentEmail>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every message
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn chats(&self) -> Vec<String> {
        self.chats.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn emails(&self) -> Vec<SentEmail> {
        self.emails.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Unavailable("recording sink set to fail".into()));
        }
        if let Ok(mut chats) = self.chats.lock() {
            chats.push(text.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl EmailSink for RecordingSink {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Unavailable("recording sink set to fail".into()));
        }
        if let Ok(mut emails) = self.emails.lock() {
            emails.push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
        Ok(())
    }
}
