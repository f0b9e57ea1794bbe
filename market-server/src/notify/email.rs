//! Email sink that writes messages to the log instead of an SMTP relay

use async_trait::async_trait;

use super::{EmailSink, NotifyError};

pub struct LogEmailSink {
    from: String,
}

impl LogEmailSink {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl EmailSink for LogEmailSink {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(
            from = %self.from,
            to = to,
            subject = subject,
            body = body,
            "Email sent"
        );
        Ok(())
    }
}
