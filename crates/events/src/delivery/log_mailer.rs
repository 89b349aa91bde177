use async_trait::async_trait;

use super::{EmailError, Mailer};

/// Mailer used when SMTP is not configured: notices are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        tracing::info!(to, subject, body_len = body.len(), "SMTP not configured, notice logged only");
        Ok(())
    }
}
