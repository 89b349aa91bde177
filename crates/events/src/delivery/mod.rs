//! Outbound mail channels for workflow notices.
//!
//! The [`Mailer`] trait is the seam between the dispatcher and the actual
//! transport: SMTP in production, a tracing-only mailer when SMTP is not
//! configured, and an in-memory mailer for tests.

use async_trait::async_trait;

pub mod email;
pub mod log_mailer;
pub mod memory;

pub use email::EmailError;

/// Sends one plain-text message to one address.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}
