//! Event bus and notification delivery for the records service.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the event envelope; record transitions travel as
//!   a serialized [`WorkflowEvent`](records_core::workflow::WorkflowEvent).
//! - [`NotificationDispatcher`]: background consumer that mails notices.
//! - [`delivery`]: the [`Mailer`] seam and its SMTP, log-only and
//!   in-memory implementations.

pub mod bus;
pub mod delivery;
pub mod dispatcher;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use delivery::log_mailer::LogMailer;
pub use delivery::memory::{MemoryMailer, SentMail};
pub use delivery::Mailer;
pub use dispatcher::NotificationDispatcher;
