//! Event-to-mail routing.
//!
//! [`NotificationDispatcher`] subscribes to the event bus and mails the
//! notice carried by every record workflow event. Delivery is best-effort:
//! a failed send is logged and never reaches the request that caused it.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;
use crate::delivery::Mailer;

/// Prefix shared by all record workflow event types.
const RECORD_EVENT_PREFIX: &str = "record.";

/// Sends workflow notices through a [`Mailer`].
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Run the dispatch loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.dispatch(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Mail the notice carried by one event. Returns the number of
    /// messages accepted by the mailer.
    pub async fn dispatch(&self, event: &PlatformEvent) -> usize {
        if !event.event_type.starts_with(RECORD_EVENT_PREFIX) {
            return 0;
        }

        let Some(workflow) = event.workflow() else {
            tracing::warn!(
                event_type = %event.event_type,
                "Record event without a workflow payload, skipping"
            );
            return 0;
        };

        let notice = &workflow.notice;
        if notice.recipients.is_empty() {
            tracing::debug!(
                event_type = %event.event_type,
                record_id = workflow.record_id,
                "No recipients for notice"
            );
            return 0;
        }

        let mut delivered = 0;
        for recipient in &notice.recipients {
            match self.mailer.send(recipient, &notice.subject, &notice.body).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        to = %recipient,
                        event_type = %event.event_type,
                        record_id = workflow.record_id,
                        "Failed to deliver notice"
                    );
                }
            }
        }
        delivered
    }
}
