use std::sync::Arc;

use records_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: records_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus carrying record workflow events to the notification dispatcher.
    pub event_bus: Arc<EventBus>,
}
