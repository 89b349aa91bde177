pub mod config;
pub mod error;
pub mod handlers;
pub mod report;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod workflow;
