//! Domain logic for the activity record service.
//!
//! Everything in this crate is pure: no database, no network. The DB and
//! API crates build on these types.

pub mod approval;
pub mod error;
pub mod patch;
pub mod records;
pub mod types;
pub mod validation;
pub mod workflow;
