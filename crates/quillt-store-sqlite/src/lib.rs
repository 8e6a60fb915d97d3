//! SQLite backend for the Quillt plan collection.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime, and pushes a full [`PlanSnapshot`]
//! to subscribers after every write.
//!
//! [`PlanSnapshot`]: quillt_core::store::PlanSnapshot

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
