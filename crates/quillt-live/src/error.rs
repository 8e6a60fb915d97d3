//! Error types for `quillt-live`.
//!
//! Only upstream I/O fails here. Failures are returned to the caller; a
//! running [`LiveSession`](crate::LiveSession) keeps its last good view.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("session store error: {0}")]
  Session(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("identity lookup failed: {0}")]
  Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum PublishError {
  #[error("invalid plan: {0}")]
  Invalid(#[from] quillt_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
