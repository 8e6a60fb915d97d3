//! Error type for `quillt-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid plan: {0}")]
  Core(#[from] quillt_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("unknown visibility: {0:?}")]
  Visibility(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
