//! Error types for `quillt-core`.
//!
//! Only the write path can fail. The engine itself is total: resolution
//! misses and malformed ranges are silently excluded from its output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not a YYYY-MM-DD calendar day: {0:?}")]
  InvalidDay(String),

  #[error("start date {start} is after end date {end}")]
  InvertedRange { start: String, end: String },

  #[error("location must not be empty")]
  EmptyLocation,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
