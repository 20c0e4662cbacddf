//! Error type for `docket-suggest`.
//!
//! Every variant means the same thing to callers — recommendations are
//! unavailable right now — and must never affect any other feature.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no API credential configured")]
  NotConfigured,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("suggestion service returned {status}")]
  Service { status: reqwest::StatusCode },

  #[error("suggestion service returned no usable text")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
