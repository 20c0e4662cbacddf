//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("suggestions unavailable: {0}")]
  SuggestionsUnavailable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<docket_core::Error> for ApiError {
  fn from(err: docket_core::Error) -> Self {
    use docket_core::Error as E;
    match err {
      E::DuplicateAssessment { .. } => ApiError::Conflict(err.to_string()),
      E::NotFound(id) => {
        ApiError::NotFound(format!("assessment {id} not found"))
      }
      E::RubricImageNotFound(path) => {
        ApiError::NotFound(format!("rubric image {path} not found"))
      }
      E::EmptySubject => ApiError::BadRequest(err.to_string()),
      E::Unauthorized => ApiError::Unauthorized,
      E::Persistence(_) => ApiError::Store(Box::new(err)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, self.to_string())
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::SuggestionsUnavailable(m) => {
        (StatusCode::SERVICE_UNAVAILABLE, m.clone())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
