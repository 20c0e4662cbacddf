//! Handler for `POST /api/suggest`.
//!
//! The one call in the system with real latency. It runs entirely outside
//! the store's write lock, and any failure — missing credential, network,
//! service error — degrades to a 503 for this feature alone.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use docket_core::{persist::BlobStore, store::AssessmentStore};
use docket_suggest::StudentProfile;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SuggestBody {
  /// Free-text interests and career goals.
  pub interests: String,
  #[serde(default)]
  pub grade:     Option<String>,
  /// Subjects to anchor the topics in.
  #[serde(default)]
  pub subjects:  Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
  pub topics: Vec<String>,
}

/// `POST /api/suggest` — body `{"interests": "...", "grade": "...", "subjects": [...]}`
pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Json(body): Json<SuggestBody>,
) -> Result<Json<SuggestResponse>, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  if body.interests.trim().is_empty() {
    return Err(ApiError::BadRequest(
      "interests must not be empty".to_owned(),
    ));
  }

  let profile = StudentProfile {
    interests:          body.interests,
    grade:              body.grade,
    preferred_subjects: body.subjects,
  };

  let topics = state.suggest.suggest(&profile).await.map_err(|e| {
    tracing::warn!("suggestion request failed: {e}");
    ApiError::SuggestionsUnavailable(e.to_string())
  })?;

  Ok(Json(SuggestResponse { topics }))
}
