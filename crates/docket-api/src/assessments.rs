//! Handlers for `/api/assessments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/assessments` | Full collection, date-ordered |
//! | `POST`   | `/api/assessments` | Teacher only; 409 on duplicate |
//! | `GET`    | `/api/assessments/:id` | 404 if not found |
//! | `DELETE` | `/api/assessments/:id` | Teacher only; permanent |
//! | `GET`    | `/api/assessments/:id/rubric` | Raw image bytes |

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use docket_core::{
  assessment::{Assessment, NewAssessment},
  persist::BlobStore,
  store::AssessmentStore,
};

use crate::{AppState, auth::TeacherAuth, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/assessments`
pub async fn list<S, B>(
  State(state): State<AppState<S, B>>,
) -> Result<Json<Vec<Assessment>>, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  Ok(Json(state.store.list_all().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/assessments/:id`
pub async fn get_one<S, B>(
  State(state): State<AppState<S, B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Assessment>, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  Ok(Json(state.store.get(id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// A rubric image carried inline in the create request.
#[derive(Debug, Deserialize)]
pub struct RubricUpload {
  /// Base64-encoded image bytes.
  pub data:       String,
  pub media_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub subject:      String,
  pub date:         NaiveDate,
  #[serde(default)]
  pub rubric_image: Option<RubricUpload>,
}

/// `POST /api/assessments` — teacher only.
///
/// The blob is stored before the record; a rejected add (e.g. duplicate)
/// leaves the content-addressed blob in place for the retry.
pub async fn create<S, B>(
  State(state): State<AppState<S, B>>,
  _teacher: TeacherAuth,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  let rubric_image = match body.rubric_image {
    Some(upload) => {
      let bytes = B64.decode(upload.data.as_bytes()).map_err(|_| {
        ApiError::BadRequest("rubric image is not valid base64".to_owned())
      })?;
      Some(state.blobs.store(&bytes, &upload.media_type).await?)
    }
    None => None,
  };

  let assessment = state
    .store
    .add(NewAssessment {
      subject: body.subject,
      date: body.date,
      rubric_image,
    })
    .await?;

  Ok((StatusCode::CREATED, Json(assessment)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/assessments/:id` — teacher only, permanent.
pub async fn delete_one<S, B>(
  State(state): State<AppState<S, B>>,
  _teacher: TeacherAuth,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  state.store.remove(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Rubric image ─────────────────────────────────────────────────────────────

/// `GET /api/assessments/:id/rubric` — the stored image bytes, served with
/// the media type recorded at upload.
pub async fn rubric<S, B>(
  State(state): State<AppState<S, B>>,
  Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  let assessment = state.store.get(id).await?;
  let image = assessment.rubric_image.ok_or_else(|| {
    ApiError::NotFound(format!("assessment {id} has no rubric image"))
  })?;

  let bytes = state.blobs.retrieve(&image).await?;
  Ok(([(header::CONTENT_TYPE, image.media_type)], bytes).into_response())
}
