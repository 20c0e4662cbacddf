//! Teacher-code extractor wrapping the core role gate.
//!
//! There are no sessions: every mutating request carries the shared code in
//! a header and is checked independently. Handlers that take a
//! [`TeacherAuth`] argument are teacher-only; everything else is readable by
//! any student.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};

use docket_core::{
  persist::BlobStore,
  role::{RoleGate, Teacher},
  store::AssessmentStore,
};

use crate::{AppState, error::ApiError};

/// Header carrying the shared teacher code.
pub const TEACHER_CODE_HEADER: &str = "x-teacher-code";

/// Present in a handler's arguments means the request carried a valid
/// teacher code.
pub struct TeacherAuth(pub Teacher);

/// Verify the teacher code directly from headers.
pub fn verify_teacher(
  headers: &HeaderMap,
  gate: &RoleGate,
) -> Result<Teacher, ApiError> {
  let code = headers
    .get(TEACHER_CODE_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;
  Ok(gate.authorize(code)?)
}

impl<S, B> FromRequestParts<AppState<S, B>> for TeacherAuth
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, B>,
  ) -> Result<Self, Self::Rejection> {
    verify_teacher(&parts.headers, &state.gate).map(TeacherAuth)
  }
}
