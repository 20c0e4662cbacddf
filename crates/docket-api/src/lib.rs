//! JSON REST API for Docket.
//!
//! Exposes an axum [`Router`] backed by any
//! [`docket_core::store::AssessmentStore`] +
//! [`docket_core::persist::BlobStore`] pair. TLS and transport concerns are
//! the caller's responsibility; teacher-gating happens here via the
//! [`auth::TeacherAuth`] extractor.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = docket_api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod assessments;
pub mod auth;
pub mod calendar;
pub mod error;
pub mod search;
pub mod suggest;

use std::{collections::BTreeSet, path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use docket_core::{
  normalize::Normalization,
  persist::BlobStore,
  role::{DEFAULT_TEACHER_CODE, RoleGate},
  store::AssessmentStore,
};
use docket_suggest::{SuggestClient, SuggestConfig};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `DOCKET_*` environment overrides. Every field has a working default so a
/// bare `docketd` starts a usable classroom instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// The assessment collection as one JSON document.
  pub data_file:     PathBuf,
  /// Directory holding rubric image blobs.
  pub image_dir:     PathBuf,
  pub teacher_code:  String,
  pub normalization: Normalization,
  pub suggest:       SuggestConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_owned(),
      port:          8642,
      data_file:     PathBuf::from("data/assessments.json"),
      image_dir:     PathBuf::from("data/rubrics"),
      teacher_code:  DEFAULT_TEACHER_CODE.to_owned(),
      normalization: Normalization::default(),
      suggest:       SuggestConfig::default(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, B> {
  pub store:         Arc<S>,
  pub blobs:         Arc<B>,
  pub gate:          Arc<RoleGate>,
  pub suggest:       Arc<SuggestClient>,
  /// The same folding rule the store enforces uniqueness with, so filters
  /// and uniqueness can never disagree about what a subject is called.
  pub normalization: Normalization,
}

impl<S, B> Clone for AppState<S, B> {
  fn clone(&self) -> Self {
    Self {
      store:         self.store.clone(),
      blobs:         self.blobs.clone(),
      gate:          self.gate.clone(),
      suggest:       self.suggest.clone(),
      normalization: self.normalization,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn router<S, B>(state: AppState<S, B>) -> Router
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  Router::new()
    // Assessments
    .route(
      "/api/assessments",
      get(assessments::list::<S, B>).post(assessments::create::<S, B>),
    )
    .route(
      "/api/assessments/{id}",
      get(assessments::get_one::<S, B>)
        .delete(assessments::delete_one::<S, B>),
    )
    .route(
      "/api/assessments/{id}/rubric",
      get(assessments::rubric::<S, B>),
    )
    // Derived views
    .route("/api/calendar", get(calendar::handler::<S, B>))
    .route("/api/search", get(search::handler::<S, B>))
    // Topic suggestions
    .route("/api/suggest", post(suggest::handler::<S, B>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Parse a comma-separated `subjects` query parameter into a subscription
/// set; `None` when the parameter is absent or holds nothing usable.
pub(crate) fn subject_set(raw: Option<&str>) -> Option<BTreeSet<String>> {
  let set: BTreeSet<String> = raw?
    .split(',')
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .collect();
  (!set.is_empty()).then_some(set)
}
