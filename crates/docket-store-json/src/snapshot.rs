//! Snapshot adapters — the collection as one persisted document.

use std::{
  convert::Infallible,
  io,
  path::{Path, PathBuf},
};

use docket_core::{
  assessment::Assessment, persist::SnapshotPersistence,
};
use tokio::sync::Mutex;

use crate::Error;

// ─── JSON file ───────────────────────────────────────────────────────────────

/// The collection persisted as a single pretty-printed JSON file.
///
/// A missing file loads as the empty collection, so first startup needs no
/// setup step. Saves write a sibling temp file and rename it over the
/// document — a failed save leaves the last good document in place.
pub struct JsonSnapshot {
  path: PathBuf,
}

impl JsonSnapshot {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl SnapshotPersistence for JsonSnapshot {
  type Error = Error;

  async fn load(&self) -> Result<Vec<Assessment>, Error> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
  }

  async fn save(&self, assessments: &[Assessment]) -> Result<(), Error> {
    let json = serde_json::to_vec_pretty(assessments)?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = self.path.with_extension("tmp");
    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, &self.path).await?;
    Ok(())
  }
}

// ─── In-memory ───────────────────────────────────────────────────────────────

/// The document held in memory — for tests and ephemeral stores.
#[derive(Default)]
pub struct MemorySnapshot {
  document: Mutex<Vec<Assessment>>,
}

impl MemorySnapshot {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SnapshotPersistence for MemorySnapshot {
  type Error = Infallible;

  async fn load(&self) -> Result<Vec<Assessment>, Infallible> {
    Ok(self.document.lock().await.clone())
  }

  async fn save(&self, assessments: &[Assessment]) -> Result<(), Infallible> {
    *self.document.lock().await = assessments.to_vec();
    Ok(())
  }
}
