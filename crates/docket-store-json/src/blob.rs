//! File-backed blob store for rubric images.
//!
//! Blobs are named by SHA-256 content hash, so identical uploads share one
//! file and rewriting an existing blob is a harmless no-op. No binary data
//! ever lives in the assessment document — only the reference does.

use std::{
  io,
  path::{Path, PathBuf},
};

use sha2::{Digest as _, Sha256};

use docket_core::{
  Error, Result,
  assessment::RubricImageRef,
  persist::BlobStore,
};

/// Rubric images as flat files under one directory.
pub struct FileBlobStore {
  dir: PathBuf,
}

impl FileBlobStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }
}

impl BlobStore for FileBlobStore {
  async fn store(
    &self,
    bytes: &[u8],
    media_type: &str,
  ) -> Result<RubricImageRef> {
    let digest = hex::encode(Sha256::digest(bytes));
    let filename = format!("{digest}.{}", extension_for(media_type));

    tokio::fs::create_dir_all(&self.dir)
      .await
      .map_err(Error::persistence)?;
    tokio::fs::write(self.dir.join(&filename), bytes)
      .await
      .map_err(Error::persistence)?;

    Ok(RubricImageRef {
      path:         filename,
      content_hash: digest,
      media_type:   media_type.to_owned(),
    })
  }

  async fn retrieve(&self, image: &RubricImageRef) -> Result<Vec<u8>> {
    match tokio::fs::read(self.dir.join(&image.path)).await {
      Ok(bytes) => Ok(bytes),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        Err(Error::RubricImageNotFound(image.path.clone()))
      }
      Err(e) => Err(Error::persistence(e)),
    }
  }
}

/// File extension for the upload formats the app accepts; anything exotic
/// falls back to a neutral extension rather than being rejected.
fn extension_for(media_type: &str) -> &'static str {
  match media_type {
    "image/png" => "png",
    "image/jpeg" => "jpg",
    "image/gif" => "gif",
    "image/bmp" => "bmp",
    "image/webp" => "webp",
    _ => "bin",
  }
}
