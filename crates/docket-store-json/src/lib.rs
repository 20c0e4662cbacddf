//! JSON-document backend for the Docket assessment store.
//!
//! The whole collection lives in memory and is flushed through a
//! [`SnapshotPersistence`](docket_core::persist::SnapshotPersistence)
//! adapter as one document on every successful mutation. Ships the
//! file-backed JSON adapter, an in-memory adapter for tests, and a
//! file-backed blob store for rubric images.

mod blob;
mod document;
mod snapshot;

pub mod error;

pub use blob::FileBlobStore;
pub use document::DocumentStore;
pub use error::{Error, Result};
pub use snapshot::{JsonSnapshot, MemorySnapshot};

#[cfg(test)]
mod tests;
