//! [`DocumentStore`] — the in-memory implementation of [`AssessmentStore`].

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use docket_core::{
  Error, Result,
  assessment::{Assessment, NewAssessment},
  normalize::Normalization,
  persist::SnapshotPersistence,
  store::AssessmentStore,
};
use tokio::sync::{Mutex, RwLock};

use crate::MemorySnapshot;

/// Canonical list order: date ascending, then created-at, then id.
fn list_key(a: &Assessment) -> (NaiveDate, DateTime<Utc>, Uuid) {
  a.list_key()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The assessment collection held in memory, flushed through a snapshot
/// adapter on every successful mutation.
///
/// Mutations serialize on a single async mutex spanning the uniqueness
/// check, the candidate build, and the flush — the classic check-then-act
/// race cannot commit a duplicate. The committed collection is only swapped
/// in after the adapter reports success, so a failed flush rolls back for
/// free and readers never observe partial state.
pub struct DocumentStore<P> {
  persistence:   P,
  normalization: Normalization,
  /// The committed collection, kept in canonical list order. Guards are
  /// held only to clone or swap — never across adapter I/O.
  records:       RwLock<Vec<Assessment>>,
  /// Serialises check → mutate → persist across writers.
  write_lock:    Mutex<()>,
}

impl<P: SnapshotPersistence> DocumentStore<P> {
  /// Load the persisted collection through `persistence` and serve it from
  /// memory. The empty collection when no prior data exists.
  pub async fn open(
    persistence: P,
    normalization: Normalization,
  ) -> Result<Self> {
    let mut records =
      persistence.load().await.map_err(Error::persistence)?;
    records.sort_by_key(list_key);

    Ok(Self {
      persistence,
      normalization,
      records: RwLock::new(records),
      write_lock: Mutex::new(()),
    })
  }

  pub fn normalization(&self) -> Normalization {
    self.normalization
  }

  /// A consistent snapshot of the committed collection.
  async fn snapshot(&self) -> Vec<Assessment> {
    self.records.read().await.clone()
  }

  /// Flush `candidate` and commit it as the new collection. On flush
  /// failure the committed collection is untouched.
  async fn commit(&self, candidate: Vec<Assessment>) -> Result<()> {
    self
      .persistence
      .save(&candidate)
      .await
      .map_err(Error::persistence)?;
    *self.records.write().await = candidate;
    Ok(())
  }
}

impl DocumentStore<MemorySnapshot> {
  /// An empty store with no durable backing — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open(MemorySnapshot::new(), Normalization::default()).await
  }
}

// ─── AssessmentStore impl ────────────────────────────────────────────────────

impl<P: SnapshotPersistence> AssessmentStore for DocumentStore<P> {
  async fn add(&self, input: NewAssessment) -> Result<Assessment> {
    let _guard = self.write_lock.lock().await;

    let subject = input.subject.trim().to_owned();
    let key = self.normalization.key(&subject);
    if key.is_empty() {
      return Err(Error::EmptySubject);
    }

    let mut candidate = self.snapshot().await;
    if candidate
      .iter()
      .any(|a| a.date == input.date && self.normalization.key(&a.subject) == key)
    {
      return Err(Error::DuplicateAssessment { subject, date: input.date });
    }

    let assessment = Assessment {
      id: Uuid::new_v4(),
      subject,
      date: input.date,
      rubric_image: input.rubric_image,
      created_at: Utc::now(),
    };

    candidate.push(assessment.clone());
    candidate.sort_by_key(list_key);

    self.commit(candidate).await?;
    Ok(assessment)
  }

  async fn remove(&self, id: Uuid) -> Result<()> {
    let _guard = self.write_lock.lock().await;

    let mut candidate = self.snapshot().await;
    let position = candidate
      .iter()
      .position(|a| a.id == id)
      .ok_or(Error::NotFound(id))?;
    candidate.remove(position);

    self.commit(candidate).await
  }

  async fn get(&self, id: Uuid) -> Result<Assessment> {
    self
      .records
      .read()
      .await
      .iter()
      .find(|a| a.id == id)
      .cloned()
      .ok_or(Error::NotFound(id))
  }

  async fn list_all(&self) -> Result<Vec<Assessment>> {
    Ok(self.snapshot().await)
  }
}
