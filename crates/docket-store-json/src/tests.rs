//! Integration tests for `DocumentStore` against in-memory and file-backed
//! snapshot adapters.

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDate;
use uuid::Uuid;

use docket_core::{
  Error,
  assessment::{Assessment, NewAssessment},
  calendar, filter,
  filter::AssessmentQuery,
  normalize::Normalization,
  persist::{BlobStore as _, SnapshotPersistence},
  store::AssessmentStore,
};
use tokio::sync::Mutex;

use crate::{DocumentStore, FileBlobStore, JsonSnapshot, MemorySnapshot};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

async fn store() -> DocumentStore<MemorySnapshot> {
  DocumentStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Add & get ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get() {
  let s = store().await;

  let added = s
    .add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();
  assert_eq!(added.subject, "Math");
  assert_eq!(added.date, date(2024, 3, 10));

  let fetched = s.get(added.id).await.unwrap();
  assert_eq!(fetched, added);
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  assert!(matches!(s.get(id).await, Err(Error::NotFound(got)) if got == id));
}

#[tokio::test]
async fn subject_is_stored_trimmed() {
  let s = store().await;
  let added = s
    .add(NewAssessment::new("  Math ", date(2024, 3, 10)))
    .await
    .unwrap();
  assert_eq!(added.subject, "Math");
}

#[tokio::test]
async fn empty_subject_rejected() {
  let s = store().await;
  assert!(matches!(
    s.add(NewAssessment::new("   ", date(2024, 3, 10))).await,
    Err(Error::EmptySubject)
  ));
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_subject_and_date_rejected() {
  let s = store().await;
  s.add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();

  let second = s.add(NewAssessment::new("Math", date(2024, 3, 10))).await;
  assert!(matches!(second, Err(Error::DuplicateAssessment { .. })));
}

#[tokio::test]
async fn duplicate_detected_across_casing_and_whitespace() {
  let s = store().await;
  s.add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();

  for variant in ["math", "MATH", " Math ", "mAtH"] {
    let result = s.add(NewAssessment::new(variant, date(2024, 3, 10))).await;
    assert!(
      matches!(result, Err(Error::DuplicateAssessment { .. })),
      "variant {variant:?} should collide"
    );
  }
}

#[tokio::test]
async fn same_subject_different_date_allowed() {
  let s = store().await;
  s.add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Math", date(2024, 3, 11)))
    .await
    .unwrap();

  assert_eq!(s.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn width_variant_collides_when_folding_enabled() {
  let s = DocumentStore::open(
    MemorySnapshot::new(),
    Normalization::CaseAndWidthFold,
  )
  .await
  .unwrap();

  s.add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();
  let result = s.add(NewAssessment::new("ＭＡＴＨ", date(2024, 3, 10))).await;
  assert!(matches!(result, Err(Error::DuplicateAssessment { .. })));
}

#[tokio::test]
async fn ids_are_never_reused() {
  let s = store().await;
  let first = s
    .add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();
  s.remove(first.id).await.unwrap();

  let second = s
    .add(NewAssessment::new("Math", date(2024, 3, 10)))
    .await
    .unwrap();
  assert_ne!(first.id, second.id);
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_all_orders_by_date_then_created_at() {
  let s = store().await;
  // Inserted out of date order; same-day records keep insertion order via
  // created_at.
  s.add(NewAssessment::new("History", date(2024, 5, 2)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Science", date(2024, 5, 1)))
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();
  let subjects: Vec<_> = all.iter().map(|a| a.subject.as_str()).collect();
  assert_eq!(subjects, ["Math", "Science", "History"]);
}

// ─── Remove ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_deletes_exactly_one_and_preserves_order() {
  let s = store().await;
  let a = s
    .add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();
  let b = s
    .add(NewAssessment::new("Science", date(2024, 5, 1)))
    .await
    .unwrap();
  let c = s
    .add(NewAssessment::new("Math", date(2024, 5, 2)))
    .await
    .unwrap();

  s.remove(b.id).await.unwrap();

  let remaining: Vec<_> =
    s.list_all().await.unwrap().iter().map(|x| x.id).collect();
  assert_eq!(remaining, [a.id, c.id]);
}

#[tokio::test]
async fn second_remove_is_not_found() {
  let s = store().await;
  let a = s
    .add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();

  s.remove(a.id).await.unwrap();
  assert!(
    matches!(s.remove(a.id).await, Err(Error::NotFound(id)) if id == a.id)
  );
}

// ─── Rollback on flush failure ───────────────────────────────────────────────

/// Snapshot adapter whose saves can be made to fail on demand.
struct FlakySnapshot {
  document: Mutex<Vec<Assessment>>,
  fail:     Arc<AtomicBool>,
}

impl FlakySnapshot {
  fn new(fail: Arc<AtomicBool>) -> Self {
    Self { document: Mutex::new(Vec::new()), fail }
  }
}

impl SnapshotPersistence for FlakySnapshot {
  type Error = std::io::Error;

  async fn load(&self) -> Result<Vec<Assessment>, std::io::Error> {
    Ok(self.document.lock().await.clone())
  }

  async fn save(
    &self,
    assessments: &[Assessment],
  ) -> Result<(), std::io::Error> {
    if self.fail.load(Ordering::SeqCst) {
      return Err(std::io::Error::other("disk on fire"));
    }
    *self.document.lock().await = assessments.to_vec();
    Ok(())
  }
}

#[tokio::test]
async fn failed_flush_rolls_back_add() {
  let fail = Arc::new(AtomicBool::new(false));
  let s = DocumentStore::open(
    FlakySnapshot::new(fail.clone()),
    Normalization::default(),
  )
  .await
  .unwrap();

  s.add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();

  fail.store(true, Ordering::SeqCst);
  let result = s.add(NewAssessment::new("Science", date(2024, 5, 1))).await;
  assert!(matches!(result, Err(Error::Persistence(_))));

  // The in-memory collection still matches the last successful flush.
  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].subject, "Math");

  // And the slot is still free once the disk recovers.
  fail.store(false, Ordering::SeqCst);
  s.add(NewAssessment::new("Science", date(2024, 5, 1)))
    .await
    .unwrap();
  assert_eq!(s.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_flush_rolls_back_remove() {
  let fail = Arc::new(AtomicBool::new(false));
  let s = DocumentStore::open(
    FlakySnapshot::new(fail.clone()),
    Normalization::default(),
  )
  .await
  .unwrap();

  let a = s
    .add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();

  fail.store(true, Ordering::SeqCst);
  assert!(matches!(s.remove(a.id).await, Err(Error::Persistence(_))));
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

// ─── JSON file round-trip ────────────────────────────────────────────────────

#[tokio::test]
async fn json_snapshot_round_trips_every_field() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("assessments.json");

  let s = DocumentStore::open(
    JsonSnapshot::new(&path),
    Normalization::default(),
  )
  .await
  .unwrap();

  let blobs = FileBlobStore::new(dir.path().join("rubrics"));
  let image = blobs.store(b"fake png bytes", "image/png").await.unwrap();

  let mut input = NewAssessment::new("Math", date(2024, 5, 1));
  input.rubric_image = Some(image.clone());
  let added = s.add(input).await.unwrap();

  // Reopen from disk; the record must come back identical.
  let reopened =
    DocumentStore::open(JsonSnapshot::new(&path), Normalization::default())
      .await
      .unwrap();
  let all = reopened.list_all().await.unwrap();
  assert_eq!(all, vec![added]);
  assert_eq!(all[0].rubric_image.as_ref(), Some(&image));
}

#[tokio::test]
async fn save_after_load_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("assessments.json");

  let s = DocumentStore::open(
    JsonSnapshot::new(&path),
    Normalization::default(),
  )
  .await
  .unwrap();
  s.add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Science", date(2024, 5, 2)))
    .await
    .unwrap();

  let before = tokio::fs::read(&path).await.unwrap();

  let adapter = JsonSnapshot::new(&path);
  let loaded = adapter.load().await.unwrap();
  adapter.save(&loaded).await.unwrap();

  let after = tokio::fs::read(&path).await.unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn missing_file_loads_as_empty() {
  let dir = tempfile::tempdir().unwrap();
  let adapter = JsonSnapshot::new(dir.path().join("nothing-here.json"));
  assert!(adapter.load().await.unwrap().is_empty());
}

// ─── Blob store ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn blob_store_and_retrieve() {
  let dir = tempfile::tempdir().unwrap();
  let blobs = FileBlobStore::new(dir.path());

  let image = blobs.store(b"rubric bytes", "image/jpeg").await.unwrap();
  assert_eq!(image.media_type, "image/jpeg");
  assert!(image.path.ends_with(".jpg"));

  let bytes = blobs.retrieve(&image).await.unwrap();
  assert_eq!(bytes, b"rubric bytes");
}

#[tokio::test]
async fn identical_uploads_share_a_blob() {
  let dir = tempfile::tempdir().unwrap();
  let blobs = FileBlobStore::new(dir.path());

  let first = blobs.store(b"same bytes", "image/png").await.unwrap();
  let second = blobs.store(b"same bytes", "image/png").await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn missing_blob_is_not_found() {
  let dir = tempfile::tempdir().unwrap();
  let blobs = FileBlobStore::new(dir.path());

  let image = docket_core::assessment::RubricImageRef {
    path:         "deadbeef.png".to_owned(),
    content_hash: "deadbeef".to_owned(),
    media_type:   "image/png".to_owned(),
  };
  assert!(matches!(
    blobs.retrieve(&image).await,
    Err(Error::RubricImageNotFound(_))
  ));
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn may_calendar_and_search_scenario() {
  let s = store().await;
  s.add(NewAssessment::new("Math", date(2024, 5, 1)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Science", date(2024, 5, 1)))
    .await
    .unwrap();
  s.add(NewAssessment::new("Math", date(2024, 5, 2)))
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();

  let days = calendar::month_view(&all, 2024, 5);
  let day1: Vec<_> = days[&1].iter().map(|a| a.subject.as_str()).collect();
  assert_eq!(day1, ["Math", "Science"]);
  let day2: Vec<_> = days[&2].iter().map(|a| a.subject.as_str()).collect();
  assert_eq!(day2, ["Math"]);

  let query =
    AssessmentQuery { subjects: None, text: Some("math".to_owned()) };
  let found = filter::apply(&all, &query, s.normalization());
  assert_eq!(found.len(), 2);
  assert_eq!(found[0].date, date(2024, 5, 1));
  assert_eq!(found[1].date, date(2024, 5, 2));
}
