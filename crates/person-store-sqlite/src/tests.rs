//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use person_core::{Person, store::{PersonStore, StoreError}};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn person(first: &str, last: &str) -> Person {
  Person {
    id:               None,
    first_name:       first.into(),
    last_name:        last.into(),
    date_of_birth:    NaiveDate::from_ymd_opt(1985, 5, 20).unwrap(),
    city_of_birth:    "London".into(),
    country_of_birth: "UK".into(),
    nationality:      "British".into(),
    avatar:           None,
  }
}

// ─── Insert / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn save_without_id_inserts_and_assigns_id() {
  let s = store().await;

  let saved = s.save(person("Jane", "Smith")).await.unwrap();
  let id = saved.id.expect("assigned id");

  let fetched = s.find_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched, saved);
  assert_eq!(fetched.date_of_birth, NaiveDate::from_ymd_opt(1985, 5, 20).unwrap());
  assert_eq!(fetched.avatar, None);
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
  let s = store().await;
  let a = s.save(person("John", "Doe")).await.unwrap();
  let b = s.save(person("Jane", "Smith")).await.unwrap();
  let c = s.save(person("Alice", "Johnson")).await.unwrap();

  let all = s.find_all().await.unwrap();
  let ids: Vec<_> = all.iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![a.id, b.id, c.id]);
  assert_eq!(s.count().await.unwrap(), 3);
}

#[tokio::test]
async fn find_by_name_pair_is_exact_and_case_sensitive() {
  let s = store().await;
  s.save(person("John", "Doe")).await.unwrap();
  s.save(person("John", "Smith")).await.unwrap();

  let hits = s.find_by_name_pair("John", "Doe").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].last_name, "Doe");

  assert!(s.find_by_name_pair("john", "doe").await.unwrap().is_empty());
  assert!(s.find_by_name_pair("Jane", "Doe").await.unwrap().is_empty());
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_with_id_replaces_whole_row() {
  let s = store().await;
  let mut saved = s.save(person("John", "Doe")).await.unwrap();

  saved.last_name = "Smith".into();
  saved.city_of_birth = "Paris".into();
  saved.avatar = Some("aGVsbG8=".into());
  let replaced = s.save(saved.clone()).await.unwrap();
  assert_eq!(replaced, saved);

  let fetched = s.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.last_name, "Smith");
  assert_eq!(fetched.city_of_birth, "Paris");
  assert_eq!(fetched.avatar.as_deref(), Some("aGVsbG8="));
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn save_with_unknown_id_fails() {
  let s = store().await;
  let mut ghost = person("Ghost", "Writer");
  ghost.id = Some(77);

  let err = s.save(ghost).await.unwrap_err();
  assert!(matches!(err, Error::MissingRow(77)));
  assert!(!err.is_duplicate_name());
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_name_pair_violates_unique_index() {
  let s = store().await;
  s.save(person("John", "Doe")).await.unwrap();

  let err = s.save(person("John", "Doe")).await.unwrap_err();
  assert!(err.is_duplicate_name(), "got {err:?}");
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn renaming_onto_existing_pair_is_rejected() {
  let s = store().await;
  s.save(person("John", "Doe")).await.unwrap();
  let mut jane = s.save(person("Jane", "Smith")).await.unwrap();

  jane.first_name = "John".into();
  jane.last_name = "Doe".into();
  let err = s.save(jane).await.unwrap_err();
  assert!(err.is_duplicate_name(), "got {err:?}");
}

// ─── Exists / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let id = s.save(person("John", "Doe")).await.unwrap().id.unwrap();
  assert!(s.exists_by_id(id).await.unwrap());

  s.delete_by_id(id).await.unwrap();
  assert!(!s.exists_by_id(id).await.unwrap());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_missing_is_silent() {
  let s = store().await;
  s.delete_by_id(999).await.unwrap();
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = s.save(person("John", "Doe")).await.unwrap().id.unwrap();
  s.delete_by_id(first).await.unwrap();

  let second = s.save(person("John", "Doe")).await.unwrap().id.unwrap();
  assert!(second > first);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!("person-store-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("reopen.db");
  let _ = std::fs::remove_file(&path);

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.save(person("John", "Doe")).await.unwrap().id.unwrap()
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.find_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name, "John");
  std::fs::remove_dir_all(&dir).ok();
}
