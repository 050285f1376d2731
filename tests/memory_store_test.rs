// ABOUTME: Integration tests for the cache-first memory store boundary
// ABOUTME: Covers the read timeout race, fallbacks, fire-and-forget writes, and clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, timestamp};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use vital_insight::errors::{AppError, AppResult};
use vital_insight::models::Memory;
use vital_insight::store::{
    memory_document_path, InMemoryDocumentStore, LocalMemoryCache, MemoryCache,
    MemoryDocumentStore, MemoryStore, MemoryStoreConfig,
};

/// Document store that answers only after a fixed delay
struct SlowDocumentStore {
    inner: InMemoryDocumentStore,
    delay: Duration,
}

#[async_trait::async_trait]
impl MemoryDocumentStore for SlowDocumentStore {
    async fn load(&self, subject_id: Uuid) -> AppResult<Option<Memory>> {
        tokio::time::sleep(self.delay).await;
        self.inner.load(subject_id).await
    }

    async fn save(&self, subject_id: Uuid, memory: &Memory) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(subject_id, memory).await
    }

    async fn delete(&self, subject_id: Uuid) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(subject_id).await
    }
}

/// Document store whose every operation fails
struct FailingDocumentStore;

#[async_trait::async_trait]
impl MemoryDocumentStore for FailingDocumentStore {
    async fn load(&self, _subject_id: Uuid) -> AppResult<Option<Memory>> {
        Err(AppError::storage("remote unavailable"))
    }

    async fn save(&self, _subject_id: Uuid, _memory: &Memory) -> AppResult<()> {
        Err(AppError::storage("remote unavailable"))
    }

    async fn delete(&self, _subject_id: Uuid) -> AppResult<()> {
        Err(AppError::storage("remote unavailable"))
    }
}

/// Cache whose slot always decodes badly
struct CorruptCache;

impl MemoryCache for CorruptCache {
    fn load(&self, _subject_id: Uuid) -> AppResult<Option<Memory>> {
        Err(AppError::serialization("corrupt cache slot"))
    }

    fn store(&self, _subject_id: Uuid, _memory: &Memory) -> AppResult<()> {
        Ok(())
    }

    fn remove(&self, _subject_id: Uuid) {}
}

fn sample_memory() -> Memory {
    let mut memory = Memory::bootstrap(timestamp(2025, 8, 1));
    memory.interaction_count = 3;
    memory.profile.display_name = Some("Jordan".to_owned());
    memory
}

fn short_timeout() -> MemoryStoreConfig {
    MemoryStoreConfig {
        read_timeout: Duration::from_millis(50),
    }
}

// === Reads ===

#[tokio::test]
async fn test_remote_read_wins_and_refreshes_cache() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let remote = Arc::new(InMemoryDocumentStore::new());
    remote.save(subject, &sample_memory()).await.unwrap();

    let store = MemoryStore::new(cache.clone(), Some(remote));
    let loaded = store.load(subject).await.unwrap();
    assert_eq!(loaded.interaction_count, 3);

    // Remote success refreshed the local slot
    let cached = cache.load(subject).unwrap().unwrap();
    assert_eq!(cached, loaded);
}

#[tokio::test]
async fn test_timed_out_remote_read_falls_back_to_cache() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    cache.store(subject, &sample_memory()).unwrap();

    let remote = Arc::new(SlowDocumentStore {
        inner: InMemoryDocumentStore::new(),
        delay: Duration::from_secs(5),
    });
    let store = MemoryStore::with_config(cache, Some(remote), short_timeout());

    let loaded = store.load(subject).await.unwrap();
    assert_eq!(loaded.interaction_count, 3);
}

#[tokio::test]
async fn test_remote_error_falls_back_to_cache() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    cache.store(subject, &sample_memory()).unwrap();

    let store = MemoryStore::new(cache, Some(Arc::new(FailingDocumentStore)));
    let loaded = store.load(subject).await.unwrap();
    assert_eq!(loaded.profile.display_name.as_deref(), Some("Jordan"));
}

#[tokio::test]
async fn test_unsupported_remote_schema_falls_back_to_cache() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    cache.store(subject, &sample_memory()).unwrap();

    let mut future_doc = sample_memory();
    future_doc.schema_version = 99;
    future_doc.interaction_count = 42;
    let remote = Arc::new(InMemoryDocumentStore::new());
    remote.save(subject, &future_doc).await.unwrap();

    let store = MemoryStore::new(cache, Some(remote));
    let loaded = store.load(subject).await.unwrap();
    assert_eq!(loaded.interaction_count, 3);
}

#[tokio::test]
async fn test_corrupt_cache_reads_as_absent() {
    init_test_logging();
    let store = MemoryStore::new(Arc::new(CorruptCache), None);
    assert!(store.load(Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn test_load_without_remote_or_cache_is_none() {
    init_test_logging();
    let store = MemoryStore::new(Arc::new(LocalMemoryCache::new()), None);
    assert!(store.load(Uuid::new_v4()).await.is_none());
}

// === Writes ===

#[tokio::test]
async fn test_persist_without_remote_identity_still_caches() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let store = MemoryStore::new(cache.clone(), None);

    store.persist(subject, &sample_memory());
    assert!(cache.load(subject).unwrap().is_some());
}

#[tokio::test]
async fn test_persist_reaches_remote_eventually() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let remote = Arc::new(InMemoryDocumentStore::new());
    let store = MemoryStore::new(cache, Some(remote.clone()));

    store.persist(subject, &sample_memory());

    // The remote write is fire-and-forget; give the spawned task a moment
    for _ in 0..50 {
        if remote.contains(subject) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(remote.contains(subject));
}

#[tokio::test]
async fn test_remote_write_failure_never_surfaces() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let store = MemoryStore::new(cache.clone(), Some(Arc::new(FailingDocumentStore)));

    // No panic, no error: local state is intact afterwards
    store.persist(subject, &sample_memory());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(cache.load(subject).unwrap().is_some());
}

#[tokio::test]
async fn test_last_writer_wins_in_cache_slot() {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let store = MemoryStore::new(cache.clone(), None);

    let mut first = sample_memory();
    first.interaction_count = 1;
    let mut second = sample_memory();
    second.interaction_count = 2;

    store.persist(subject, &first);
    store.persist(subject, &second);
    assert_eq!(cache.load(subject).unwrap().unwrap().interaction_count, 2);
}

// === Clear ===

#[tokio::test]
async fn test_clear_removes_cache_and_remote_and_is_idempotent() -> anyhow::Result<()> {
    init_test_logging();
    let subject = Uuid::new_v4();
    let cache = Arc::new(LocalMemoryCache::new());
    let remote = Arc::new(InMemoryDocumentStore::new());
    cache.store(subject, &sample_memory())?;
    remote.save(subject, &sample_memory()).await?;

    let store = MemoryStore::new(cache.clone(), Some(remote.clone()));
    store.clear(subject).await?;
    assert!(cache.load(subject)?.is_none());
    assert!(!remote.contains(subject));

    // Clearing again is a no-op, not an error
    store.clear(subject).await?;
    Ok(())
}

// === Document layout ===

#[test]
fn test_memory_document_path_is_stable() {
    let subject = Uuid::nil();
    assert_eq!(
        memory_document_path(subject),
        format!("subjects/{subject}/memory/current")
    );
}

#[test]
fn test_memory_document_serializes_with_camel_case_schema_field() {
    let memory = sample_memory();
    let json = serde_json::to_string(&memory).unwrap();
    assert!(json.contains("\"schemaVersion\":1"));
    assert!(json.contains("\"interactionCount\":3"));
    assert!(json.contains("\"lastUpdatedDate\""));

    let roundtrip: Memory = serde_json::from_str(&json).unwrap();
    assert_eq!(roundtrip, memory);
}
