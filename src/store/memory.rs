// ABOUTME: In-memory implementations of the memory cache and document store
// ABOUTME: DashMap-backed per-subject slots holding serialized documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use super::{MemoryCache, MemoryDocumentStore};
use crate::errors::AppResult;
use crate::models::Memory;
use dashmap::DashMap;
use uuid::Uuid;

/// Device-local cache with one serialized slot per subject.
///
/// Slots hold the serialized document rather than the live struct so a cache
/// read exercises the same decode path as a durable read.
#[derive(Debug, Default)]
pub struct LocalMemoryCache {
    slots: DashMap<Uuid, Vec<u8>>,
}

impl LocalMemoryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl MemoryCache for LocalMemoryCache {
    fn load(&self, subject_id: Uuid) -> AppResult<Option<Memory>> {
        match self.slots.get(&subject_id) {
            Some(slot) => {
                let memory: Memory = serde_json::from_slice(&slot)?;
                Ok(Some(memory))
            }
            None => Ok(None),
        }
    }

    fn store(&self, subject_id: Uuid, memory: &Memory) -> AppResult<()> {
        let serialized = serde_json::to_vec(memory)?;
        self.slots.insert(subject_id, serialized);
        Ok(())
    }

    fn remove(&self, subject_id: Uuid) {
        self.slots.remove(&subject_id);
    }
}

/// In-memory document store used by tests and cache-only local deployments.
///
/// Durable backends implement [`MemoryDocumentStore`] out of crate against
/// the same wholesale-replace contract.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<Uuid, Vec<u8>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document exists for the subject
    #[must_use]
    pub fn contains(&self, subject_id: Uuid) -> bool {
        self.documents.contains_key(&subject_id)
    }
}

#[async_trait::async_trait]
impl MemoryDocumentStore for InMemoryDocumentStore {
    async fn load(&self, subject_id: Uuid) -> AppResult<Option<Memory>> {
        match self.documents.get(&subject_id) {
            Some(doc) => {
                let memory: Memory = serde_json::from_slice(&doc)?;
                Ok(Some(memory))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, subject_id: Uuid, memory: &Memory) -> AppResult<()> {
        let serialized = serde_json::to_vec(memory)?;
        self.documents.insert(subject_id, serialized);
        Ok(())
    }

    async fn delete(&self, subject_id: Uuid) -> AppResult<()> {
        self.documents.remove(&subject_id);
        Ok(())
    }
}
