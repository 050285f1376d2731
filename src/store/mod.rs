// ABOUTME: Persistence boundary for per-subject memory with pluggable backends
// ABOUTME: Sync local cache slot plus async durable document store behind traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

//! Memory persistence boundary.
//!
//! Writes go to a fast local cache synchronously and opportunistically to a
//! durable remote store; reads prefer the remote store under a bounded
//! timeout and fall back to the cache on any failure. An absent remote store
//! models an unauthenticated subject and degrades every operation to
//! cache-only, which is a valid state rather than an error.

/// In-memory cache and document-store implementations
pub mod memory;

/// Cache-first / remote-best-effort memory store service
pub mod service;

use crate::errors::AppResult;
use crate::models::Memory;
use uuid::Uuid;

pub use memory::{InMemoryDocumentStore, LocalMemoryCache};
pub use service::{MemoryStore, MemoryStoreConfig};

/// Stable durable-store path for a subject's memory document
#[must_use]
pub fn memory_document_path(subject_id: Uuid) -> String {
    format!("subjects/{subject_id}/memory/current")
}

/// Device-local cache holding one serialized memory slot per subject.
///
/// Writes are synchronous and last-writer-wins; there is no optimistic
/// locking, the later write overwrites the earlier one in full.
pub trait MemoryCache: Send + Sync {
    /// Read the cached memory for a subject
    ///
    /// # Errors
    ///
    /// Returns an error when the cached slot cannot be decoded
    fn load(&self, subject_id: Uuid) -> AppResult<Option<Memory>>;

    /// Overwrite the cached memory for a subject
    ///
    /// # Errors
    ///
    /// Returns an error when the memory cannot be encoded
    fn store(&self, subject_id: Uuid, memory: &Memory) -> AppResult<()>;

    /// Remove the cached slot; clearing an absent slot is a no-op
    fn remove(&self, subject_id: Uuid);
}

/// Durable document store holding one memory document per subject.
///
/// `save` replaces the stored document wholesale; there is no field-level
/// merge, so the engine alone is responsible for copying unrelated fields
/// forward into each new document.
#[async_trait::async_trait]
pub trait MemoryDocumentStore: Send + Sync {
    /// Read the subject's current memory document
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed document
    async fn load(&self, subject_id: Uuid) -> AppResult<Option<Memory>>;

    /// Replace the subject's memory document in full
    ///
    /// # Errors
    ///
    /// Returns an error on transport or encoding failure
    async fn save(&self, subject_id: Uuid, memory: &Memory) -> AppResult<()>;

    /// Delete the subject's memory document; idempotent
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure
    async fn delete(&self, subject_id: Uuid) -> AppResult<()>;
}
