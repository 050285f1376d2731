// ABOUTME: Cache-first memory store with remote-best-effort reads and writes
// ABOUTME: Remote reads race a bounded timeout; remote writes are fire-and-forget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use super::{MemoryCache, MemoryDocumentStore};
use crate::constants::store::REMOTE_READ_TIMEOUT_MS;
use crate::errors::AppResult;
use crate::models::Memory;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

/// Store timing configuration
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// Deadline for the remote read before falling back to the cache
    pub read_timeout: Duration,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(REMOTE_READ_TIMEOUT_MS),
        }
    }
}

/// Per-subject memory store with a local-cache-first persistence policy.
///
/// An absent remote store models an unauthenticated subject; every operation
/// then degrades to cache-only. This is a best-effort freshness policy, not
/// a consistency guarantee: a read may return data up to one full update
/// cycle stale.
pub struct MemoryStore {
    cache: Arc<dyn MemoryCache>,
    remote: Option<Arc<dyn MemoryDocumentStore>>,
    config: MemoryStoreConfig,
}

impl MemoryStore {
    /// Create a store with the default read timeout
    #[must_use]
    pub fn new(
        cache: Arc<dyn MemoryCache>,
        remote: Option<Arc<dyn MemoryDocumentStore>>,
    ) -> Self {
        Self::with_config(cache, remote, MemoryStoreConfig::default())
    }

    /// Create a store with explicit timing configuration
    #[must_use]
    pub fn with_config(
        cache: Arc<dyn MemoryCache>,
        remote: Option<Arc<dyn MemoryDocumentStore>>,
        config: MemoryStoreConfig,
    ) -> Self {
        Self {
            cache,
            remote,
            config,
        }
    }

    /// Read the subject's memory, preferring the remote store.
    ///
    /// The remote read races the configured timeout; exactly one of remote
    /// success or cache fallback completes the call, the loser is discarded.
    /// A remote success also refreshes the cache. Timeout, transport error,
    /// malformed document, and unsupported schema all fall back to the
    /// cache; a corrupt cache slot reads as absent so the caller bootstraps.
    pub async fn load(&self, subject_id: Uuid) -> Option<Memory> {
        if let Some(remote) = &self.remote {
            match timeout(self.config.read_timeout, remote.load(subject_id)).await {
                Ok(Ok(Some(memory))) => {
                    if memory.is_supported_schema() {
                        if let Err(error) = self.cache.store(subject_id, &memory) {
                            tracing::warn!(%subject_id, %error, "cache refresh failed");
                        }
                        return Some(memory);
                    }
                    tracing::warn!(
                        %subject_id,
                        schema_version = memory.schema_version,
                        "stored memory schema not supported, falling back to cache"
                    );
                }
                Ok(Ok(None)) => {
                    tracing::debug!(%subject_id, "no remote memory document, falling back to cache");
                }
                Ok(Err(error)) => {
                    tracing::warn!(%subject_id, %error, "remote memory read failed, falling back to cache");
                }
                Err(_) => {
                    tracing::warn!(
                        %subject_id,
                        timeout_ms = self.config.read_timeout.as_millis() as u64,
                        "remote memory read timed out, falling back to cache"
                    );
                }
            }
        }

        self.load_cached(subject_id)
    }

    /// Read the local cache only
    #[must_use]
    pub fn load_cached(&self, subject_id: Uuid) -> Option<Memory> {
        match self.cache.load(subject_id) {
            Ok(Some(memory)) if memory.is_supported_schema() => Some(memory),
            Ok(Some(memory)) => {
                tracing::warn!(
                    %subject_id,
                    schema_version = memory.schema_version,
                    "cached memory schema not supported"
                );
                None
            }
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%subject_id, %error, "cached memory unreadable");
                None
            }
        }
    }

    /// Persist a derived memory: cache synchronously, remote fire-and-forget.
    ///
    /// The cache is written even when the subject has no durable-store
    /// identity. The remote write is spawned and never retried; a failure is
    /// logged and degrades personalization freshness without blocking or
    /// corrupting local state. From the caller's point of view the update
    /// has succeeded once the cache write has.
    pub fn persist(&self, subject_id: Uuid, memory: &Memory) {
        if let Err(error) = self.cache.store(subject_id, memory) {
            tracing::warn!(%subject_id, %error, "local memory cache write failed");
        }

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let snapshot = memory.clone();
            tokio::spawn(async move {
                if let Err(error) = remote.save(subject_id, &snapshot).await {
                    tracing::warn!(%subject_id, %error, "remote memory write failed");
                }
            });
        }
    }

    /// Remove the subject's memory from both cache and durable store.
    ///
    /// Used on logout and account deletion; clearing twice is a no-op the
    /// second time.
    ///
    /// # Errors
    ///
    /// Returns an error when the durable-store deletion fails; the local
    /// cache entry is removed regardless.
    pub async fn clear(&self, subject_id: Uuid) -> AppResult<()> {
        self.cache.remove(subject_id);
        if let Some(remote) = &self.remote {
            remote.delete(subject_id).await?;
        }
        Ok(())
    }
}
