//! Memoised composition using moka
//!
//! Reports are keyed by a BLAKE3 digest of everything composition depends
//! on, so identical inputs share one entry and any change misses.

use crate::composer::{InsightComposer, InsightReport};
use crate::error::InsightResult;
use chrono::{DateTime, Utc};
use insight_model::StoryRecord;
use moka::sync::Cache;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Digest of records, configuration and reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportKey([u8; 32]);

impl ReportKey {
    /// Fingerprint the inputs of one composition
    ///
    /// # Errors
    /// Returns an error if the inputs cannot be serialised.
    pub fn compute(
        composer: &InsightComposer,
        records: &[StoryRecord],
        reference_now: &DateTime<Utc>,
    ) -> InsightResult<Self> {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, &(records, composer.config(), reference_now))?;
        Ok(Self(*hasher.finalize().as_bytes()))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ReportKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Bounded cache of composed reports
///
/// The engine holds no state of its own; callers that re-render the same
/// dashboard opt into this wrapper.
#[derive(Debug, Clone)]
pub struct InsightCache {
    inner: Cache<ReportKey, Arc<InsightReport>>,
}

impl InsightCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Cache whose reports expire `ttl` after composition
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .name("insight-reports")
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    /// Get a cached report
    #[inline]
    #[must_use]
    pub fn get(&self, key: &ReportKey) -> Option<Arc<InsightReport>> {
        self.inner.get(key)
    }

    /// Return the cached report for these inputs, composing it on a miss
    ///
    /// # Errors
    /// Returns an error if the inputs cannot be fingerprinted.
    pub fn get_or_compose(
        &self,
        composer: &InsightComposer,
        records: &[StoryRecord],
        reference_now: DateTime<Utc>,
    ) -> InsightResult<Arc<InsightReport>> {
        let key = ReportKey::compute(composer, records, &reference_now)?;

        if let Some(cached) = self.inner.get(&key) {
            tracing::debug!(key = %key.short(), "insight cache hit");
            return Ok(cached);
        }

        tracing::debug!(key = %key.short(), "insight cache miss");
        let report = Arc::new(composer.compose(records, reference_now));
        self.inner.insert(key, Arc::clone(&report));
        Ok(report)
    }

    /// Invalidate one entry
    #[inline]
    pub fn invalidate(&self, key: &ReportKey) {
        self.inner.invalidate(key);
    }

    /// Clear every entry
    #[inline]
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Current statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for InsightCache {
    fn default() -> Self {
        Self::new(256)
    }
}
