//! Short-lived record of the last copy, used to cycle through formats.
//!
//! A repeated invocation on the same page inside the TTL window advances to
//! the next format; anything else starts over at index 0.

use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::store::ScratchStore;
use crate::Error;
use crate::link::{Fingerprint, PageInfo};

/// Default scratch-store key for the cycle entry.
pub const DEFAULT_CACHE_KEY: &str = "richlinker-last-copy";

/// Default cycle window in milliseconds.
pub const DEFAULT_TTL_MS: i64 = 1_000;

/// Stored record of the last successful clipboard write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub timestamp: i64,
    pub format_index: usize,
    pub page_fingerprint: Fingerprint,
}

/// Cycle cache over an injected store and clock.
#[derive(Debug, Clone)]
pub struct CycleCache<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    ttl_ms: i64,
}

impl<S: ScratchStore> CycleCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: ScratchStore, C: Clock> CycleCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock, key: DEFAULT_CACHE_KEY.to_string(), ttl_ms: DEFAULT_TTL_MS }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Read the live entry, clearing it when expired or unparseable.
    pub async fn load(&self) -> Option<CacheEntry> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "cycle entry unreadable, starting over");
                return None;
            }
        };

        let entry = match serde_json::from_str::<CacheEntry>(&raw).map_err(Error::from) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupt cycle entry");
                self.clear().await;
                return None;
            }
        };

        let Some(age) = self.clock.now_ms().checked_sub(entry.timestamp) else {
            tracing::warn!(timestamp = entry.timestamp, "discarding cycle entry with unusable timestamp");
            self.clear().await;
            return None;
        };
        if !(0..=self.ttl_ms).contains(&age) {
            tracing::debug!(age_ms = age, "cycle entry expired");
            self.clear().await;
            return None;
        }

        Some(entry)
    }

    /// Index of the format to copy for `page` out of `num_formats` candidates.
    pub async fn pick_index(&self, page: &PageInfo, num_formats: usize) -> usize {
        if num_formats == 0 {
            return 0;
        }

        let Some(entry) = self.load().await else {
            return 0;
        };

        if entry.page_fingerprint != page.fingerprint() {
            tracing::debug!("different page since last copy, starting over");
            return 0;
        }

        // The format list shrank, or the entry was written by something else.
        if entry.format_index >= num_formats {
            tracing::debug!(stored = entry.format_index, num_formats, "stored index out of range, starting over");
            return 0;
        }

        let next = (entry.format_index + 1) % num_formats;
        tracing::debug!(from = entry.format_index, to = next, "cycling format");
        next
    }

    /// Overwrite the entry after a successful clipboard write.
    pub async fn record(&self, page: &PageInfo, format_index: usize) -> Result<(), Error> {
        let entry = CacheEntry {
            timestamp: self.clock.now_ms(),
            format_index,
            page_fingerprint: page.fingerprint(),
        };
        let json = serde_json::to_string(&entry)?;
        self.store.set(&self.key, &json).await
    }

    async fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key).await {
            tracing::warn!(error = %e, "failed to remove cycle entry");
        }
    }
}
