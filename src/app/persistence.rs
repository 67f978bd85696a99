// SPDX-License-Identifier: MPL-2.0
//! Zoom level persistence.
//!
//! The unified height is written to the key-value store under a single key
//! as a plain decimal string. Nothing here ever reports an error to the UI:
//! unreadable or invalid values read as absent, and failed writes are logged.

use super::persisted_state::KeyValueStore;
use crate::ui::state::zoom::UnifiedHeight;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Storage key of the unified height.
pub const UNIFIED_HEIGHT_KEY: &str = "calendar.unified_height";

/// Parses a stored value, accepting only finite numbers already in range.
///
/// Out-of-range values are rejected rather than clamped.
#[must_use]
pub fn parse_stored_height(raw: &str) -> Option<UnifiedHeight> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .and_then(UnifiedHeight::try_new)
}

/// Loads and saves the zoom level, skipping redundant writes.
///
/// Write jobs may run in any order on the runtime. Each carries the
/// generation it was issued at, and a job older than the last one written
/// is dropped, so the stored value is always the most recently issued one.
pub struct ZoomPersistence {
    store: Arc<dyn KeyValueStore>,
    last_saved: Option<UnifiedHeight>,
    issued: u64,
    written: Arc<Mutex<u64>>,
}

impl std::fmt::Debug for ZoomPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomPersistence")
            .field("last_saved", &self.last_saved)
            .finish_non_exhaustive()
    }
}

impl ZoomPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            last_saved: None,
            issued: 0,
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Reads the stored height. Resolves to `None` when absent, invalid or
    /// unreadable.
    pub fn load(&self) -> impl Future<Output = Option<UnifiedHeight>> + Send + 'static {
        let store = Arc::clone(&self.store);
        async move {
            match store.get(UNIFIED_HEIGHT_KEY).await {
                Ok(Some(raw)) => {
                    let height = parse_stored_height(&raw);
                    if height.is_none() {
                        tracing::warn!(%raw, "ignoring invalid stored zoom level");
                    }
                    height
                }
                Ok(None) => None,
                Err(err) => {
                    tracing::warn!(%err, "failed to read zoom level");
                    None
                }
            }
        }
    }

    /// Records the value that came back from [`load`](Self::load), so saving
    /// it again is a no-op.
    pub fn mark_loaded(&mut self, height: Option<UnifiedHeight>) {
        self.last_saved = height;
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<UnifiedHeight> {
        self.last_saved
    }

    /// Returns the write job for a settled `height`, or `None` if that value
    /// is already stored.
    ///
    /// The job never fails; write errors are logged. A job that runs after a
    /// newer one has written does nothing.
    pub fn save(
        &mut self,
        height: UnifiedHeight,
    ) -> Option<impl Future<Output = ()> + Send + 'static> {
        if self.last_saved == Some(height) {
            return None;
        }
        self.last_saved = Some(height);
        self.issued += 1;

        let generation = self.issued;
        let written = Arc::clone(&self.written);
        let store = Arc::clone(&self.store);
        let raw = height.value().to_string();
        Some(async move {
            let mut written = written.lock().await;
            if *written > generation {
                tracing::debug!(generation, latest = *written, "dropping stale zoom write");
                return;
            }
            *written = generation;
            if let Err(err) = store.set(UNIFIED_HEIGHT_KEY, raw).await {
                tracing::warn!(%err, "failed to save zoom level");
            }
        })
    }
}
