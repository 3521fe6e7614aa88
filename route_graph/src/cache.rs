use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::StreetGraph;

struct CachedGraph {
    graph: Arc<StreetGraph>,
    built_at: Instant,
}

/// Holds the canonical graph and rebuilds it once it's older than the TTL.
///
/// Callers only ever get an `Arc<StreetGraph>`, so nobody can mutate the canonical graph. A rebuild
/// swaps in a new `Arc` after it finishes; queries already holding the old one keep using it
/// undisturbed. Rebuilds happen while holding the lock, so concurrent callers wait for one build
/// instead of racing to do their own.
pub struct GraphCache {
    ttl: Duration,
    state: Mutex<Option<CachedGraph>>,
}

impl GraphCache {
    pub fn new(ttl: Duration) -> GraphCache {
        GraphCache {
            ttl,
            state: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached graph if it was built within the TTL of `now`, otherwise calls `build`
    /// and caches the result. If the build fails, the error is returned and whatever was cached
    /// before stays put.
    pub fn get_or_build<F>(&self, now: Instant, build: F) -> Result<Arc<StreetGraph>>
    where
        F: FnOnce() -> Result<StreetGraph>,
    {
        let mut state = self.lock();
        if let Some(ref cached) = *state {
            if now.saturating_duration_since(cached.built_at) < self.ttl {
                return Ok(cached.graph.clone());
            }
            info!("Routing graph is stale, rebuilding");
        }

        let graph = Arc::new(build()?);
        *state = Some(CachedGraph {
            graph: graph.clone(),
            built_at: now,
        });
        Ok(graph)
    }

    /// Forces the next `get_or_build` to rebuild.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// When the current graph was built, if there is one.
    pub fn built_at(&self) -> Option<Instant> {
        self.lock().as_ref().map(|cached| cached.built_at)
    }

    // The state is only ever replaced wholesale, so a panic elsewhere while holding the lock can't
    // leave it half-written.
    fn lock(&self) -> MutexGuard<'_, Option<CachedGraph>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
