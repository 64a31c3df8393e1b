use std::{
    collections::HashMap,
    sync::{Arc, Condvar, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use crate::{
    assets::{decode::Artwork, decode::decode_artwork, loader::ArtworkLoader},
    foundation::error::{QuirlError, QuirlResult},
};

enum Slot {
    InFlight,
    Ready(Arc<Artwork>),
}

/// Append-only artwork cache keyed by frame id, with a single-flight guard.
///
/// The frame catalog is static, so entries never expire: once a frame's
/// artwork is decoded it is reused for the life of the composer. Duplicate
/// concurrent loads of one frame share the in-flight fetch; waiters are
/// bounded by `wait` so a hung loader resolves into the fallback path instead
/// of hanging the composition. Failed loads are evicted rather than cached,
/// so a later request retries.
pub struct ArtworkCache {
    slots: Mutex<HashMap<String, Slot>>,
    cond: Condvar,
    wait: Duration,
}

impl ArtworkCache {
    /// Create an empty cache with the given bounded wait for in-flight loads.
    pub fn new(wait: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            cond: Condvar::new(),
            wait,
        }
    }

    /// Number of decoded entries currently cached.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    /// Whether the cache holds no decoded entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the artwork for `frame_id`, fetching and decoding through
    /// `loader` on first use.
    pub fn get_or_load(
        &self,
        frame_id: &str,
        rel_path: &str,
        loader: &dyn ArtworkLoader,
    ) -> QuirlResult<Arc<Artwork>> {
        let deadline = Instant::now() + self.wait;
        let mut slots = self.lock();

        loop {
            match slots.get(frame_id) {
                Some(Slot::Ready(artwork)) => return Ok(artwork.clone()),
                Some(Slot::InFlight) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(QuirlError::asset_load(format!(
                            "timed out waiting for in-flight artwork load of '{frame_id}'"
                        )));
                    }
                    let (guard, _timeout) = self
                        .cond
                        .wait_timeout(slots, deadline - now)
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                    slots = guard;
                }
                None => break,
            }
        }

        slots.insert(frame_id.to_string(), Slot::InFlight);
        drop(slots);

        let loaded = loader
            .fetch(rel_path)
            .and_then(|bytes| decode_artwork(rel_path, &bytes));

        let mut slots = self.lock();
        let result = match loaded {
            Ok(artwork) => {
                let artwork = Arc::new(artwork);
                slots.insert(frame_id.to_string(), Slot::Ready(artwork.clone()));
                Ok(artwork)
            }
            Err(e) => {
                slots.remove(frame_id);
                Err(e)
            }
        };
        drop(slots);
        self.cond.notify_all();
        result
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for ArtworkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkCache")
            .field("entries", &self.len())
            .field("wait", &self.wait)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
