// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-berth serialization of validate-then-write.
//!
//! Validation of a booking and the write that follows it run while the
//! berth's lock is held. Guards release on drop, including when the
//! owning future is cancelled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>;

/// Holds the berths locked by one operation.
///
/// On drop the berth mutexes are released and any slot no other
/// operation is waiting on is removed from the registry.
#[derive(Debug)]
pub struct BerthGuard {
    berth_ids: Vec<i64>,
    guards: Vec<OwnedMutexGuard<()>>,
    slots: Slots,
}

impl BerthGuard {
    /// The locked berth ids, ascending.
    #[must_use]
    pub fn berth_ids(&self) -> &[i64] {
        &self.berth_ids
    }
}

impl Drop for BerthGuard {
    fn drop(&mut self) {
        self.guards.clear();

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for berth_id in &self.berth_ids {
            // The registry's own reference is the only one left.
            if slots
                .get(berth_id)
                .is_some_and(|slot| Arc::strong_count(slot) == 1)
            {
                slots.remove(berth_id);
            }
        }
    }
}

/// A registry of async mutexes keyed by berth id.
///
/// Slots exist only while some operation holds or waits on them.
#[derive(Debug, Default)]
pub struct BerthLocks {
    slots: Slots,
}

impl BerthLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, berth_id: i64) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // Also drops slots left behind by lock futures cancelled mid-wait.
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
        Arc::clone(slots.entry(berth_id).or_default())
    }

    /// Number of berths currently held or awaited.
    #[must_use]
    pub fn tracked_berths(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Locks every listed berth.
    ///
    /// Ids are deduplicated and acquired in ascending order, so two
    /// operations touching the same pair of berths cannot deadlock.
    pub async fn lock(&self, berth_ids: &[i64]) -> BerthGuard {
        let mut ordered: Vec<i64> = berth_ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut guards: Vec<OwnedMutexGuard<()>> = Vec::with_capacity(ordered.len());
        for berth_id in &ordered {
            guards.push(self.slot(*berth_id).lock_owned().await);
        }

        BerthGuard {
            berth_ids: ordered,
            guards,
            slots: Arc::clone(&self.slots),
        }
    }
}
