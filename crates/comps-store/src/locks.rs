//! Per-name mutual exclusion for read-modify-write cycles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One mutex per storage key, created on first use.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.to_string()).or_default())
    }

    /// Run `f` while holding the lock for every key in `keys`.
    ///
    /// Keys are locked in sorted order so two callers locking overlapping
    /// sets cannot deadlock. Duplicate keys are locked once.
    pub fn with_keys<R>(&self, keys: &[&str], f: impl FnOnce() -> R) -> R {
        let mut keys = keys.to_vec();
        keys.sort_unstable();
        keys.dedup();
        let result = {
            let slots: Vec<Arc<Mutex<()>>> = keys.iter().map(|key| self.slot(key)).collect();
            let _guards: Vec<MutexGuard<'_, ()>> = slots
                .iter()
                .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner))
                .collect();
            f()
        };
        self.release(&keys);
        result
    }

    /// Drop slots nobody else holds, so lookups of unknown names leave
    /// nothing behind.
    fn release(&self, keys: &[&str]) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            if slots
                .get(*key)
                .is_some_and(|slot| Arc::strong_count(slot) == 1)
            {
                slots.remove(*key);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
