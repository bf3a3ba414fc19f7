use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::storage::{OrderedWrites, Storage, StorageKey, StorageValue};

/// A [`Storage`] kept entirely in memory.
///
/// Every clone shares the same underlying map, so state committed through one
/// handle is visible through all of them.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    db: Arc<RwLock<BTreeMap<StorageKey, StorageValue>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.db.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn commit(&self, writes: &OrderedWrites) {
        let mut db = self.db.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in &writes.ordered_writes {
            match value {
                Some(value) => {
                    db.insert(key.clone(), value.clone());
                }
                None => {
                    db.remove(key);
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
