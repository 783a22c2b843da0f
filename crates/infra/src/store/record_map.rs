use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lifegoals_core::{DomainError, Entity};

/// Entity-keyed record map shared by the in-memory stores.
///
/// Each call takes the lock once, so reads and writes are atomic per record.
/// A poisoned lock is reported as `DomainError::Storage` rather than
/// silently returning nothing.
#[derive(Debug)]
pub struct RecordMap<V: Entity> {
    inner: RwLock<HashMap<V::Id, V>>,
}

impl<V: Entity> RecordMap<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<V::Id, V>>, DomainError> {
        self.inner
            .read()
            .map_err(|_| DomainError::storage("record map lock poisoned"))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<V::Id, V>>, DomainError> {
        self.inner
            .write()
            .map_err(|_| DomainError::storage("record map lock poisoned"))
    }
}

impl<V: Entity + Clone> RecordMap<V> {
    pub fn get(&self, id: &V::Id) -> Result<Option<V>, DomainError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn upsert(&self, value: V) -> Result<V, DomainError> {
        self.write()?.insert(value.id().clone(), value.clone());
        Ok(value)
    }

    pub fn remove(&self, id: &V::Id) -> Result<Option<V>, DomainError> {
        Ok(self.write()?.remove(id))
    }

    pub fn filter<F>(&self, predicate: F) -> Result<Vec<V>, DomainError>
    where
        F: Fn(&V) -> bool,
    {
        Ok(self.read()?.values().filter(|v| predicate(v)).cloned().collect())
    }
}

impl<V: Entity> Default for RecordMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
