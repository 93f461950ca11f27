use shopgraph_core::config::TABLE_SIZE;
use shopgraph_core::error::{ErrorCode, ShopgraphError};
use shopgraph_core::hashing::{KeyHasher, ShiftAddHasher};
use shopgraph_core::model::FieldError;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("key already exists: {0}")]
    Duplicate(String),
    #[error("store is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },
    #[error("invalid field: {0}")]
    InvalidField(#[from] FieldError),
}

impl ShopgraphError for StoreError {
    fn error_code(&self) -> ErrorCode {
        match self {
            StoreError::Duplicate(_) => ErrorCode::AlreadyExists,
            StoreError::CapacityExceeded { .. } => ErrorCode::ResourceExhausted,
            StoreError::InvalidField(_) => ErrorCode::InvalidArgument,
        }
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-slot hash table with separate chaining.
///
/// Every key lands in `hash(key) % table_size`. Distinct keys sharing a slot are
/// chained in insertion order, and lookups compare keys inside the chain, so a
/// collision never hides or evicts another record. The total number of records
/// is capped at `max_records`.
pub struct KeyedStore<K, V> {
    slots: Vec<Vec<Entry<K, V>>>,
    len: usize,
    max_records: usize,
    hasher: Arc<dyn KeyHasher>,
}

impl<K: AsRef<str>, V> KeyedStore<K, V> {
    pub fn new(table_size: usize, max_records: usize, hasher: Arc<dyn KeyHasher>) -> Self {
        let table_size = table_size.max(1);
        Self {
            slots: (0..table_size).map(|_| Vec::new()).collect(),
            len: 0,
            max_records,
            hasher,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TABLE_SIZE, TABLE_SIZE, Arc::new(ShiftAddHasher))
    }

    pub fn slot_for(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.slots.len() as u64) as usize
    }

    /// Add a record under a new key. Fails if the key is present or the store is full.
    pub fn insert(&mut self, key: K, value: V) -> Result<usize, StoreError> {
        let slot = self.slot_for(key.as_ref());
        if self.find_in_slot(slot, key.as_ref()).is_some() {
            return Err(StoreError::Duplicate(key.as_ref().to_string()));
        }
        self.push_entry(slot, key, value)?;
        Ok(slot)
    }

    /// Replace the record stored under `key`, or insert it if absent.
    pub fn upsert(&mut self, key: K, value: V) -> Result<(usize, Option<V>), StoreError> {
        let slot = self.slot_for(key.as_ref());
        if let Some(pos) = self.find_in_slot(slot, key.as_ref()) {
            let previous = std::mem::replace(&mut self.slots[slot][pos].value, value);
            return Ok((slot, Some(previous)));
        }
        self.push_entry(slot, key, value)?;
        Ok((slot, None))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let slot = self.slot_for(key);
        self.find_in_slot(slot, key)
            .map(|pos| &self.slots[slot][pos].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in slot order, then chain order within a slot.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots
            .iter()
            .flat_map(|chain| chain.iter().map(|entry| (&entry.key, &entry.value)))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Number of records sharing a slot with an earlier record.
    pub fn collisions(&self) -> usize {
        self.slots
            .iter()
            .map(|chain| chain.len().saturating_sub(1))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_records
    }

    fn find_in_slot(&self, slot: usize, key: &str) -> Option<usize> {
        self.slots[slot]
            .iter()
            .position(|entry| entry.key.as_ref() == key)
    }

    fn push_entry(&mut self, slot: usize, key: K, value: V) -> Result<(), StoreError> {
        if self.len >= self.max_records {
            return Err(StoreError::CapacityExceeded {
                capacity: self.max_records,
            });
        }
        let chain = &mut self.slots[slot];
        if !chain.is_empty() {
            debug!(slot, depth = chain.len(), "chaining colliding key");
        }
        chain.push(Entry { key, value });
        self.len += 1;
        Ok(())
    }
}

impl<K: AsRef<str>, V> Default for KeyedStore<K, V> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sends every key to slot 0.
    struct ConstantHasher;

    impl KeyHasher for ConstantHasher {
        fn hash(&self, _key: &str) -> u64 {
            0
        }
    }

    fn colliding_store(max_records: usize) -> KeyedStore<String, u32> {
        KeyedStore::new(10, max_records, Arc::new(ConstantHasher))
    }

    #[test]
    fn test_insert_get_verifies_key() {
        let mut store = KeyedStore::<String, u32>::with_defaults();
        let slot = store.insert("P1".to_string(), 10).unwrap();

        assert_eq!(slot, store.slot_for("P1"));
        assert_eq!(store.get("P1"), Some(&10));
        // Same slot arithmetic cannot make an absent key resolve.
        assert_eq!(store.get("P2"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_colliding_keys_are_chained() {
        let mut store = colliding_store(10);
        assert_eq!(store.insert("a".to_string(), 1).unwrap(), 0);
        assert_eq!(store.insert("b".to_string(), 2).unwrap(), 0);
        assert_eq!(store.insert("c".to_string(), 3).unwrap(), 0);

        assert_eq!(store.get("a"), Some(&1));
        assert_eq!(store.get("b"), Some(&2));
        assert_eq!(store.get("c"), Some(&3));
        assert_eq!(store.collisions(), 2);
    }

    #[test]
    fn test_shift_add_collision_is_resolved() {
        // "P1" -> 2609 and "Oq" -> 2641, both 17 modulo 32.
        let mut store: KeyedStore<String, &str> =
            KeyedStore::new(32, 10, Arc::new(ShiftAddHasher));
        assert_eq!(store.slot_for("P1"), store.slot_for("Oq"));

        store.insert("P1".to_string(), "shoe").unwrap();
        store.insert("Oq".to_string(), "box").unwrap();
        assert_eq!(store.get("P1"), Some(&"shoe"));
        assert_eq!(store.get("Oq"), Some(&"box"));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = colliding_store(10);
        store.insert("a".to_string(), 1).unwrap();

        let err = store.insert("a".to_string(), 2).unwrap_err();
        assert_eq!(err, StoreError::Duplicate("a".to_string()));
        assert_eq!(err.error_code(), ErrorCode::AlreadyExists);
        assert_eq!(store.get("a"), Some(&1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut store = colliding_store(10);
        store.insert("a".to_string(), 1).unwrap();
        store.insert("b".to_string(), 2).unwrap();

        let (slot, previous) = store.upsert("a".to_string(), 5).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(previous, Some(1));
        assert_eq!(store.get("a"), Some(&5));
        assert_eq!(store.get("b"), Some(&2));
        assert_eq!(store.len(), 2);

        let (_, previous) = store.upsert("c".to_string(), 3).unwrap();
        assert_eq!(previous, None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut store = colliding_store(2);
        store.insert("a".to_string(), 1).unwrap();
        store.insert("b".to_string(), 2).unwrap();

        let err = store.insert("c".to_string(), 3).unwrap_err();
        assert_eq!(err, StoreError::CapacityExceeded { capacity: 2 });
        assert_eq!(err.error_code(), ErrorCode::ResourceExhausted);

        // Replacing an existing key needs no new room.
        assert!(store.upsert("a".to_string(), 9).is_ok());
        assert!(store.upsert("c".to_string(), 3).is_err());
    }

    #[test]
    fn test_iter_follows_slot_order() {
        let mut store: KeyedStore<String, u32> =
            KeyedStore::new(100, 100, Arc::new(ShiftAddHasher));
        // 'b' = 98, 'a' = 97, 'c' = 99: slot order is a, b, c.
        store.insert("b".to_string(), 2).unwrap();
        store.insert("c".to_string(), 3).unwrap();
        store.insert("a".to_string(), 1).unwrap();

        let keys: Vec<&str> = store.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        let values: Vec<u32> = store.values().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_table_size_is_clamped() {
        let store: KeyedStore<String, u32> = KeyedStore::new(0, 1, Arc::new(ShiftAddHasher));
        assert_eq!(store.table_size(), 1);
        assert_eq!(store.slot_for("anything"), 0);
    }
}
