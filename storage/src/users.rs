use crate::keyed_store::{KeyedStore, StoreError};
use chrono::Utc;
use shopgraph_core::config::StoreConfig;
use shopgraph_core::hashing::KeyHasher;
use shopgraph_core::model::{validate_field, User, UserIndex};
use std::sync::Arc;
use tracing::info;

/// Registered users keyed by username.
///
/// Users get dense indexes in registration order; since users are never
/// removed, the index is also the position of the user's vertex in the
/// interaction graph.
pub struct UserDirectory {
    store: KeyedStore<String, User>,
}

impl UserDirectory {
    pub fn new(table_size: usize, max_records: usize, hasher: Arc<dyn KeyHasher>) -> Self {
        Self {
            store: KeyedStore::new(table_size, max_records, hasher),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.table_size, config.max_records, config.hasher.build())
    }

    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserIndex, StoreError> {
        validate_field("username", username)?;
        validate_field("email", email)?;
        validate_field("password", password)?;

        let index = self.store.len();
        let user = User {
            index,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            registered_at: Utc::now(),
        };
        let slot = self.store.insert(username.to_string(), user)?;

        info!(username, index, slot, "user registered");
        Ok(index)
    }

    /// True only for a known username with an exactly matching password.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.store
            .get(username)
            .is_some_and(|user| user.password_matches(password))
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.store.get(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> + '_ {
        self.store.values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self {
            store: KeyedStore::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopgraph_core::hashing::ShiftAddHasher;
    use shopgraph_core::model::FieldError;

    #[test]
    fn test_register_then_authenticate() {
        let mut users = UserDirectory::default();
        let index = users.register("alice", "a@x.com", "pw1").unwrap();

        assert_eq!(index, 0);
        assert!(users.authenticate("alice", "pw1"));
        assert!(!users.authenticate("alice", "wrong"));
        assert!(!users.authenticate("bob", "pw1"));
    }

    #[test]
    fn test_indexes_are_dense() {
        let mut users = UserDirectory::default();
        assert_eq!(users.register("alice", "a@x.com", "pw1").unwrap(), 0);
        assert_eq!(users.register("bob", "b@x.com", "pw2").unwrap(), 1);
        assert_eq!(users.register("carol", "c@x.com", "pw3").unwrap(), 2);

        assert_eq!(users.get("bob").unwrap().index, 1);
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_duplicate_username_keeps_first_record() {
        let mut users = UserDirectory::default();
        users.register("alice", "a@x.com", "pw1").unwrap();

        let err = users.register("alice", "other@x.com", "pw2").unwrap_err();
        assert_eq!(err, StoreError::Duplicate("alice".to_string()));
        assert!(users.authenticate("alice", "pw1"));
        assert!(!users.authenticate("alice", "pw2"));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_same_slot_users_both_authenticate() {
        // One slot forces every username into the same chain.
        let mut users = UserDirectory::new(1, 10, Arc::new(ShiftAddHasher));
        users.register("alice", "a@x.com", "pw1").unwrap();
        users.register("bob", "b@x.com", "pw2").unwrap();

        assert!(users.authenticate("alice", "pw1"));
        assert!(users.authenticate("bob", "pw2"));
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let mut users = UserDirectory::default();
        let long_name = "u".repeat(51);

        assert!(matches!(
            users.register(&long_name, "a@x.com", "pw"),
            Err(StoreError::InvalidField(FieldError::TooLong { .. }))
        ));
        assert_eq!(
            users.register("alice", "a@x.com", ""),
            Err(StoreError::InvalidField(FieldError::Empty("password")))
        );
        assert!(users.is_empty());
    }

    #[test]
    fn test_full_directory_rejects_new_users() {
        let mut users = UserDirectory::new(100, 1, Arc::new(ShiftAddHasher));
        users.register("alice", "a@x.com", "pw1").unwrap();

        assert_eq!(
            users.register("bob", "b@x.com", "pw2"),
            Err(StoreError::CapacityExceeded { capacity: 1 })
        );
    }
}
