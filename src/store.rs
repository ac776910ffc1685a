//! External role store abstraction.
//!
//! Persistence is entirely the store's responsibility; the cache only ever
//! bulk-loads from it during [`initialize`](crate::cache::RoleCache::initialize).

use crate::{error::Result, role::RoleRecord};
use dashmap::DashMap;
use std::sync::Arc;

/// Source of role records for the cache's bulk load.
///
/// Implementations wrap whatever backing system holds role definitions (a
/// relational database, a config service). Transport or storage failures must
/// surface as [`Error::StoreUnavailable`](crate::Error::StoreUnavailable) so
/// that initialization fails cleanly without entering the ready state.
pub trait RoleStore: Send + Sync {
    /// Fetch every role record, fully populated including privilege lists.
    fn find_all(&self) -> Result<Vec<RoleRecord>>;
}

/// In-memory role store backed by a `DashMap`, keyed by role name.
///
/// Useful for tests and for composition roots that seed roles statically.
#[derive(Debug, Default, Clone)]
pub struct MemoryRoleStore {
    roles: Arc<DashMap<String, RoleRecord>>,
}

impl MemoryRoleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            roles: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace a role record.
    pub fn seed(&self, record: RoleRecord) {
        self.roles.insert(record.name().to_string(), record);
    }

    /// Remove a role record; returns whether one was present.
    pub fn remove(&self, name: &str) -> bool {
        self.roles.remove(name).is_some()
    }

    /// The number of seeded roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

impl RoleStore for MemoryRoleStore {
    fn find_all(&self) -> Result<Vec<RoleRecord>> {
        let mut records: Vec<RoleRecord> =
            self.roles.iter().map(|entry| entry.value().clone()).collect();
        // Stable order keeps bulk loads deterministic.
        records.sort_by_key(RoleRecord::id);
        Ok(records)
    }
}
