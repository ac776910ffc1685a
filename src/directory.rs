//! The role directory: name-keyed map of role records.

use crate::{
    error::{Error, Result},
    role::{Privilege, RoleRecord, RoleSummary},
};
use dashmap::DashMap;

/// Concurrent mapping from role name to [`RoleRecord`].
///
/// Entries are inserted or replaced atomically per key; readers of unrelated
/// roles are never blocked by a writer. Role names are unique by construction
/// of the map.
#[derive(Debug, Default)]
pub struct RoleDirectory {
    roles: DashMap<String, RoleRecord>,
}

impl RoleDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            roles: DashMap::new(),
        }
    }

    /// Replace the entire directory content with the given records.
    ///
    /// Used for the bulk load at startup and for full re-syncs. A reader
    /// racing a re-sync may briefly miss entries that are being re-inserted;
    /// the initial load happens before any reader is attached.
    pub fn load_all(&self, records: Vec<RoleRecord>) {
        self.roles.clear();
        for record in records {
            self.roles.insert(record.name().to_string(), record);
        }
    }

    /// Insert or replace the entry for `record.name()`. Idempotent.
    pub fn put(&self, record: RoleRecord) {
        self.roles.insert(record.name().to_string(), record);
    }

    /// Snapshot of the record for `name`, or `None` if unknown.
    pub fn get(&self, name: &str) -> Option<RoleRecord> {
        self.roles.get(name).map(|entry| entry.value().clone())
    }

    /// Whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Atomically replace the privilege list for `name`, leaving id and name
    /// untouched.
    pub fn replace_privileges(&self, name: &str, privileges: Vec<Privilege>) -> Result<()> {
        match self.roles.get_mut(name) {
            Some(mut record) => {
                record.set_privileges(privileges);
                Ok(())
            }
            None => Err(Error::RoleNotFound(name.to_string())),
        }
    }

    /// Snapshot of the currently known role names.
    pub fn names(&self) -> Vec<String> {
        self.roles.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Snapshot of id+name projections for every role.
    pub fn summaries(&self) -> Vec<RoleSummary> {
        self.roles.iter().map(|entry| entry.value().summary()).collect()
    }

    /// The number of roles in the directory.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
