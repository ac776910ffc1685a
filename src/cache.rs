//! The role cache orchestrator.
//!
//! [`RoleCache`] composes the [`RoleDirectory`] and the [`MatcherIndex`] and
//! keeps them updated together per role. It is the single entry point for
//! both the authorization-query path (request-handling threads) and the
//! administration path (role inserts, privilege refreshes).
//!
//! # Consistency
//!
//! Mutations write the directory first and rebuild the matcher index second.
//! Between those two writes a reader may observe the new record with the old
//! matcher list; it can never observe new matchers with an old record. The
//! window is bounded by one compile-and-insert and is accepted rather than
//! eliminated. Per-role granularity is the unit of consistency: mutations of
//! distinct roles never contend.

use crate::{
    directory::RoleDirectory,
    error::{Error, Result},
    matcher::MatcherIndex,
    pattern::{HttpMethod, PathPattern},
    role::{Privilege, RoleRecord, RoleSummary},
    store::{MemoryRoleStore, RoleStore},
};
#[cfg(feature = "audit")]
use log::info;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Concurrent role cache answering "may role R invoke path P with method M".
///
/// Construct it with the external [`RoleStore`], call
/// [`initialize`](Self::initialize) once from the composition root, then share
/// it (behind an `Arc`) with request handlers and admin endpoints. All
/// operations take `&self`.
pub struct RoleCache<S = MemoryRoleStore>
where
    S: RoleStore,
{
    store: S,
    directory: RoleDirectory,
    matchers: MatcherIndex,
    ready: AtomicBool,
}

impl<S> RoleCache<S>
where
    S: RoleStore,
{
    /// Create an uninitialized cache over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            directory: RoleDirectory::new(),
            matchers: MatcherIndex::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Bulk-load every role from the store and compile its matchers.
    ///
    /// On store failure the error propagates, no partial state is published,
    /// and the cache stays uninitialized; the caller retries. Calling this on
    /// an already-initialized cache performs a full re-sync against the store,
    /// including dropping roles the store no longer returns.
    pub fn initialize(&self) -> Result<()> {
        let records = self.store.find_all()?;

        let names: HashSet<String> = records
            .iter()
            .map(|record| record.name().to_string())
            .collect();

        self.directory.load_all(records.clone());
        for record in &records {
            self.matchers.rebuild(record.name(), record.privileges());
        }
        self.matchers.retain_roles(&names);

        self.ready.store(true, Ordering::Release);

        #[cfg(feature = "audit")]
        info!("Role cache initialized with {} roles", names.len());

        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Insert or replace a role, then rebuild its matcher list.
    pub fn insert_role(&self, record: RoleRecord) -> Result<()> {
        self.ensure_ready()?;

        let name = record.name().to_string();
        let privileges = record.privileges().to_vec();
        self.directory.put(record);
        self.matchers.rebuild(&name, &privileges);

        #[cfg(feature = "audit")]
        info!("Role '{name}' inserted");

        Ok(())
    }

    /// Replace a role's privilege list, then rebuild its matcher list.
    ///
    /// Fails with [`Error::RoleNotFound`] for an unknown role; the matcher
    /// index is left untouched in that case.
    pub fn refresh_privileges(&self, name: &str, privileges: Vec<Privilege>) -> Result<()> {
        self.ensure_ready()?;

        self.directory.replace_privileges(name, privileges.clone())?;
        self.matchers.rebuild(name, &privileges);

        #[cfg(feature = "audit")]
        info!("Privileges refreshed for role '{name}'");

        Ok(())
    }

    /// Whether a role with this name is cached.
    pub fn contains_role(&self, name: &str) -> Result<bool> {
        self.ensure_ready()?;
        Ok(self.directory.contains(name))
    }

    /// The store-assigned id of the role, or `None` if unknown.
    pub fn role_id(&self, name: &str) -> Result<Option<i64>> {
        self.ensure_ready()?;
        Ok(self.directory.get(name).map(|record| record.id()))
    }

    /// The role's current privilege list; empty if the role is unknown.
    pub fn role_privileges(&self, name: &str) -> Result<Vec<Privilege>> {
        self.ensure_ready()?;
        Ok(self
            .directory
            .get(name)
            .map(|record| record.privileges().to_vec())
            .unwrap_or_default())
    }

    /// Id+name projections of every cached role, for administration UIs.
    pub fn role_summaries(&self) -> Result<Vec<RoleSummary>> {
        self.ensure_ready()?;
        Ok(self.directory.summaries())
    }

    /// The currently known role names.
    pub fn role_names(&self) -> Result<Vec<String>> {
        self.ensure_ready()?;
        Ok(self.directory.names())
    }

    /// The compiled matcher list for the role; empty if unknown.
    pub fn matchers_for(&self, name: &str) -> Result<Arc<[PathPattern]>> {
        self.ensure_ready()?;
        Ok(self.matchers.get(name))
    }

    /// Every role's matcher list, for bulk consumers.
    pub fn matcher_snapshot(&self) -> Result<HashMap<String, Arc<[PathPattern]>>> {
        self.ensure_ready()?;
        Ok(self.matchers.snapshot())
    }

    /// Whether any of the role's matchers accepts the request.
    ///
    /// Unknown roles are simply not authorized for anything.
    pub fn is_authorized(&self, name: &str, path: &str, method: HttpMethod) -> Result<bool> {
        self.ensure_ready()?;
        Ok(self
            .matchers
            .get(name)
            .iter()
            .any(|matcher| matcher.matches(path, method)))
    }
}
