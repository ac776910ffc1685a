//! The matcher index: name-keyed map of compiled request matchers.

use crate::{pattern::PathPattern, role::Privilege};
use dashmap::DashMap;
use log::warn;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Concurrent mapping from role name to its ordered, compiled matcher list.
///
/// Lists are immutable once published: a rebuild compiles the complete new
/// list first and then swaps it in with a single insert, so a concurrent
/// reader always sees a list derived from one complete privilege set, never a
/// partially rebuilt one.
#[derive(Debug, Default)]
pub struct MatcherIndex {
    matchers: DashMap<String, Arc<[PathPattern]>>,
}

impl MatcherIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            matchers: DashMap::new(),
        }
    }

    /// Compile a fresh matcher list from `privileges` and atomically replace
    /// the stored list for `name`.
    ///
    /// Privileges without a URI are skipped silently; privileges whose URI
    /// fails to compile are skipped with a warning. The rebuild itself never
    /// fails, and a role whose privileges yield no matchers still gets an
    /// entry with an empty list.
    ///
    /// Matcher order equals privilege order.
    pub fn rebuild(&self, name: &str, privileges: &[Privilege]) {
        let mut compiled = Vec::with_capacity(privileges.len());
        for privilege in privileges {
            let Some(uri) = privilege.uri() else {
                continue;
            };
            match PathPattern::compile(uri, privilege.http_method()) {
                Ok(pattern) => compiled.push(pattern),
                Err(e) => warn!("Skipping privilege of role '{name}': {e}"),
            }
        }
        self.matchers.insert(name.to_string(), Arc::from(compiled));
    }

    /// The current matcher list for `name`; empty if the role is unknown.
    pub fn get(&self, name: &str) -> Arc<[PathPattern]> {
        self.matchers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Read-only view of every role's matcher list, for bulk consumers such
    /// as a security-filter chain precomputing its dispatch tables.
    pub fn snapshot(&self) -> HashMap<String, Arc<[PathPattern]>> {
        self.matchers
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    /// Drop entries for roles not present in `names`. Used after a re-sync.
    pub fn retain_roles(&self, names: &HashSet<String>) {
        self.matchers.retain(|name, _| names.contains(name));
    }

    /// The number of indexed roles.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
