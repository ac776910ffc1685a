//! # Role Cache
//!
//! A concurrent, in-memory role-based access control cache for HTTP services.
//! Given a role name it answers which URI+method patterns that role may
//! invoke, and what identity and privileges the role carries, with map-lookup
//! latency under concurrent reads from many request-handling threads.
//!
//! ## Architecture
//!
//! - [`RoleDirectory`]: role name → [`RoleRecord`] (identity + privileges)
//! - [`MatcherIndex`]: role name → ordered list of compiled [`PathPattern`]s
//! - [`RoleCache`]: composes the two, bulk-loads from a [`RoleStore`] at
//!   startup, and keeps both maps updated together per role
//!
//! Both maps are `DashMap`-backed: per-key replace never blocks readers of
//! unrelated keys, and there is no global lock across roles.
//!
//! ## Quick Start
//!
//! ```rust
//! use role_cache::{HttpMethod, MemoryRoleStore, Privilege, RoleCache, RoleRecord};
//!
//! // The external store, seeded here for the example.
//! let store = MemoryRoleStore::new();
//! store.seed(
//!     RoleRecord::new(1, "ADMIN")
//!         .with_privileges(vec![Privilege::new("/admin/**", Some(HttpMethod::Get))]),
//! );
//!
//! // Bulk-load and compile matchers, once, from the composition root.
//! let cache = RoleCache::new(store);
//! cache.initialize()?;
//!
//! // Authorization queries from request handlers.
//! assert!(cache.is_authorized("ADMIN", "/admin/users", HttpMethod::Get)?);
//! assert!(!cache.is_authorized("ADMIN", "/public", HttpMethod::Get)?);
//!
//! // Administrative mutations, concurrent with reads.
//! cache.refresh_privileges("ADMIN", vec![])?;
//! assert!(!cache.is_authorized("ADMIN", "/admin/users", HttpMethod::Get)?);
//! # Ok::<(), role_cache::Error>(())
//! ```
//!
//! ## Audit Logging
//!
//! With the `audit` feature enabled, lifecycle events (initialization, role
//! inserts, privilege refreshes) are logged through the standard `log` facade:
//!
//! ```rust,ignore
//! use role_cache::init_audit_logger;
//!
//! // Initialize logging early; level comes from RUST_LOG.
//! init_audit_logger();
//! ```
//!
//! Privileges skipped during matcher compilation are warned about regardless
//! of the feature.

#[cfg(feature = "audit")]
pub fn init_audit_logger() {
    env_logger::init();
}

pub mod cache;
pub mod directory;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod role;
pub mod store;

#[cfg(test)]
mod property_tests;

// Re-export main types for convenience
pub use crate::{
    cache::RoleCache,
    directory::RoleDirectory,
    error::{Error, Result},
    matcher::MatcherIndex,
    pattern::{HttpMethod, PathPattern, UnknownMethodError},
    role::{Privilege, RoleRecord, RoleSummary},
    store::{MemoryRoleStore, RoleStore},
};
