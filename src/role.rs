//! Role and privilege definitions.

use crate::pattern::HttpMethod;

/// An authorization grant: a URI glob pattern plus an optional HTTP method.
///
/// Either field may be absent. A privilege without a URI carries identity or
/// flag semantics only and produces no request matcher; a privilege without a
/// method matches requests of any method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Privilege {
    uri: Option<String>,
    http_method: Option<HttpMethod>,
}

impl Privilege {
    /// Create a privilege for a URI pattern with an optional method.
    ///
    /// An empty URI is normalized to absent, matching how role stores commonly
    /// encode "no URI restriction".
    pub fn new(uri: impl Into<String>, http_method: Option<HttpMethod>) -> Self {
        let uri = uri.into();
        Self {
            uri: if uri.is_empty() { None } else { Some(uri) },
            http_method,
        }
    }

    /// Create a privilege with no URI pattern at all.
    pub fn unrestricted(http_method: Option<HttpMethod>) -> Self {
        Self {
            uri: None,
            http_method,
        }
    }

    /// The URI pattern, if this privilege carries one.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The method restriction, if any.
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.http_method
    }
}

/// A role as loaded from the external store: identity plus privilege list.
///
/// `id` and `name` are immutable once created; `privileges` is only ever
/// replaced as a whole unit, never mutated element-by-element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleRecord {
    id: i64,
    name: String,
    privileges: Vec<Privilege>,
}

impl RoleRecord {
    /// Create a role record with no privileges.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            privileges: Vec::new(),
        }
    }

    /// Attach a privilege list, builder-style.
    pub fn with_privileges(mut self, privileges: Vec<Privilege>) -> Self {
        self.privileges = privileges;
        self
    }

    /// The store-assigned numeric identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The unique role name, the key for every lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current privilege list.
    pub fn privileges(&self) -> &[Privilege] {
        &self.privileges
    }

    /// Replace the privilege list as a whole unit.
    pub fn set_privileges(&mut self, privileges: Vec<Privilege>) {
        self.privileges = privileges;
    }

    /// Project this record down to its identity fields.
    pub fn summary(&self) -> RoleSummary {
        RoleSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// The id+name projection of a role, for administration listings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleSummary {
    /// The store-assigned numeric identifier.
    pub id: i64,
    /// The unique role name.
    pub name: String,
}
