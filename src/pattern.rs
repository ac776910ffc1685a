//! Compiled URI pattern matchers.
//!
//! A [`PathPattern`] is the evaluable form of one privilege: a glob-style URI
//! pattern plus an optional HTTP method restriction. Patterns are compiled
//! once, when a role is loaded or its privileges change, and then matched
//! against request paths on the hot authorization path.
//!
//! # Glob syntax
//!
//! - `*` matches any run of characters within a single path segment
//! - `**` matches any run of characters across segments
//! - `?` matches exactly one character other than `/`
//! - everything else matches literally, case-sensitively
//!
//! So `/api/*/items` matches `/api/v1/items` but not `/api/v1/v2/items`,
//! while `/api/**` matches both.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;

/// A method name that is not one of the standard HTTP verbs.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[error("Unknown HTTP method '{0}'")]
pub struct UnknownMethodError(String);

/// An HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    /// Parse a method from its wire name, e.g. `"GET"`.
    ///
    /// Matching is case-insensitive; unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// The canonical wire name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethodError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        let method = match name.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "CONNECT" => Self::Connect,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            "PATCH" => Self::Patch,
            _ => return Err(UnknownMethodError(name.to_string())),
        };
        Ok(method)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled (URI glob, HTTP method) matcher.
///
/// Matching has no side effects and takes `&self`; a compiled pattern is
/// freely shareable across threads.
#[derive(Debug, Clone)]
pub struct PathPattern {
    uri: String,
    method: Option<HttpMethod>,
    regex: Regex,
}

impl PathPattern {
    /// Compile a glob-style URI pattern with an optional method restriction.
    ///
    /// `method` of `None` means the pattern matches any request method.
    /// Fails with [`Error::InvalidPattern`] if the pattern is empty or
    /// contains a run of three or more `*`.
    pub fn compile(uri: &str, method: Option<HttpMethod>) -> Result<Self> {
        if uri.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: uri.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }
        if uri.contains("***") {
            return Err(Error::InvalidPattern {
                pattern: uri.to_string(),
                reason: "wildcard runs longer than `**` are ambiguous".to_string(),
            });
        }

        let regex = Regex::new(&Self::translate(uri)).map_err(|e| Error::InvalidPattern {
            pattern: uri.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            uri: uri.to_string(),
            method,
            regex,
        })
    }

    /// Translate the glob into an anchored regular expression.
    fn translate(uri: &str) -> String {
        let mut regex = String::with_capacity(uri.len() + 8);
        regex.push('^');
        let mut chars = uri.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        regex.push_str(".*");
                    } else {
                        regex.push_str("[^/]*");
                    }
                }
                '?' => regex.push_str("[^/]"),
                c if c.is_ascii_alphanumeric() || c == '/' => regex.push(c),
                c => {
                    regex.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4])));
                }
            }
        }
        regex.push('$');
        regex
    }

    /// Test a request against this pattern.
    ///
    /// Returns true iff the method matches (or this pattern carries no method
    /// restriction) and the full request path matches the glob.
    pub fn matches(&self, path: &str, method: HttpMethod) -> bool {
        if let Some(required) = self.method {
            if required != method {
                return false;
            }
        }
        self.regex.is_match(path)
    }

    /// The source pattern text this matcher was compiled from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The method restriction, if any.
    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }
}
