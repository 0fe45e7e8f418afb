//! Scope primitives: scope kinds, configuration paths, and the selector seam.
//!
//! A *scope* is the granularity at which a configuration value may be
//! overridden: global (`default`), per website, or per store view. A *scope
//! path* is the `section/group/field` key identifying one setting.

use std::fmt;

use crate::error::{Error, Result};

/// The kind of a configuration scope, as recorded in the override table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Global scope; applies everywhere unless overridden.
    Default,
    /// A single website and all stores under it.
    Website,
    /// A single store view.
    Store,
}

impl ScopeKind {
    /// The scope discriminator string used by the override table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Website => "websites",
            Self::Store => "stores",
        }
    }

    /// Parse an override-table scope discriminator.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "websites" => Some(Self::Website),
            "stores" => Some(Self::Store),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete scope context for configuration resolution.
///
/// A store scope carries the id of its enclosing website so that resolution
/// can walk the store → website → global fallback chain as a pure map read.
/// Obtain one from a composed view ([`crate::store::StoreView::config_scope`])
/// rather than assembling the pair by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Default,
    Website(i64),
    Store { store_id: i64, website_id: i64 },
}

impl Scope {
    /// The kind of this scope.
    pub fn kind(self) -> ScopeKind {
        match self {
            Self::Default => ScopeKind::Default,
            Self::Website(_) => ScopeKind::Website,
            Self::Store { .. } => ScopeKind::Store,
        }
    }
}

/// A `section/group/field` configuration key.
///
/// Exactly three non-empty slash-separated segments; anything else is
/// rejected at construction so downstream code never sees a malformed path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopePath {
    section: String,
    group: String,
    field: String,
}

impl ScopePath {
    /// Build a path from its three segments.
    pub fn new(section: &str, group: &str, field: &str) -> Result<Self> {
        if section.is_empty() || group.is_empty() || field.is_empty() {
            return Err(Error::InvalidPath(format!("{section}/{group}/{field}")));
        }
        if [section, group, field].iter().any(|s| s.contains('/')) {
            return Err(Error::InvalidPath(format!("{section}/{group}/{field}")));
        }
        Ok(Self {
            section: section.to_string(),
            group: group.to_string(),
            field: field.to_string(),
        })
    }

    /// Parse a `section/group/field` string.
    pub fn parse(path: &str) -> Result<Self> {
        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(s), Some(g), Some(f), None) => Self::new(s, g, f),
            _ => Err(Error::InvalidPath(path.to_string())),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.section, self.group, self.field)
    }
}

/// A caller-supplied entity selector: a numeric scope id and, optionally, a
/// scope code. When both are supplied the non-empty code has precedence.
pub trait Selector {
    fn id(&self) -> Option<i64> {
        None
    }

    fn code(&self) -> Option<&str> {
        None
    }
}

impl Selector for i64 {
    fn id(&self) -> Option<i64> {
        Some(*self)
    }
}

impl Selector for &str {
    fn code(&self) -> Option<&str> {
        Some(self)
    }
}

/// A selector carrying both parts explicitly. Empty codes are treated as
/// absent, matching the precedence rule.
#[derive(Debug, Clone, Default)]
pub struct Select {
    pub id: Option<i64>,
    pub code: Option<String>,
}

impl Select {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            code: None,
        }
    }

    pub fn by_code(code: impl Into<String>) -> Self {
        Self {
            id: None,
            code: Some(code.into()),
        }
    }
}

impl Selector for Select {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}
