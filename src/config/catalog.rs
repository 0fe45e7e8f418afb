//! The static field-definition catalog.
//!
//! Package configuration is declared as sections containing groups
//! containing fields; the catalog flattens that tree into a path-keyed map
//! of definitions: default value, declared type, permitted scope levels.
//! Catalogs are built once by configuration-catalog code and treated as
//! read-only by the resolver.

use std::collections::HashMap;

use crate::config::value::{FieldType, Value};
use crate::error::{Error, Result};
use crate::scope::{ScopeKind, ScopePath};

/// The scope levels at which a field may be overridden. Global is always
/// permitted; website and store overrides must be opted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeLevels {
    pub website: bool,
    pub store: bool,
}

impl ScopeLevels {
    /// Global scope only.
    pub const GLOBAL: Self = Self {
        website: false,
        store: false,
    };

    /// Global and website scope.
    pub const WEBSITE: Self = Self {
        website: true,
        store: false,
    };

    /// Global, website and store scope.
    pub const STORE: Self = Self {
        website: true,
        store: true,
    };

    /// Whether an override at the given scope kind is permitted.
    pub fn permits(self, kind: ScopeKind) -> bool {
        match kind {
            ScopeKind::Default => true,
            ScopeKind::Website => self.website,
            ScopeKind::Store => self.store,
        }
    }
}

/// A field declaration inside a [`GroupDecl`].
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub id: String,
    pub ty: FieldType,
    pub default: Option<Value>,
    pub scopes: ScopeLevels,
}

/// A group of fields inside a [`SectionDecl`].
#[derive(Debug, Clone)]
pub struct GroupDecl {
    pub id: String,
    pub fields: Vec<FieldDecl>,
}

/// A top-level configuration section.
#[derive(Debug, Clone)]
pub struct SectionDecl {
    pub id: String,
    pub groups: Vec<GroupDecl>,
}

/// Definition of one scope path: declared type, default, permitted scopes.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub ty: FieldType,
    pub default: Option<Value>,
    pub scopes: ScopeLevels,
}

/// Read-only registry mapping scope paths to field definitions.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: HashMap<String, FieldDef>,
}

impl FieldCatalog {
    /// Flatten section declarations into a catalog.
    ///
    /// Fails when a path segment is malformed or a declared default does not
    /// carry the field's declared type; both indicate a bug in the catalog
    /// code, so they are rejected up front rather than at resolution time.
    pub fn new(sections: Vec<SectionDecl>) -> Result<Self> {
        let mut fields = HashMap::new();
        for section in &sections {
            for group in &section.groups {
                for field in &group.fields {
                    let path = ScopePath::new(&section.id, &group.id, &field.id)?;
                    if let Some(default) = &field.default
                        && default.field_type() != field.ty
                    {
                        return Err(Error::TypeMismatch {
                            path: path.to_string(),
                            expected: field.ty,
                            found: format!("default of type {}", default.field_type()),
                        });
                    }
                    fields.insert(
                        path.to_string(),
                        FieldDef {
                            ty: field.ty,
                            default: field.default.clone(),
                            scopes: field.scopes,
                        },
                    );
                }
            }
        }
        Ok(Self { fields })
    }

    /// Look up the definition for a path.
    pub fn field(&self, path: &ScopePath) -> Option<&FieldDef> {
        self.fields.get(&path.to_string())
    }

    pub(crate) fn field_by_key(&self, key: &str) -> Option<&FieldDef> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
