//! Hierarchical configuration resolution.
//!
//! Maps a (path, scope) pair to its effective value by walking the fallback
//! chain: exact-scope override → enclosing-website override (store scopes
//! only) → global override → catalog default. The override map is rebuilt
//! wholesale alongside a reload and is otherwise immutable, so reads are a
//! pure map walk under a short lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::catalog::FieldCatalog;
use crate::config::value::{FieldType, Value};
use crate::error::{Error, Result};
use crate::scope::{Scope, ScopeKind, ScopePath};
use crate::source::ScopeDataSource;

/// A raw override row as loaded from the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValueRow {
    pub scope: ScopeKind,
    pub scope_id: i64,
    pub path: String,
    pub value: String,
}

/// One scope instance in the override map: kind plus numeric id.
type ScopeId = (ScopeKind, i64);

/// Scope-aware configuration reader.
///
/// Constructed explicitly and passed by reference; there is no process-wide
/// default instance. Overrides are grouped per scope instance so that
/// walking the fallback chain is a borrowed `&str` lookup per hop, with no
/// key allocation.
#[derive(Debug)]
pub struct ConfigResolver {
    catalog: FieldCatalog,
    overrides: RwLock<HashMap<ScopeId, HashMap<String, String>>>,
}

impl ConfigResolver {
    /// Create a resolver over the given field catalog with no overrides.
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            overrides: RwLock::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Replace the override map wholesale. Later rows win on duplicate
    /// (scope, scope-id, path) triples.
    pub fn apply_values(&self, rows: Vec<ConfigValueRow>) {
        let mut map: HashMap<ScopeId, HashMap<String, String>> = HashMap::new();
        for row in rows {
            map.entry((row.scope, row.scope_id))
                .or_default()
                .insert(row.path, row.value);
        }
        let count: usize = map.values().map(HashMap::len).sum();
        *self.overrides.write() = map;
        info!(overrides = count, "configuration overrides replaced");
    }

    /// Rebuild the override map from the data source.
    pub async fn reload(&self, source: &dyn ScopeDataSource) -> Result<()> {
        let rows = source.load_config_values().await?;
        self.apply_values(rows);
        Ok(())
    }

    /// Resolve a path at its declared type (string for uncataloged paths).
    pub fn get(&self, path: &ScopePath, scope: Scope) -> Result<Value> {
        let ty = self
            .catalog
            .field(path)
            .map_or(FieldType::Str, |def| def.ty);
        self.get_typed(path, scope, ty)
    }

    pub fn get_str(&self, path: &ScopePath, scope: Scope) -> Result<String> {
        match self.get_typed(path, scope, FieldType::Str)? {
            Value::Str(s) => Ok(s),
            other => Err(self.mismatch(path, FieldType::Str, other.to_string())),
        }
    }

    pub fn get_i64(&self, path: &ScopePath, scope: Scope) -> Result<i64> {
        match self.get_typed(path, scope, FieldType::I64)? {
            Value::I64(v) => Ok(v),
            other => Err(self.mismatch(path, FieldType::I64, other.to_string())),
        }
    }

    pub fn get_f64(&self, path: &ScopePath, scope: Scope) -> Result<f64> {
        match self.get_typed(path, scope, FieldType::F64)? {
            Value::F64(v) => Ok(v),
            other => Err(self.mismatch(path, FieldType::F64, other.to_string())),
        }
    }

    pub fn get_bool(&self, path: &ScopePath, scope: Scope) -> Result<bool> {
        match self.get_typed(path, scope, FieldType::Bool)? {
            Value::Bool(v) => Ok(v),
            other => Err(self.mismatch(path, FieldType::Bool, other.to_string())),
        }
    }

    fn mismatch(&self, path: &ScopePath, expected: FieldType, found: String) -> Error {
        Error::TypeMismatch {
            path: path.to_string(),
            expected,
            found,
        }
    }

    /// Walk the fallback chain for a path, coercing to the requested type.
    ///
    /// The requested type must agree with the field's declared type when the
    /// path is cataloged; asking for an int where the catalog declares a
    /// string is a type mismatch, not a silent zero. Override rows recorded
    /// at a scope the field does not permit are skipped.
    fn get_typed(&self, path: &ScopePath, scope: Scope, want: FieldType) -> Result<Value> {
        let key = path.to_string();
        let def = self.catalog.field_by_key(&key);

        if let Some(def) = def
            && def.ty != want
        {
            return Err(Error::TypeMismatch {
                path: key,
                expected: want,
                found: format!("field declared as {}", def.ty),
            });
        }

        let mut chain = Vec::with_capacity(3);
        match scope {
            Scope::Default => {}
            Scope::Website(id) => chain.push((ScopeKind::Website, id)),
            Scope::Store {
                store_id,
                website_id,
            } => {
                chain.push((ScopeKind::Store, store_id));
                chain.push((ScopeKind::Website, website_id));
            }
        }
        chain.push((ScopeKind::Default, 0));

        let overrides = self.overrides.read();
        for (kind, id) in chain {
            let Some(raw) = overrides
                .get(&(kind, id))
                .and_then(|scoped| scoped.get(key.as_str()))
            else {
                continue;
            };
            if let Some(def) = def
                && !def.scopes.permits(kind)
            {
                debug!(path = %key, scope = %kind, "override at unpermitted scope skipped");
                continue;
            }
            return Value::coerce(raw, want).ok_or_else(|| Error::TypeMismatch {
                path: key.clone(),
                expected: want,
                found: raw.clone(),
            });
        }
        drop(overrides);

        if let Some(def) = def
            && let Some(default) = &def.default
        {
            return Ok(default.clone());
        }
        Err(Error::PathNotFound(key))
    }
}
