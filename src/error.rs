//! Unified error handling for scopestore.
//!
//! One error hierarchy covers the scope storage, the composer, the
//! configuration resolver and the data-source seam. Not-found conditions are
//! ordinary and handled by callers; integrity faults indicate corrupted
//! source data and are fatal to the operation that hit them.

use thiserror::Error;

use crate::config::FieldType;

/// Errors produced by scope lookups, composition and config resolution.
#[derive(Debug, Error)]
pub enum Error {
    #[error("website not found")]
    WebsiteNotFound,

    #[error("group not found")]
    GroupNotFound,

    #[error("store not found")]
    StoreNotFound,

    #[error("configuration path not found: {0}")]
    PathNotFound(String),

    #[error("invalid configuration path: {0:?}")]
    InvalidPath(String),

    /// A composed entity's required foreign key did not resolve. This means
    /// the source data is corrupt, not that the caller asked for something
    /// missing.
    #[error("integrity fault: {entity} {id} references missing {missing} {missing_id}")]
    IntegrityFault {
        entity: &'static str,
        id: i64,
        missing: &'static str,
        missing_id: i64,
    },

    /// A configuration value exists but cannot be read as the requested type.
    #[error("type mismatch at {path}: expected {expected}, found {found:?}")]
    TypeMismatch {
        path: String,
        expected: FieldType,
        found: String,
    },

    /// One of the parallel sub-loads of a reload failed. The storage has been
    /// cleared; every lookup reports not-found until the next successful
    /// reload.
    #[error("reload failed, storage cleared: {0}")]
    Reload(#[source] Box<Error>),

    /// Failure reported by the backing data source.
    #[error("data source failure: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wrap an arbitrary backend error as a data-source failure.
    pub fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }

    /// Whether this error is one of the per-entity not-found conditions.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WebsiteNotFound | Self::GroupNotFound | Self::StoreNotFound
        )
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WebsiteNotFound => "website_not_found",
            Self::GroupNotFound => "group_not_found",
            Self::StoreNotFound => "store_not_found",
            Self::PathNotFound(_) => "path_not_found",
            Self::InvalidPath(_) => "invalid_path",
            Self::IntegrityFault { .. } => "integrity_fault",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Reload(_) => "reload_failed",
            Self::Source(_) => "source_failure",
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
