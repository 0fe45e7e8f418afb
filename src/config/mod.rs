//! Configuration catalog and scope-aware resolution.
//!
//! - [`catalog`]: static field definitions (defaults, declared types,
//!   permitted scope levels)
//! - [`value`]: typed values and text coercion
//! - [`resolver`]: the fallback-chain resolver over the override map

mod catalog;
mod resolver;
mod value;

pub use catalog::{FieldCatalog, FieldDecl, FieldDef, GroupDecl, ScopeLevels, SectionDecl};
pub use resolver::{ConfigResolver, ConfigValueRow};
pub use value::{FieldType, Value};
