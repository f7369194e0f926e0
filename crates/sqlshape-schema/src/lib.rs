//! Schema resolution for SQLShape.
//!
//! `sqlshape-schema` turns introspected MySQL column metadata into the
//! descriptors defined in `sqlshape-core`:
//!
//! - [`column`]: `ColumnMetadata` and decoding of `SHOW FULL COLUMNS` /
//!   `SHOW FULL TABLES` rows.
//! - [`annotation`]: `@bigint`, `@json(..)`, `@set(..)`, `@enum(..)` comment
//!   directives.
//! - [`resolve`]: declared type + directives + [`TypeConfig`] → field
//!   descriptor.
//! - [`model`]: per-table aggregation into model descriptors and presence
//!   views.
//!
//! Everything here is synchronous and pure; introspection queries are run by
//! the caller.

pub mod annotation;
pub mod column;
pub mod config;
pub mod model;
pub mod naming;
pub mod resolve;

pub use annotation::{Annotation, AnnotationKind, Annotations};
pub use column::{ColumnDefault, ColumnMetadata, KeyKind, TableSnapshot, base_tables};
pub use config::TypeConfig;
pub use model::{ModelDescriptorBuilder, build, build_all};
pub use resolve::{DeclaredType, TypeResolver, parse_literals, resolve};
