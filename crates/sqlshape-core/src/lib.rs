//! Core types and traits for SQLShape.
//!
//! `sqlshape-core` is the **contract layer** shared by every other crate.
//!
//! # Role In The Architecture
//!
//! - **Descriptors**: `FieldDescriptor` and `ModelDescriptor` are the output of
//!   schema resolution (`sqlshape-schema`) and the input of statement building
//!   (`sqlshape-query`) and execution (`sqlshape-runtime`).
//! - **Data model**: `Value`, `RawRow` and `Row` carry parameters and results.
//! - **Casting**: `CastKind` and `cast_row` turn driver text into values.
//! - **Transport**: the `Transport` trait is the only seam to a real database.
//! - **Structured concurrency**: re-exports `Cx` and `Outcome` from asupersync so
//!   every async operation is cancel-correct.

// Re-export asupersync primitives for structured concurrency
pub use asupersync::{Cx, Outcome};

pub mod cast;
pub mod connection;
pub mod error;
pub mod field;
pub mod identifiers;
pub mod model;
pub mod row;
pub mod value;

pub use cast::{CastKind, CastOverrides, cast_row, cast_text};
pub use connection::{QueryResult, Transport};
pub use error::{
    CastError, Error, NotFoundError, RangeError, Result, SchemaError, TransportError,
    ValidationError, ValidationErrorKind,
};
pub use field::FieldDescriptor;
pub use identifiers::{quote_ident_list, quote_ident_mysql};
pub use model::{ModelDescriptor, ModelSet, Presence, PresenceEntry, PresenceView};
pub use row::{RawRow, Row};
pub use value::Value;
