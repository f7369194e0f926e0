//! Parameterized single-table statements for SQLShape.
//!
//! Builders in this crate take a [`ModelDescriptor`](sqlshape_core::ModelDescriptor)
//! and caller-supplied field names and values, and produce a MySQL
//! [`Statement`]. They never execute anything; `sqlshape-runtime` runs the
//! statements over a transport.

pub mod builder;
pub mod clause;
pub mod encode;

pub use builder::{CountQuery, DeleteQuery, InsertQuery, SelectQuery, Statement, UpdateQuery};
pub use clause::{Direction, OrderBy, Paging, RawSql, Select, Where, order_by_sql, primary_key_where};
pub use encode::encode_value;
