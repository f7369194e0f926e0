//! The transport contract consumed by the runtime.
//!
//! SQLShape does not speak the MySQL wire protocol itself. A driver (or a
//! transaction handle from one) implements [`Transport`] and the runtime
//! drives it with fully parameterized statements.

// Allow `impl Future` return types in trait methods - intentional for async trait compat
#![allow(clippy::manual_async_fn)]

use std::future::Future;

use asupersync::{Cx, Outcome};

use crate::error::Error;
use crate::row::RawRow;
use crate::value::Value;

/// Everything a statement produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column labels of the result set, in order.
    pub fields: Vec<String>,
    /// Result rows in driver text form.
    pub rows: Vec<RawRow>,
    /// Generated AUTO_INCREMENT id of an INSERT, if any.
    pub insert_id: Option<u64>,
    /// Rows changed by an INSERT/UPDATE/DELETE.
    pub affected_rows: u64,
}

impl QueryResult {
    /// A result carrying only rows.
    pub fn with_rows(fields: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            fields,
            rows,
            insert_id: None,
            affected_rows: 0,
        }
    }

    /// A result of a write statement.
    pub fn write(affected_rows: u64, insert_id: Option<u64>) -> Self {
        Self {
            fields: Vec::new(),
            rows: Vec::new(),
            insert_id,
            affected_rows,
        }
    }
}

/// A handle that executes SQL text with positional `?` parameters.
///
/// Implementations own connection lifecycle, pooling, timeouts and
/// transactions. For atomic multi-statement work, hand the runtime a
/// transaction-scoped transport.
pub trait Transport: Send + Sync {
    /// Execute one statement with bound parameters.
    fn execute(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<QueryResult, Error>> + Send;
}

impl<T: Transport> Transport for &T {
    fn execute(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<QueryResult, Error>> + Send {
        (**self).execute(cx, sql, params)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn execute(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<QueryResult, Error>> + Send {
        (**self).execute(cx, sql, params)
    }
}
