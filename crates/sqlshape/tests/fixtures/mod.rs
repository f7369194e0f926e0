//! Shared test fixtures: a recording transport and a small schema.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use sqlshape::prelude::*;

/// One statement as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Transport that records statements and replays queued outcomes.
///
/// With an empty queue every statement succeeds with an empty result.
#[derive(Debug, Default)]
pub struct MockTransport {
    recorded: Mutex<Vec<Recorded>>,
    queued: Mutex<VecDeque<Result<QueryResult, String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, result: QueryResult) {
        self.queued.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_rows(&self, rows: Vec<RawRow>) {
        self.push_ok(QueryResult::with_rows(Vec::new(), rows));
    }

    pub fn push_err(&self, message: &str) {
        self.queued
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.recorded
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement executed")
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        _cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<QueryResult, Error>> + Send {
        self.recorded.lock().unwrap().push(Recorded {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        let next = self.queued.lock().unwrap().pop_front();
        async move {
            match next {
                None => Outcome::Ok(QueryResult::default()),
                Some(Ok(result)) => Outcome::Ok(result),
                Some(Err(message)) => Outcome::Err(
                    sqlshape::TransportError::new(message)
                        .with_code(1064)
                        .into(),
                ),
            }
        }
    }
}

pub fn unwrap_outcome<T>(outcome: Outcome<T, Error>) -> std::result::Result<T, String> {
    match outcome {
        Outcome::Ok(v) => Ok(v),
        Outcome::Err(e) => Err(format!("unexpected error: {e}")),
        Outcome::Cancelled(r) => Err(format!("cancelled: {r:?}")),
        Outcome::Panicked(p) => Err(format!("panicked: {p:?}")),
    }
}

pub fn expect_err<T: std::fmt::Debug>(outcome: Outcome<T, Error>) -> Error {
    match outcome {
        Outcome::Err(e) => e,
        other => panic!("expected an error, got {other:?}"),
    }
}

/// A raw row built from `(column, text)` pairs.
pub fn raw(columns: &[(&str, Option<&str>)]) -> RawRow {
    columns
        .iter()
        .map(|(c, t)| (*c, t.map(str::to_string)))
        .collect()
}

/// `SHOW FULL COLUMNS` output for the fixture schema.
fn show_columns(rows: &[(&str, &str, &str, &str, Option<&str>, &str, &str)]) -> Vec<RawRow> {
    rows.iter()
        .map(|(field, ty, null, key, default, extra, comment)| {
            RawRow::new()
                .with("Field", Some(*field))
                .with("Type", Some(*ty))
                .with("Collation", None)
                .with("Null", Some(*null))
                .with("Key", Some(*key))
                .with("Default", *default)
                .with("Extra", Some(*extra))
                .with("Privileges", Some("select,insert,update,references"))
                .with("Comment", Some(*comment))
        })
        .collect()
}

/// `users`, `memberships` (composite key) and `audit_logs` (no key).
pub fn schema() -> ModelSet {
    let users = TableSnapshot::from_show_columns(
        "users",
        &show_columns(&[
            ("id", "int unsigned", "NO", "PRI", None, "auto_increment", ""),
            ("email", "varchar(255)", "NO", "UNI", None, "", ""),
            ("is_active", "tinyint(1)", "NO", "", Some("1"), "", ""),
            ("karma", "bigint", "NO", "", Some("0"), "", "@bigint"),
            ("prefs", "json", "YES", "", None, "", "@json(UserPrefs)"),
            ("roles", "set('admin','editor','viewer')", "NO", "", Some(""), "", "@set"),
            ("status", "enum('active','banned')", "NO", "", Some("active"), "", ""),
            ("created_at", "datetime", "NO", "", Some("CURRENT_TIMESTAMP"), "DEFAULT_GENERATED", ""),
            ("birthday", "date", "YES", "", None, "", ""),
            ("email_domain", "varchar(255)", "YES", "", None, "VIRTUAL GENERATED", ""),
        ]),
    )
    .unwrap();
    let memberships = TableSnapshot::from_show_columns(
        "memberships",
        &show_columns(&[
            ("org_id", "int", "NO", "PRI", None, "", ""),
            ("user_id", "int", "NO", "PRI", None, "", ""),
            ("role", "varchar(20)", "NO", "", None, "", ""),
        ]),
    )
    .unwrap();
    let audit_logs = TableSnapshot::from_show_columns(
        "audit_logs",
        &show_columns(&[("line", "text", "NO", "", None, "", "")]),
    )
    .unwrap();

    build_all(&[users, memberships, audit_logs], &TypeConfig::default()).unwrap()
}
