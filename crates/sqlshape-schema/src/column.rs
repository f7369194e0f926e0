//! Introspected column metadata.
//!
//! Schema introspection itself is performed elsewhere; this module holds
//! the immutable per-column record and decodes the rows that `SHOW FULL
//! COLUMNS` and `SHOW FULL TABLES` produce.

use sqlshape_core::{RawRow, Result, SchemaError};

/// Index role reported for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    #[default]
    None,
    Primary,
    Unique,
    /// Non-unique index (`MUL`).
    Other,
}

impl KeyKind {
    /// Decode the `Key` column of `SHOW FULL COLUMNS`.
    pub fn from_show_columns(key: &str) -> Self {
        match key.trim().to_ascii_uppercase().as_str() {
            "" => KeyKind::None,
            "PRI" => KeyKind::Primary,
            "UNI" => KeyKind::Unique,
            _ => KeyKind::Other,
        }
    }
}

/// A column's default as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnDefault {
    /// No default clause.
    #[default]
    Absent,
    /// `DEFAULT NULL`.
    Null,
    /// A textual default expression or literal.
    Text(String),
}

/// Raw attributes of one introspected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
    /// Declared type as introspected, e.g. `tinyint(1) unsigned`.
    pub declared_type: String,
    pub nullable: bool,
    pub key_kind: KeyKind,
    /// Raw `Extra` text (`auto_increment`, `VIRTUAL GENERATED`, ...).
    pub extra: String,
    pub default: ColumnDefault,
    pub comment: String,
}

impl ColumnMetadata {
    /// Create a NOT NULL column with no key, extra, default or comment.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            nullable: false,
            key_kind: KeyKind::None,
            extra: String::new(),
            default: ColumnDefault::Absent,
            comment: String::new(),
        }
    }

    /// Mark as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn key(mut self, kind: KeyKind) -> Self {
        self.key_kind = kind;
        self
    }

    /// Mark as primary key.
    pub fn primary_key(self) -> Self {
        self.key(KeyKind::Primary)
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Set a textual default.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = ColumnDefault::Text(default.into());
        self
    }

    /// Set an explicit `DEFAULT NULL`.
    pub fn with_null_default(mut self) -> Self {
        self.default = ColumnDefault::Null;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Decode one row of `SHOW FULL COLUMNS FROM <table>`.
    ///
    /// Uses the `Field`, `Type`, `Null`, `Key`, `Default`, `Extra` and
    /// `Comment` columns. MySQL reports both "no default" and `DEFAULT NULL`
    /// as a NULL `Default`; on a nullable column that is an explicit null
    /// default, otherwise there is none.
    pub fn from_show_columns(table: &str, row: &RawRow) -> Result<Self> {
        let required = |column: &str| -> Result<String> {
            match row.get(column) {
                Some(Some(text)) => Ok(text.to_string()),
                _ => Err(SchemaError::for_table(
                    table,
                    format!("SHOW FULL COLUMNS row is missing '{}'", column),
                )
                .into()),
            }
        };
        let optional = |column: &str| row.get(column).flatten().unwrap_or_default().to_string();

        let name = required("Field")?;
        let declared_type = required("Type")?;
        let nullable = optional("Null").eq_ignore_ascii_case("YES");
        let default = match row.get("Default") {
            Some(Some(text)) => ColumnDefault::Text(text.to_string()),
            _ if nullable => ColumnDefault::Null,
            _ => ColumnDefault::Absent,
        };

        Ok(Self {
            name,
            declared_type,
            nullable,
            key_kind: KeyKind::from_show_columns(&optional("Key")),
            extra: optional("Extra"),
            default,
            comment: optional("Comment"),
        })
    }
}

/// A table and its columns in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
}

impl TableSnapshot {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Decode a table from its `SHOW FULL COLUMNS` rows.
    pub fn from_show_columns(name: impl Into<String>, rows: &[RawRow]) -> Result<Self> {
        let name = name.into();
        let columns = rows
            .iter()
            .map(|row| ColumnMetadata::from_show_columns(&name, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, columns })
    }
}

/// Names of base tables from `SHOW FULL TABLES` rows; views are excluded.
///
/// The first column holds the table name (its label depends on the
/// database name), `Table_type` holds `BASE TABLE` or `VIEW`.
pub fn base_tables(rows: &[RawRow]) -> Vec<String> {
    rows.iter()
        .filter(|row| {
            row.get("Table_type")
                .flatten()
                .is_some_and(|t| t.eq_ignore_ascii_case("BASE TABLE"))
        })
        .filter_map(|row| row.iter().next().and_then(|(_, name)| name.map(str::to_string)))
        .collect()
}
