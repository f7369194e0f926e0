//! Resolved field descriptors.

use serde::Serialize;

use crate::cast::CastKind;

/// Resolved typing and presence metadata for one column.
///
/// Produced by the type resolver from a column's declared type, its comment
/// directives and the generator configuration. Descriptors are read-only
/// after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Identifier-cased name used by callers (e.g. `createdAt`).
    pub field_name: String,
    /// Database column name used in SQL (e.g. `created_at`).
    pub column_name: String,
    /// How driver text for this field is converted.
    pub cast_kind: CastKind,
    /// Target type expression for code emitters (e.g. `number`,
    /// `'draft'|'live'`, `Set<string>`).
    pub semantic_type: String,
    /// Whether this is a primary key column
    pub is_primary_key: bool,
    /// Whether this field auto-increments
    pub is_auto_increment: bool,
    /// Whether this field has a unique constraint
    pub is_unique: bool,
    /// Whether this field is nullable
    pub is_nullable: bool,
    /// Whether the column is excluded from `SELECT *`.
    pub is_invisible: bool,
    /// Whether the column is a VIRTUAL/STORED generated column.
    pub is_generated_always: bool,
    /// Whether the database supplies a value when the column is omitted.
    ///
    /// A nullable column whose default is an explicit NULL counts: omitting
    /// it is meaningful and legal.
    pub has_default: bool,
}

impl FieldDescriptor {
    /// Create a descriptor with all flags cleared.
    pub fn new(
        field_name: impl Into<String>,
        column_name: impl Into<String>,
        cast_kind: CastKind,
        semantic_type: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            column_name: column_name.into(),
            cast_kind,
            semantic_type: semantic_type.into(),
            is_primary_key: false,
            is_auto_increment: false,
            is_unique: false,
            is_nullable: false,
            is_invisible: false,
            is_generated_always: false,
            has_default: false,
        }
    }

    /// Set primary key flag.
    pub fn primary_key(mut self, value: bool) -> Self {
        self.is_primary_key = value;
        self
    }

    /// Set auto-increment flag.
    pub fn auto_increment(mut self, value: bool) -> Self {
        self.is_auto_increment = value;
        self
    }

    /// Set unique flag.
    pub fn unique(mut self, value: bool) -> Self {
        self.is_unique = value;
        self
    }

    /// Set nullable flag.
    pub fn nullable(mut self, value: bool) -> Self {
        self.is_nullable = value;
        self
    }

    pub fn invisible(mut self, value: bool) -> Self {
        self.is_invisible = value;
        self
    }

    pub fn generated_always(mut self, value: bool) -> Self {
        self.is_generated_always = value;
        self
    }

    pub fn has_default(mut self, value: bool) -> Self {
        self.has_default = value;
        self
    }

    /// True if callers may leave this field out of `create` data.
    pub fn is_optional_on_create(&self) -> bool {
        self.is_auto_increment || self.has_default
    }
}
