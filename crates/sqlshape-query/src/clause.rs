//! Query clauses: WHERE, ORDER BY, paging and projections.
//!
//! Clauses name fields by their identifier-cased field names. They are
//! checked against a [`ModelDescriptor`] and rendered with backtick-quoted
//! column names and `?` placeholders.

use sqlshape_core::{
    Error, ModelDescriptor, Result, Row, ValidationError, ValidationErrorKind, Value,
    quote_ident_mysql,
};

use crate::encode::encode_value;

/// A raw SQL fragment with its own positional parameters.
///
/// Used verbatim as a WHERE predicate or, on its own, as a passthrough
/// statement. Its parameters are bound unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl RawSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// Row filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    /// AND of `field = value` equalities; a `Null` value matches `IS NULL`.
    Equals(Row),
    /// A hand-written predicate.
    Raw(RawSql),
    /// Conjunction; each non-empty part is parenthesized.
    All(Vec<Where>),
}

impl Where {
    /// Start an equality filter on one field.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Where::Equals(Row::new().with(field, value))
    }

    /// Add another equality.
    ///
    /// A raw predicate is kept and ANDed with the new equality.
    pub fn and(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        match self {
            Where::Equals(row) => Where::Equals(row.with(field, value)),
            Where::All(mut parts) => {
                parts.push(Where::eq(field, value));
                Where::All(parts)
            }
            raw @ Where::Raw(_) => Where::All(vec![raw, Where::eq(field, value)]),
        }
    }

    /// AND of several filters.
    pub fn all(parts: impl IntoIterator<Item = Where>) -> Self {
        Where::All(parts.into_iter().collect())
    }

    /// A raw predicate.
    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Where::Raw(RawSql {
            sql: sql.into(),
            params,
        })
    }

    /// Render the predicate (without the `WHERE` keyword).
    ///
    /// Returns `None` when nothing constrains the rows (an empty equality
    /// map, or a conjunction of only such maps).
    pub fn build(&self, model: &ModelDescriptor) -> Result<Option<(String, Vec<Value>)>> {
        match self {
            Where::Raw(raw) => Ok(Some((raw.sql.clone(), raw.params.clone()))),
            Where::Equals(row) if row.is_empty() => Ok(None),
            Where::Equals(row) => {
                let mut parts = Vec::with_capacity(row.len());
                let mut params = Vec::with_capacity(row.len());
                for (name, value) in row.iter() {
                    let field = model
                        .field(name)
                        .ok_or_else(|| Error::unknown_field(&model.model_name, name))?;
                    let column = quote_ident_mysql(&field.column_name);
                    if value.is_null() {
                        parts.push(format!("{} IS NULL", column));
                    } else {
                        parts.push(format!("{} = ?", column));
                        params.push(encode_value(field, value));
                    }
                }
                Ok(Some((parts.join(" AND "), params)))
            }
            Where::All(parts) => {
                let mut sql = Vec::with_capacity(parts.len());
                let mut params = Vec::new();
                for part in parts {
                    if let Some((fragment, bound)) = part.build(model)? {
                        sql.push(format!("({fragment})"));
                        params.extend(bound);
                    }
                }
                if sql.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some((sql.join(" AND "), params)))
                }
            }
        }
    }
}

impl From<Row> for Where {
    fn from(row: Row) -> Self {
        Where::Equals(row)
    }
}

impl From<RawSql> for Where {
    fn from(raw: RawSql) -> Self {
        Where::Raw(raw)
    }
}

/// Build an equality filter on the model's primary key.
///
/// `key` must name every primary-key field and nothing else.
pub fn primary_key_where(model: &ModelDescriptor, key: &Row) -> Result<Where> {
    let pk_error = |message: String| -> Error {
        ValidationError::new(ValidationErrorKind::PrimaryKey, message)
            .with_model(&model.model_name)
            .into()
    };

    if !model.has_primary_key() {
        return Err(pk_error(format!(
            "Model {} has no primary key",
            model.model_name
        )));
    }
    for name in key.names() {
        if model.field(name).is_none() {
            return Err(Error::unknown_field(&model.model_name, name));
        }
        if !model.primary_key_view().contains(name) {
            return Err(pk_error(format!(
                "Field '{}' is not part of the primary key of {}",
                name, model.model_name
            )));
        }
    }
    if let Some(missing) = model
        .primary_key_fields()
        .find(|f| !key.contains(&f.field_name))
    {
        return Err(pk_error(format!(
            "Missing primary key field '{}' for {}",
            missing.field_name, model.model_name
        )));
    }
    Ok(Where::Equals(key.clone()))
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Render `ORDER BY` terms (without the keyword); `None` when empty.
pub fn order_by_sql(model: &ModelDescriptor, terms: &[OrderBy]) -> Result<Option<String>> {
    if terms.is_empty() {
        return Ok(None);
    }
    let rendered = terms
        .iter()
        .map(|term| {
            model
                .field(&term.field)
                .map(|f| {
                    format!(
                        "{} {}",
                        quote_ident_mysql(&f.column_name),
                        term.direction.as_sql()
                    )
                })
                .ok_or_else(|| Error::unknown_field(&model.model_name, &term.field))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(rendered.join(", ")))
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u64,
    pub rows_per_page: u64,
}

impl Paging {
    pub fn new(page: u64, rows_per_page: u64) -> Self {
        Self {
            page,
            rows_per_page,
        }
    }

    /// The first row only.
    pub fn first() -> Self {
        Self::new(1, 1)
    }

    /// `(limit, offset)` for this page.
    pub fn limit_offset(&self) -> Result<(u64, u64)> {
        if self.page < 1 || self.rows_per_page < 1 {
            return Err(Error::validation(
                ValidationErrorKind::InvalidPaging,
                format!(
                    "Paging requires page >= 1 and rows_per_page >= 1, got page {} and rows_per_page {}",
                    self.page, self.rows_per_page
                ),
            ));
        }
        let offset = (self.page - 1)
            .checked_mul(self.rows_per_page)
            .ok_or_else(|| {
                Error::validation(
                    ValidationErrorKind::InvalidPaging,
                    format!("Page {} is out of range", self.page),
                )
            })?;
        Ok((self.rows_per_page, offset))
    }
}

/// Projection of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Select {
    /// `*`; invisible columns are not returned.
    #[default]
    Wildcard,
    /// Every field listed explicitly, invisible ones included.
    All,
    /// A non-empty subset of fields.
    Fields(Vec<String>),
}

impl Select {
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Select::Fields(names.into_iter().map(Into::into).collect())
    }

    /// Render the column list.
    pub fn build(&self, model: &ModelDescriptor) -> Result<String> {
        match self {
            Select::Wildcard => Ok("*".to_string()),
            Select::All => Ok(model
                .fields()
                .iter()
                .map(|f| quote_ident_mysql(&f.column_name))
                .collect::<Vec<_>>()
                .join(", ")),
            Select::Fields(names) if names.is_empty() => Err(ValidationError::new(
                ValidationErrorKind::EmptySelect,
                format!("Empty select list for {}", model.model_name),
            )
            .with_model(&model.model_name)
            .into()),
            Select::Fields(names) => {
                let columns = names
                    .iter()
                    .map(|name| {
                        model
                            .field(name)
                            .map(|f| quote_ident_mysql(&f.column_name))
                            .ok_or_else(|| Error::unknown_field(&model.model_name, name))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(columns.join(", "))
            }
        }
    }
}
