//! Statement builders for single-table SELECT, COUNT, INSERT, UPDATE and
//! DELETE.
//!
//! Every builder validates field names against the model descriptor before
//! producing any SQL. Identifiers are backtick-quoted, values are bound as
//! `?` parameters, and `Null` data values are rendered as a literal `NULL`.
//!
//! # Example
//!
//! ```
//! use sqlshape_core::{CastKind, FieldDescriptor, ModelDescriptor};
//! use sqlshape_query::{OrderBy, Paging, SelectQuery, Where};
//!
//! let model = ModelDescriptor::new(
//!     "User",
//!     "user",
//!     "users",
//!     vec![
//!         FieldDescriptor::new("id", "id", CastKind::Int, "number").primary_key(true),
//!         FieldDescriptor::new("email", "email", CastKind::String, "string"),
//!     ],
//! );
//! let stmt = SelectQuery::new(&model)
//!     .filter(Where::eq("email", "a@example.com"))
//!     .order_by(vec![OrderBy::asc("id")])
//!     .paging(Paging::new(2, 10))
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     stmt.sql,
//!     "SELECT * FROM `users` WHERE `email` = ? ORDER BY `id` ASC LIMIT 10 OFFSET 10"
//! );
//! ```

use sqlshape_core::{
    Error, ModelDescriptor, PresenceView, Result, Row, ValidationError, ValidationErrorKind,
    Value, quote_ident_mysql,
};

use crate::clause::{OrderBy, Paging, Select, Where, order_by_sql};
use crate::encode::encode_value;

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn finish(kind: &str, model: &ModelDescriptor, sql: String, params: Vec<Value>) -> Self {
        tracing::debug!(
            statement = kind,
            table = %model.table_name,
            params = params.len(),
            "Built statement"
        );
        tracing::trace!(sql = %sql, "Statement SQL");
        Self { sql, params }
    }
}

fn push_where(
    sql: &mut String,
    params: &mut Vec<Value>,
    model: &ModelDescriptor,
    filter: Option<&Where>,
) -> Result<()> {
    if let Some((predicate, bound)) = filter.map(|w| w.build(model)).transpose()?.flatten() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicate);
        params.extend(bound);
    }
    Ok(())
}

/// Check every key of `data` is a field of `model` allowed by `view`.
fn check_data(model: &ModelDescriptor, view: &PresenceView, data: &Row, op: &str) -> Result<()> {
    for name in data.names() {
        if model.field(name).is_none() {
            return Err(Error::unknown_field(&model.model_name, name));
        }
        if !view.contains(name) {
            return Err(ValidationError::new(
                ValidationErrorKind::FieldNotAllowed,
                format!(
                    "Field '{}' of {} cannot be set by {}",
                    name, model.model_name, op
                ),
            )
            .with_model(&model.model_name)
            .with_name(name)
            .into());
        }
    }
    Ok(())
}

/// `(column, placeholder)` pairs for `data`, in model field order.
fn assignments(model: &ModelDescriptor, data: &Row) -> (Vec<(String, &'static str)>, Vec<Value>) {
    let mut columns = Vec::with_capacity(data.len());
    let mut params = Vec::with_capacity(data.len());
    for field in model.fields() {
        let Some(value) = data.get(&field.field_name) else {
            continue;
        };
        let column = quote_ident_mysql(&field.column_name);
        if value.is_null() {
            columns.push((column, "NULL"));
        } else {
            columns.push((column, "?"));
            params.push(encode_value(field, value));
        }
    }
    (columns, params)
}

/// SELECT builder.
#[derive(Debug, Clone)]
pub struct SelectQuery<'a> {
    model: &'a ModelDescriptor,
    select: Select,
    filter: Option<Where>,
    order_by: Vec<OrderBy>,
    paging: Option<Paging>,
}

impl<'a> SelectQuery<'a> {
    pub fn new(model: &'a ModelDescriptor) -> Self {
        Self {
            model,
            select: Select::Wildcard,
            filter: None,
            order_by: Vec::new(),
            paging: None,
        }
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = select;
        self
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, terms: Vec<OrderBy>) -> Self {
        self.order_by = terms;
        self
    }

    pub fn paging(mut self, paging: Paging) -> Self {
        self.paging = Some(paging);
        self
    }

    pub fn build(&self) -> Result<Statement> {
        let columns = self.select.build(self.model)?;
        let mut sql = format!(
            "SELECT {} FROM {}",
            columns,
            quote_ident_mysql(&self.model.table_name)
        );
        let mut params = Vec::new();
        push_where(&mut sql, &mut params, self.model, self.filter.as_ref())?;
        if let Some(order) = order_by_sql(self.model, &self.order_by)? {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        if let Some(paging) = self.paging {
            let (limit, offset) = paging.limit_offset()?;
            sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }
        Ok(Statement::finish("select", self.model, sql, params))
    }
}

/// `SELECT COUNT(*) AS count` builder.
#[derive(Debug, Clone)]
pub struct CountQuery<'a> {
    model: &'a ModelDescriptor,
    filter: Option<Where>,
}

impl<'a> CountQuery<'a> {
    pub fn new(model: &'a ModelDescriptor) -> Self {
        Self {
            model,
            filter: None,
        }
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(&self) -> Result<Statement> {
        let mut sql = format!(
            "SELECT COUNT(*) AS count FROM {}",
            quote_ident_mysql(&self.model.table_name)
        );
        let mut params = Vec::new();
        push_where(&mut sql, &mut params, self.model, self.filter.as_ref())?;
        Ok(Statement::finish("count", self.model, sql, params))
    }
}

/// INSERT builder over the keys present in `data`.
#[derive(Debug, Clone)]
pub struct InsertQuery<'a> {
    model: &'a ModelDescriptor,
    data: &'a Row,
}

impl<'a> InsertQuery<'a> {
    pub fn new(model: &'a ModelDescriptor, data: &'a Row) -> Self {
        Self { model, data }
    }

    pub fn build(&self) -> Result<Statement> {
        check_data(self.model, self.model.create_view(), self.data, "create")?;
        let (columns, params) = assignments(self.model, self.data);
        let names: Vec<&str> = columns.iter().map(|(c, _)| c.as_str()).collect();
        let values: Vec<&str> = columns.iter().map(|(_, v)| *v).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident_mysql(&self.model.table_name),
            names.join(", "),
            values.join(", ")
        );
        Ok(Statement::finish("insert", self.model, sql, params))
    }
}

/// UPDATE builder.
#[derive(Debug, Clone)]
pub struct UpdateQuery<'a> {
    model: &'a ModelDescriptor,
    data: &'a Row,
    filter: &'a Where,
}

impl<'a> UpdateQuery<'a> {
    pub fn new(model: &'a ModelDescriptor, data: &'a Row, filter: &'a Where) -> Self {
        Self {
            model,
            data,
            filter,
        }
    }

    pub fn build(&self) -> Result<Statement> {
        if self.data.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyData,
                format!("No fields to update on {}", self.model.model_name),
            )
            .with_model(&self.model.model_name)
            .into());
        }
        check_data(self.model, self.model.update_view(), self.data, "update")?;
        let (columns, mut params) = assignments(self.model, self.data);
        let set: Vec<String> = columns
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect();
        let mut sql = format!(
            "UPDATE {} SET {}",
            quote_ident_mysql(&self.model.table_name),
            set.join(", ")
        );
        push_where(&mut sql, &mut params, self.model, Some(self.filter))?;
        Ok(Statement::finish("update", self.model, sql, params))
    }
}

/// DELETE builder.
#[derive(Debug, Clone)]
pub struct DeleteQuery<'a> {
    model: &'a ModelDescriptor,
    filter: &'a Where,
}

impl<'a> DeleteQuery<'a> {
    pub fn new(model: &'a ModelDescriptor, filter: &'a Where) -> Self {
        Self { model, filter }
    }

    pub fn build(&self) -> Result<Statement> {
        let mut sql = format!("DELETE FROM {}", quote_ident_mysql(&self.model.table_name));
        let mut params = Vec::new();
        push_where(&mut sql, &mut params, self.model, Some(self.filter))?;
        Ok(Statement::finish("delete", self.model, sql, params))
    }
}
