//! Per-model CRUD operations.

use asupersync::{Cx, Outcome};
use sqlshape_core::{
    CastError, CastKind, CastOverrides, Error, ModelDescriptor, NotFoundError, QueryResult,
    RangeError, Result, Row, Transport, Value, cast_row, cast_text,
};
use sqlshape_query::{
    CountQuery, DeleteQuery, InsertQuery, Paging, RawSql, SelectQuery, Statement, UpdateQuery,
    Where, primary_key_where,
};

use crate::args::{
    CountArgs, CreateArgs, DeleteArgs, DeleteWhereArgs, FindArgs, UpdateArgs, UpdateWhereArgs,
};
use crate::runtime::QueryRuntime;

/// Largest count `count` returns: 2^53 - 1, exact in an IEEE double.
pub const MAX_SAFE_COUNT: i64 = 9_007_199_254_740_991;

/// Operations on one model, obtained from [`QueryRuntime::model`].
#[derive(Debug)]
pub struct ModelClient<'r, T> {
    runtime: &'r QueryRuntime<T>,
    model: &'r ModelDescriptor,
}

impl<T> Clone for ModelClient<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ModelClient<'_, T> {}

impl<'r, T: Transport> ModelClient<'r, T> {
    pub(crate) fn new(runtime: &'r QueryRuntime<T>, model: &'r ModelDescriptor) -> Self {
        Self { runtime, model }
    }

    pub fn descriptor(&self) -> &'r ModelDescriptor {
        self.model
    }

    async fn run(&self, cx: &Cx, statement: Result<Statement>) -> Outcome<QueryResult, Error> {
        let statement = match statement {
            Ok(statement) => statement,
            Err(e) => return Outcome::Err(e),
        };
        self.runtime
            .run(cx, Some(self.model.model_name.as_str()), &statement)
            .await
    }

    fn cast_rows(&self, result: &QueryResult, overrides: &CastOverrides) -> Result<Vec<Row>> {
        result
            .rows
            .iter()
            .map(|raw| cast_row(raw, self.model.fields(), overrides))
            .collect()
    }

    fn not_found(&self) -> Error {
        Error::NotFound(NotFoundError {
            model: self.model.model_name.clone(),
            table: self.model.table_name.clone(),
        })
    }

    /// Rows matching `args`, cast by the model's descriptors.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn find_many(&self, cx: &Cx, args: FindArgs) -> Outcome<Vec<Row>, Error> {
        let mut query = SelectQuery::new(self.model)
            .select(args.select)
            .order_by(args.order_by);
        if let Some(filter) = args.filter {
            query = query.filter(filter);
        }
        if let Some(paging) = args.paging {
            query = query.paging(paging);
        }

        let result = match self.run(cx, query.build()).await {
            Outcome::Ok(result) => result,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        match self.cast_rows(&result, &args.cast_overrides) {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "Fetched rows");
                Outcome::Ok(rows)
            }
            Err(e) => Outcome::Err(e),
        }
    }

    /// The first matching row, if any.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn find_first(&self, cx: &Cx, args: FindArgs) -> Outcome<Option<Row>, Error> {
        let args = FindArgs {
            paging: Some(Paging::first()),
            ..args
        };
        match self.find_many(cx, args).await {
            Outcome::Ok(rows) => Outcome::Ok(rows.into_iter().next()),
            Outcome::Err(e) => Outcome::Err(e),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    /// The first matching row, or a not-found error.
    pub async fn find_first_or_throw(&self, cx: &Cx, args: FindArgs) -> Outcome<Row, Error> {
        match self.find_first(cx, args).await {
            Outcome::Ok(Some(row)) => Outcome::Ok(row),
            Outcome::Ok(None) => Outcome::Err(self.not_found()),
            Outcome::Err(e) => Outcome::Err(e),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    /// Same query as [`find_first`](Self::find_first); callers filter on a
    /// unique key.
    pub async fn find_unique(&self, cx: &Cx, args: FindArgs) -> Outcome<Option<Row>, Error> {
        self.find_first(cx, args).await
    }

    pub async fn find_unique_or_throw(&self, cx: &Cx, args: FindArgs) -> Outcome<Row, Error> {
        self.find_first_or_throw(cx, args).await
    }

    /// Number of matching rows, exact for any size.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn count_big(&self, cx: &Cx, args: CountArgs) -> Outcome<i128, Error> {
        let mut query = CountQuery::new(self.model);
        if let Some(filter) = args.filter {
            query = query.filter(filter);
        }
        let result = match self.run(cx, query.build()).await {
            Outcome::Ok(result) => result,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };

        let text = result.rows.first().and_then(|row| row.get("count")).flatten();
        let Some(text) = text else {
            return Outcome::Err(Error::Cast(CastError {
                field: "count".to_string(),
                kind: CastKind::BigInt.as_str(),
                text: String::new(),
                message: "COUNT(*) returned no value".to_string(),
            }));
        };
        match cast_text(CastKind::BigInt, "count", Some(text)) {
            Ok(Value::BigInt(n)) => Outcome::Ok(n),
            Ok(other) => Outcome::Err(Error::Cast(CastError {
                field: "count".to_string(),
                kind: CastKind::BigInt.as_str(),
                text: text.to_string(),
                message: format!("unexpected {}", other.type_name()),
            })),
            Err(e) => Outcome::Err(e),
        }
    }

    /// Number of matching rows; a range error above [`MAX_SAFE_COUNT`].
    pub async fn count(&self, cx: &Cx, args: CountArgs) -> Outcome<i64, Error> {
        match self.count_big(cx, args).await {
            Outcome::Ok(n) if n <= i128::from(MAX_SAFE_COUNT) => match i64::try_from(n) {
                Ok(n) => Outcome::Ok(n),
                Err(_) => Outcome::Err(range_error(n)),
            },
            Outcome::Ok(n) => Outcome::Err(range_error(n)),
            Outcome::Err(e) => Outcome::Err(e),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    /// Insert one row and return its primary-key view.
    ///
    /// For a single auto-increment key the generated id is returned, cast
    /// by the key's kind. Otherwise key values are copied from `data`; keys
    /// absent from `data` are absent from the result.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn create(&self, cx: &Cx, args: CreateArgs) -> Outcome<Row, Error> {
        let statement = InsertQuery::new(self.model, &args.data).build();
        let result = match self.run(cx, statement).await {
            Outcome::Ok(result) => result,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };

        let mut key = Row::new();
        let insert_id = result.insert_id.filter(|id| *id != 0);
        if let (Some(field), Some(id)) = (self.model.auto_increment_key(), insert_id) {
            match cast_text(field.cast_kind, &field.field_name, Some(&id.to_string())) {
                Ok(value) => key.insert(field.field_name.as_str(), value),
                Err(e) => return Outcome::Err(e),
            }
        } else {
            for field in self.model.primary_key_fields() {
                if let Some(value) = args.data.get(&field.field_name) {
                    key.insert(field.field_name.as_str(), value.clone());
                }
            }
        }
        tracing::info!(
            table = %self.model.table_name,
            insert_id = ?result.insert_id,
            "Created row"
        );
        Outcome::Ok(key)
    }

    /// Update every row matching `args.filter`; returns affected rows.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn update_where(&self, cx: &Cx, args: UpdateWhereArgs) -> Outcome<u64, Error> {
        let statement = UpdateQuery::new(self.model, &args.data, &args.filter).build();
        self.affected(cx, statement).await
    }

    /// Update the row identified by `args.key`.
    pub async fn update(&self, cx: &Cx, args: UpdateArgs) -> Outcome<u64, Error> {
        let filter = match primary_key_where(self.model, &args.key) {
            Ok(filter) => filter,
            Err(e) => return Outcome::Err(e),
        };
        self.update_where(cx, UpdateWhereArgs::new(args.data, filter))
            .await
    }

    /// Delete every row matching `args.filter`; returns affected rows.
    #[tracing::instrument(level = "debug", skip(self, cx, args), fields(model = %self.model.model_name))]
    pub async fn delete_where(&self, cx: &Cx, args: DeleteWhereArgs) -> Outcome<u64, Error> {
        let statement = DeleteQuery::new(self.model, &args.filter).build();
        self.affected(cx, statement).await
    }

    /// Delete the row identified by `args.key`.
    pub async fn delete(&self, cx: &Cx, args: DeleteArgs) -> Outcome<u64, Error> {
        let filter: Where = match primary_key_where(self.model, &args.key) {
            Ok(filter) => filter,
            Err(e) => return Outcome::Err(e),
        };
        self.delete_where(cx, DeleteWhereArgs::new(filter)).await
    }

    /// Run a raw statement, casting result columns that match the model's
    /// fields. `overrides` win over the descriptors for this call.
    #[tracing::instrument(level = "debug", skip(self, cx, raw, overrides), fields(model = %self.model.model_name))]
    pub async fn execute(
        &self,
        cx: &Cx,
        raw: &RawSql,
        overrides: &CastOverrides,
    ) -> Outcome<Vec<Row>, Error> {
        let statement = Statement {
            sql: raw.sql.clone(),
            params: raw.params.clone(),
        };
        let result = match self.run(cx, Ok(statement)).await {
            Outcome::Ok(result) => result,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        match self.cast_rows(&result, overrides) {
            Ok(rows) => Outcome::Ok(rows),
            Err(e) => Outcome::Err(e),
        }
    }

    async fn affected(&self, cx: &Cx, statement: Result<Statement>) -> Outcome<u64, Error> {
        match self.run(cx, statement).await {
            Outcome::Ok(result) => {
                tracing::debug!(affected_rows = result.affected_rows, "Statement applied");
                Outcome::Ok(result.affected_rows)
            }
            Outcome::Err(e) => Outcome::Err(e),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }
}

fn range_error(n: i128) -> Error {
    Error::Range(RangeError {
        value: n.to_string(),
        limit: MAX_SAFE_COUNT,
    })
}
