//! The query runtime: transport, model registry and error reporting.

use std::fmt;
use std::sync::Arc;

use asupersync::{Cx, Outcome};
use sqlshape_core::{
    CastOverrides, Error, ModelSet, QueryResult, Result, Row, Transport, ValidationError,
    ValidationErrorKind, Value, cast_row,
};
use sqlshape_query::{RawSql, Statement};

use crate::client::ModelClient;

/// A failed statement as reported to the error hook.
///
/// Callers only ever see [`Error::QueryFailed`]; the statement and the
/// transport's error are available here and in the `tracing` event.
#[derive(Debug)]
pub struct QueryFailure<'a> {
    /// Model the statement was built for; `None` for bare passthrough.
    pub model: Option<&'a str>,
    pub sql: &'a str,
    pub params: &'a [Value],
    /// The error returned by the transport.
    pub error: &'a Error,
}

/// Callback invoked on every transport failure.
pub type ErrorHook = Arc<dyn Fn(&QueryFailure<'_>) + Send + Sync>;

/// Executes model operations against a [`Transport`].
///
/// Holds only immutable state and may be shared freely. For transactional
/// work, build a runtime over a transaction-scoped transport.
pub struct QueryRuntime<T> {
    transport: T,
    models: Arc<ModelSet>,
    error_hook: Option<ErrorHook>,
}

impl<T: fmt::Debug> fmt::Debug for QueryRuntime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRuntime")
            .field("transport", &self.transport)
            .field("models", &self.models.len())
            .field("error_hook", &self.error_hook.is_some())
            .finish()
    }
}

impl<T: Transport> QueryRuntime<T> {
    pub fn new(transport: T, models: impl Into<Arc<ModelSet>>) -> Self {
        Self {
            transport,
            models: models.into(),
            error_hook: None,
        }
    }

    /// Install a callback for transport failures.
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&QueryFailure<'_>) + Send + Sync + 'static,
    {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Client for the model registered as `name` (model, accessor or table
    /// name).
    pub fn model(&self, name: &str) -> Result<ModelClient<'_, T>> {
        match self.models.get(name) {
            Some(model) => Ok(ModelClient::new(self, model)),
            None => Err(ValidationError::new(
                ValidationErrorKind::UnknownModel,
                format!("Unknown model '{}'", name),
            )
            .with_name(name)
            .into()),
        }
    }

    /// Run a raw statement. Rows are cast with `overrides` only; unlisted
    /// columns stay text.
    #[tracing::instrument(level = "debug", skip(self, cx, raw, overrides))]
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
        let result = match self.run(cx, None, &statement).await {
            Outcome::Ok(result) => result,
            Outcome::Err(e) => return Outcome::Err(e),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        };
        match result
            .rows
            .iter()
            .map(|raw| cast_row(raw, &[], overrides))
            .collect::<Result<Vec<_>>>()
        {
            Ok(rows) => Outcome::Ok(rows),
            Err(e) => Outcome::Err(e),
        }
    }

    /// Send one statement to the transport.
    ///
    /// Every statement goes through here. Transport errors are logged and
    /// reported to the hook, then replaced by [`Error::QueryFailed`].
    /// Cancellation and panics pass through unchanged.
    pub(crate) async fn run(
        &self,
        cx: &Cx,
        model: Option<&str>,
        statement: &Statement,
    ) -> Outcome<QueryResult, Error> {
        tracing::trace!(sql = %statement.sql, params = statement.params.len(), "Executing statement");
        match self
            .transport
            .execute(cx, &statement.sql, &statement.params)
            .await
        {
            Outcome::Ok(result) => Outcome::Ok(result),
            Outcome::Err(error) => {
                tracing::error!(
                    model = model.unwrap_or("-"),
                    sql = %statement.sql,
                    params = statement.params.len(),
                    error = %error,
                    "Query failed"
                );
                if let Some(hook) = &self.error_hook {
                    hook(&QueryFailure {
                        model,
                        sql: &statement.sql,
                        params: &statement.params,
                        error: &error,
                    });
                }
                Outcome::Err(Error::QueryFailed)
            }
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }
}
