//! SQLShape: typed field descriptors and a cast-aware CRUD runtime derived
//! from MySQL schema metadata.
//!
//! The pipeline has two halves:
//!
//! 1. **Resolution** (`sqlshape-schema`, synchronous and pure). Introspected
//!    columns plus comment directives and a [`TypeConfig`] become
//!    [`FieldDescriptor`]s, aggregated per table into [`ModelDescriptor`]s
//!    with base, primary-key, create and update presence views.
//! 2. **Execution** (`sqlshape-runtime`, async). A [`QueryRuntime`] over a
//!    [`Transport`] builds parameterized statements (`sqlshape-query`) for a
//!    model, executes them and casts the textual rows back into [`Value`]s.
//!
//! # Example
//!
//! ```ignore
//! use sqlshape::prelude::*;
//!
//! let tables = vec![TableSnapshot::from_show_columns("users", &show_columns_rows)?];
//! let models = build_all(&tables, &TypeConfig::default())?;
//!
//! let runtime = QueryRuntime::new(transport, models);
//! let users = runtime.model("users")?;
//! let first = users
//!     .find_first_or_throw(&cx, FindArgs::new().filter(Where::eq("email", "a@example.com")))
//!     .await;
//! ```

pub use sqlshape_query as query;
pub use sqlshape_runtime as runtime;
pub use sqlshape_schema as schema;

pub use sqlshape_core::{
    CastKind, CastOverrides, Cx, Error, FieldDescriptor, ModelDescriptor, ModelSet, Outcome,
    Presence, PresenceView, QueryResult, RawRow, Result, Row, Transport, TransportError, Value,
};
pub use sqlshape_query::{Direction, OrderBy, Paging, RawSql, Select, Where};
pub use sqlshape_runtime::{
    CountArgs, CreateArgs, DeleteArgs, DeleteWhereArgs, FindArgs, ModelClient, QueryFailure,
    QueryRuntime, UpdateArgs, UpdateWhereArgs,
};
pub use sqlshape_schema::{
    ColumnMetadata, KeyKind, TableSnapshot, TypeConfig, base_tables, build, build_all, resolve,
};

/// Everything needed to resolve a schema and run model operations.
pub mod prelude {
    pub use sqlshape_core::{
        CastKind, CastOverrides, Cx, Error, FieldDescriptor, ModelDescriptor, ModelSet, Outcome,
        QueryResult, RawRow, Row, Transport, Value,
    };
    pub use sqlshape_query::{Direction, OrderBy, Paging, RawSql, Select, Where};
    pub use sqlshape_runtime::{
        CountArgs, CreateArgs, DeleteArgs, DeleteWhereArgs, FindArgs, ModelClient, QueryRuntime,
        UpdateArgs, UpdateWhereArgs,
    };
    pub use sqlshape_schema::{ColumnMetadata, KeyKind, TableSnapshot, TypeConfig, build_all};
}
