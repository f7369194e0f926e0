//! Cast-aware CRUD runtime for SQLShape.
//!
//! A [`QueryRuntime`] owns a [`Transport`](sqlshape_core::Transport) and a
//! registry of model descriptors. [`QueryRuntime::model`] hands out a
//! [`ModelClient`] whose operations build parameterized statements with
//! `sqlshape-query`, run them and cast the textual results back into
//! [`Value`](sqlshape_core::Value)s.
//!
//! All operations are async and return `Outcome<T, Error>`. Validation
//! failures are reported before anything is sent. Transport failures are
//! logged and passed to the optional error hook, and callers receive the
//! opaque [`Error::QueryFailed`](sqlshape_core::Error::QueryFailed).
//!
//! # Example
//!
//! ```ignore
//! let runtime = QueryRuntime::new(transport, models)
//!     .with_error_hook(|failure| eprintln!("{}: {}", failure.sql, failure.error));
//!
//! let users = runtime.model("users")?;
//! let key = users
//!     .create(&cx, CreateArgs::new(Row::new().with("email", "a@example.com")))
//!     .await;
//! let admins = users
//!     .find_many(&cx, FindArgs::new().filter(Where::eq("role", "admin")))
//!     .await;
//! ```

pub mod args;
pub mod client;
pub mod runtime;

pub use args::{
    CountArgs, CreateArgs, DeleteArgs, DeleteWhereArgs, FindArgs, UpdateArgs, UpdateWhereArgs,
};
pub use client::{MAX_SAFE_COUNT, ModelClient};
pub use runtime::{ErrorHook, QueryFailure, QueryRuntime};
