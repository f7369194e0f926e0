//! Error types shared by every SQLShape crate.
//!
//! Errors fall into a small taxonomy so callers can tell expected outcomes
//! (a missing row) apart from caller mistakes (an unknown field) and from
//! infrastructure failures (the transport rejected a statement).

use std::fmt;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type.
#[derive(Debug)]
pub enum Error {
    /// A name or argument did not match the model descriptors.
    ///
    /// Raised before any statement is built; never retried.
    Validation(ValidationError),
    /// An `*_or_throw` operation matched no rows.
    NotFound(NotFoundError),
    /// A numeric result left the representable envelope.
    Range(RangeError),
    /// The transport failed to execute a statement.
    ///
    /// Carries no statement text or driver detail. The full failure is
    /// reported to the runtime's error hook instead.
    QueryFailed,
    /// A driver value could not be converted to its cast kind.
    Cast(CastError),
    /// Introspection rows or configuration could not be decoded.
    Schema(SchemaError),
    /// Error raised by a transport implementation.
    ///
    /// The runtime never surfaces this variant to its callers; it is
    /// replaced by [`Error::QueryFailed`] at the execution choke point.
    Transport(TransportError),
}

/// Kinds of descriptor-validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No model is registered under the requested name.
    UnknownModel,
    /// A select/where/order/data key is not a field of the model.
    UnknownField,
    /// A field exists but may not appear in this position (e.g. a generated
    /// column in `create` data).
    FieldNotAllowed,
    /// An explicit select list was empty.
    EmptySelect,
    /// Update data contained no fields.
    EmptyData,
    /// Paging arguments were below one.
    InvalidPaging,
    /// A primary-key predicate was incomplete, or the model has no primary key.
    PrimaryKey,
}

/// Descriptor-validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Model the failure was raised against, if any.
    pub model: Option<String>,
    /// Offending field or model name, if any.
    pub name: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            model: None,
            name: None,
            message: message.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An `*_or_throw` lookup found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub model: String,
    pub table: String,
}

/// A count exceeded the safe-integer envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError {
    pub value: String,
    pub limit: i64,
}

/// A textual driver value did not parse as its cast kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastError {
    /// Field or column name.
    pub field: String,
    /// Cast kind that was attempted.
    pub kind: &'static str,
    pub text: String,
    pub message: String,
}

/// Malformed introspection row or configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Table being decoded, when known.
    pub table: Option<String>,
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            table: None,
            message: message.into(),
        }
    }

    pub fn for_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            message: message.into(),
        }
    }
}

/// Error produced by a transport implementation.
#[derive(Debug)]
pub struct TransportError {
    pub message: String,
    /// Driver-specific code (e.g. a MySQL errno).
    pub code: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }
}

impl Error {
    /// Shorthand for a validation error without model/name context.
    pub fn validation(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::new(kind, message))
    }

    /// Unknown field on `model`.
    pub fn unknown_field(model: &str, field: &str) -> Self {
        Error::Validation(
            ValidationError::new(
                ValidationErrorKind::UnknownField,
                format!("Unknown field '{}' on model {}", field, model),
            )
            .with_model(model)
            .with_name(field),
        )
    }

    /// True for descriptor-validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for not-found failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "Validation error: {}", e.message),
            Error::NotFound(e) => write!(f, "No {} record found in {}", e.model, e.table),
            Error::Range(e) => write!(
                f,
                "Value {} exceeds the safe integer limit {}",
                e.value, e.limit
            ),
            Error::QueryFailed => write!(f, "Database query failed"),
            Error::Cast(e) => write!(
                f,
                "Cannot cast '{}' to {} for {}: {}",
                e.text, e.kind, e.field, e.message
            ),
            Error::Schema(e) => match &e.table {
                Some(table) => write!(f, "Schema error in {}: {}", table, e.message),
                None => write!(f, "Schema error: {}", e.message),
            },
            Error::Transport(e) => match e.code {
                Some(code) => write!(f, "Transport error {}: {}", code, e.message),
                None => write!(f, "Transport error: {}", e.message),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(e) => e
                .source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<CastError> for Error {
    fn from(err: CastError) -> Self {
        Error::Cast(err)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}
