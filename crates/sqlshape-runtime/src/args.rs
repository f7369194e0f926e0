//! Argument records for model operations.

use sqlshape_core::{CastKind, CastOverrides, Row};
use sqlshape_query::{OrderBy, Paging, Select, Where};

/// Arguments of `find_many`, `find_first` and `find_unique`.
///
/// `find_first`/`find_unique` replace `paging` with the first row.
/// `cast_overrides` apply to this call only and win over the model's
/// descriptors for the names they mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindArgs {
    pub filter: Option<Where>,
    pub order_by: Vec<OrderBy>,
    pub paging: Option<Paging>,
    pub select: Select,
    pub cast_overrides: CastOverrides,
}

impl FindArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<Where>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order_by(mut self, term: OrderBy) -> Self {
        self.order_by.push(term);
        self
    }

    pub fn paging(mut self, page: u64, rows_per_page: u64) -> Self {
        self.paging = Some(Paging::new(page, rows_per_page));
        self
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = select;
        self
    }

    /// Cast `name` (field or column) as `kind` for this call.
    pub fn cast(mut self, name: impl Into<String>, kind: CastKind) -> Self {
        self.cast_overrides = self.cast_overrides.with(name, kind);
        self
    }
}

/// Arguments of `count` and `count_big`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountArgs {
    pub filter: Option<Where>,
}

impl CountArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<Where>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Arguments of `create`: field name → value, create-view fields only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateArgs {
    pub data: Row,
}

impl CreateArgs {
    pub fn new(data: Row) -> Self {
        Self { data }
    }
}

/// Arguments of `update_where`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWhereArgs {
    pub data: Row,
    pub filter: Where,
}

impl UpdateWhereArgs {
    pub fn new(data: Row, filter: impl Into<Where>) -> Self {
        Self {
            data,
            filter: filter.into(),
        }
    }
}

/// Arguments of `update`: `key` names exactly the primary-key fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateArgs {
    pub data: Row,
    pub key: Row,
}

impl UpdateArgs {
    pub fn new(data: Row, key: Row) -> Self {
        Self { data, key }
    }
}

/// Arguments of `delete_where`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteWhereArgs {
    pub filter: Where,
}

impl DeleteWhereArgs {
    pub fn new(filter: impl Into<Where>) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

/// Arguments of `delete`: `key` names exactly the primary-key fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteArgs {
    pub key: Row,
}

impl DeleteArgs {
    pub fn new(key: Row) -> Self {
        Self { key }
    }
}
