//! Cursor pagination over entity selects.
//!
//! Three pieces: an opaque [`cursor::Cursor`] codec, a declarative
//! [`filtering`] layer that compiles filter expressions into `Condition`
//! trees, and the [`paginate`] seek paginator that walks a select in either
//! direction with a stable primary-key tiebreak.

pub mod cursor;
pub mod filtering;
pub mod paginate;

pub use cursor::Cursor;
pub use filtering::{
    build_condition, AgeRangeValue, ColumnAlias, ColumnMap, FieldFilter, FilterExpression,
    FilterOperator, FilterValue,
};
pub use paginate::{
    paginate, ConnectionPage, Direction, Edge, PageInfo, PaginationArgs, SortInput, SortOrder,
    SortSpec, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
