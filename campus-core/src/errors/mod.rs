//! Domain-specific error types for campus-core
//!
//! - **FilterError**: declarative filter expressions that cannot be turned
//!   into a query predicate
//! - **PaginationError**: cursor/page-size/sort-field problems raised by the
//!   connection paginator
//! - **CsvImportError**: file-level bulk import failures (row-level problems
//!   are data, not errors; see `services::csv::CsvError`)
//!
//! All carry stable machine-readable codes via `error_code()` so the GraphQL
//! layer can attach them as extensions.

pub mod csv;
pub mod pagination;

pub use csv::CsvImportError;
pub use pagination::{FilterError, PaginationError};

/// Result type alias for pagination operations
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type alias for filter predicate construction
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type alias for CSV bulk imports
pub type CsvImportResult<T> = Result<T, CsvImportError>;
