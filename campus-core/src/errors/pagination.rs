use thiserror::Error;

use crate::pagination::filtering::FilterOperator;

/// Filter expressions that cannot be compiled into a predicate.
///
/// These are always client errors: the request named an unknown field, used
/// an operator the field's type does not support, or supplied a value that
/// fails coercion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Field is not in the connection's filterable allow list
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    /// Operator not supported for the field's value type
    #[error("Operator {operator} cannot be applied to field {field}")]
    InvalidOperator {
        field: String,
        operator: FilterOperator,
    },

    /// Free-text contains filters are capped; long values fail instead of
    /// being silently truncated
    #[error("Filter value for {field} must not exceed {max} characters")]
    ValueTooLong { field: String, max: usize },

    /// Enum-typed comparison with a value outside the known set
    #[error("Invalid enum value: {value} (accepted: {accepted})")]
    InvalidEnumValue { value: String, accepted: String },

    /// Value cannot be coerced to the type the column expects
    #[error("Invalid filter value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl FilterError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::UnknownField(_) => "UNKNOWN_FILTER_FIELD",
            FilterError::InvalidOperator { .. } => "INVALID_OPERATOR",
            FilterError::ValueTooLong { .. } => "FILTER_VALUE_TOO_LONG",
            FilterError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            FilterError::InvalidValue { .. } => "INVALID_FILTER_VALUE",
        }
    }
}

/// Connection pagination errors.
#[derive(Error, Debug)]
pub enum PaginationError {
    /// Cursor failed to decode; treated as "resume point not found"
    #[error("Invalid pagination cursor")]
    InvalidCursor,

    /// Page size must be a positive integer within the configured maximum;
    /// out-of-range sizes are rejected, never clamped
    #[error("Invalid page size: must be between 1 and {max}")]
    InvalidPageSize { max: u64 },

    /// Sort field is not in the connection's sortable allow list
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// Filter predicate construction failed
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl PaginationError {
    /// Check if this is a client error (bad request, not an internal fault)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PaginationError::Database(_))
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaginationError::InvalidCursor => "INVALID_CURSOR",
            PaginationError::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            PaginationError::InvalidSortField(_) => "INVALID_SORT_FIELD",
            PaginationError::Filter(err) => err.error_code(),
            PaginationError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cursor_is_client_error() {
        let err = PaginationError::InvalidCursor;
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "INVALID_CURSOR");
    }

    #[test]
    fn filter_error_code_passes_through() {
        let err = PaginationError::Filter(FilterError::UnknownField("nope".to_string()));
        assert_eq!(err.error_code(), "UNKNOWN_FILTER_FIELD");
    }

    #[test]
    fn page_size_error_mentions_bound() {
        let err = PaginationError::InvalidPageSize { max: 500 };
        assert_eq!(err.to_string(), "Invalid page size: must be between 1 and 500");
    }
}
