//! Conversion of domain errors into GraphQL errors with structured `code`
//! extensions, so clients can react to stable identifiers instead of
//! matching on message text.

use async_graphql::{Error as GraphQLError, ErrorExtensions};

use campus::errors::{CsvImportError, FilterError, PaginationError};

pub trait ToGraphQLError {
    fn to_graphql_error(&self) -> GraphQLError;
}

impl ToGraphQLError for PaginationError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
        })
    }
}

impl ToGraphQLError for FilterError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
        })
    }
}

impl ToGraphQLError for CsvImportError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_error_carries_code_extension() {
        let err = PaginationError::InvalidCursor.to_graphql_error();
        assert!(err.message.contains("Invalid pagination cursor"));
    }
}
