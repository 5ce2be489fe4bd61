use async_graphql::SimpleObject;

use campus::services::csv::{CsvError, CsvImportOutcome};

/// One row-level validation failure, addressed to its row and column.
#[derive(SimpleObject, Clone)]
pub struct CsvRowError {
    pub code: String,
    pub row: i32,
    pub column: String,
    pub message: String,
    pub params: Option<serde_json::Value>,
}

impl From<CsvError> for CsvRowError {
    fn from(error: CsvError) -> Self {
        let params = if error.params.is_empty() {
            None
        } else {
            serde_json::to_value(&error.params).ok()
        };
        Self {
            code: error.code.to_string(),
            row: error.row as i32,
            column: error.column,
            message: error.message,
            params,
        }
    }
}

/// Outcome of a CSV upload. A non-empty error list means nothing was
/// persisted; the list covers every bad row so the whole file can be fixed
/// in one iteration.
#[derive(SimpleObject, Clone)]
pub struct CsvUploadResult {
    pub rows_processed: i32,
    pub committed: bool,
    pub errors: Vec<CsvRowError>,
}

impl From<CsvImportOutcome> for CsvUploadResult {
    fn from(outcome: CsvImportOutcome) -> Self {
        Self {
            rows_processed: outcome.rows_processed as i32,
            committed: outcome.committed(),
            errors: outcome.errors.into_iter().map(CsvRowError::from).collect(),
        }
    }
}
