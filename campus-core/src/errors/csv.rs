use thiserror::Error;

/// File-level CSV import failures.
///
/// Row-level validation problems are not errors in this sense: they are
/// accumulated as `services::csv::CsvError` values and returned to the
/// caller as data so a whole spreadsheet can be fixed in one pass.
#[derive(Error, Debug)]
pub enum CsvImportError {
    /// File contained no data rows
    #[error("CSV file is empty")]
    EmptyFile,

    /// File could not be parsed as CSV at all
    #[error("Invalid CSV input: {0}")]
    BadInput(#[from] csv::Error),

    /// Database operation failed; the surrounding transaction is rolled back
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CsvImportError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, CsvImportError::EmptyFile | CsvImportError::BadInput(_))
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CsvImportError::EmptyFile => "ERR_CSV_EMPTY_FILE",
            CsvImportError::BadInput(_) => "ERR_CSV_BAD_INPUT",
            CsvImportError::Database(_) => "DATABASE_ERROR",
        }
    }
}
