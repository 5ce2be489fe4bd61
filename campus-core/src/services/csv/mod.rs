//! Bulk CSV ingestion with row-level validation and all-or-nothing commit.
//!
//! Each file runs inside one transaction. Rows are processed in order (later
//! rows may depend on earlier rows' uncommitted writes); every row reports
//! its own errors into a file-wide accumulator, and the transaction commits
//! only when that accumulator is still empty after the last row. A doomed
//! file keeps validating so the caller gets the complete error list in one
//! pass, but no further rows are written.

mod error;
mod lookups;
mod program;
mod rows;
mod school;
mod subject;
mod validations;

use std::io::Read;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::de::DeserializeOwned;

use crate::errors::CsvImportError;
use crate::permissions::PermissionChecker;

pub use error::{codes, CsvError};
pub use rows::{ProgramRow, SchoolRow, SubjectRow};
pub use validations::{validate_age_range, AgeRangeFields};

/// Result of processing one file: how many data rows were seen, and every
/// row-level error found. An empty error list means the file committed.
#[derive(Debug, Clone)]
pub struct CsvImportOutcome {
    pub rows_processed: usize,
    pub errors: Vec<CsvError>,
}

impl CsvImportOutcome {
    pub fn committed(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone)]
pub struct CsvImportService {
    db: DatabaseConnection,
    permissions: Arc<dyn PermissionChecker>,
}

impl CsvImportService {
    pub fn new(db: DatabaseConnection, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self { db, permissions }
    }

    pub async fn import_subjects(
        &self,
        reader: impl Read + Send,
    ) -> Result<CsvImportOutcome, CsvImportError> {
        let rows: Vec<SubjectRow> = read_rows(reader)?;
        let txn = self.db.begin().await?;
        let mut errors: Vec<CsvError> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            // data rows are numbered from 1; the header is not counted
            let row_number = (index + 1) as u32;
            let row_errors = subject::process_subject_row(
                &txn,
                self.permissions.as_ref(),
                row,
                row_number,
                !errors.is_empty(),
            )
            .await?;
            errors.extend(row_errors);
        }

        finish_file(txn, rows.len(), errors).await
    }

    pub async fn import_programs(
        &self,
        reader: impl Read + Send,
    ) -> Result<CsvImportOutcome, CsvImportError> {
        let rows: Vec<ProgramRow> = read_rows(reader)?;
        let txn = self.db.begin().await?;
        let mut errors: Vec<CsvError> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = (index + 1) as u32;
            let row_errors = program::process_program_row(
                &txn,
                self.permissions.as_ref(),
                row,
                row_number,
                !errors.is_empty(),
            )
            .await?;
            errors.extend(row_errors);
        }

        finish_file(txn, rows.len(), errors).await
    }

    pub async fn import_schools(
        &self,
        reader: impl Read + Send,
    ) -> Result<CsvImportOutcome, CsvImportError> {
        let rows: Vec<SchoolRow> = read_rows(reader)?;
        let txn = self.db.begin().await?;
        let mut errors: Vec<CsvError> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = (index + 1) as u32;
            let row_errors = school::process_school_row(
                &txn,
                self.permissions.as_ref(),
                row,
                row_number,
                !errors.is_empty(),
            )
            .await?;
            errors.extend(row_errors);
        }

        finish_file(txn, rows.len(), errors).await
    }
}

/// Commit when the file accumulated no errors, roll back otherwise.
async fn finish_file(
    txn: DatabaseTransaction,
    rows_processed: usize,
    errors: Vec<CsvError>,
) -> Result<CsvImportOutcome, CsvImportError> {
    if errors.is_empty() {
        txn.commit().await?;
        tracing::info!(rows = rows_processed, "CSV import committed");
    } else {
        txn.rollback().await?;
        tracing::warn!(
            rows = rows_processed,
            errors = errors.len(),
            "CSV import rolled back"
        );
    }

    Ok(CsvImportOutcome {
        rows_processed,
        errors,
    })
}

fn read_rows<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    if rows.is_empty() {
        return Err(CsvImportError::EmptyFile);
    }
    Ok(rows)
}
