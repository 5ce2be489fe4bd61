use std::sync::Arc;

use sea_orm::DatabaseConnection;

use campus::permissions::PermissionChecker;
use campus::services::{CsvImportService, DedupeService};

#[derive(Clone)]
pub struct GraphQLContext {
    pub db: DatabaseConnection,
    pub csv_import_service: Arc<CsvImportService>,
    pub dedupe_service: Arc<DedupeService>,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection, permissions: Arc<dyn PermissionChecker>) -> Self {
        let csv_import_service = Arc::new(CsvImportService::new(db.clone(), permissions));
        let dedupe_service = Arc::new(DedupeService::new(db.clone()));
        Self {
            db,
            csv_import_service,
            dedupe_service,
        }
    }
}
