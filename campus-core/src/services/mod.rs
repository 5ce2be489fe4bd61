pub mod csv;
pub mod dedupe_service;
pub mod shortcode;

pub use csv::CsvImportService;
pub use dedupe_service::DedupeService;
