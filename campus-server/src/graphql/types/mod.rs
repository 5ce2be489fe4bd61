pub mod csv;
pub mod filters;
pub mod nodes;
pub mod paging;
pub mod scalars;

pub use csv::{CsvRowError, CsvUploadResult};
pub use filters::*;
pub use nodes::*;
pub use paging::*;
pub use scalars::PageSize;
