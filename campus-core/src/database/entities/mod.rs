pub mod common_types;

pub mod age_ranges;
pub mod categories;
pub mod grades;
pub mod organizations;
pub mod programs;
pub mod schools;
pub mod subcategories;
pub mod subjects;

// Association tables
pub mod category_subcategories;
pub mod program_age_ranges;
pub mod program_grades;
pub mod program_subjects;
pub mod school_programs;
pub mod subject_categories;
