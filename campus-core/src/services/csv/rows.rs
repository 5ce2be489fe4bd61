use serde::Deserialize;

/// One spreadsheet row per type; all fields arrive as plain strings and are
/// parsed/validated by the row processors, not the CSV reader.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectRow {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub category_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramRow {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub program_name: String,
    #[serde(default)]
    pub age_range_low_value: String,
    #[serde(default)]
    pub age_range_high_value: String,
    #[serde(default)]
    pub age_range_unit: String,
    #[serde(default)]
    pub grade_name: String,
    #[serde(default)]
    pub subject_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolRow {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub school_shortcode: String,
    #[serde(default)]
    pub program_name: String,
}
