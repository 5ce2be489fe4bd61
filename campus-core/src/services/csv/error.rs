use std::collections::BTreeMap;

use serde::Serialize;

/// Stable machine-readable codes for row-level CSV validation failures.
pub mod codes {
    pub const ERR_CSV_MISSING_REQUIRED: &str = "ERR_CSV_MISSING_REQUIRED";
    pub const ERR_CSV_INVALID_MULTIPLE_EXIST: &str = "ERR_CSV_INVALID_MULTIPLE_EXIST";
    pub const ERR_CSV_INVALID_MULTIPLE_EXIST_CHILD: &str = "ERR_CSV_INVALID_MULTIPLE_EXIST_CHILD";
    pub const ERR_CSV_NONE_EXIST_ENTITY: &str = "ERR_CSV_NONE_EXIST_ENTITY";
    pub const ERR_CSV_NONE_EXIST_CHILD_ENTITY: &str = "ERR_CSV_NONE_EXIST_CHILD_ENTITY";
    pub const ERR_CSV_DUPLICATE_CHILD_ENTITY: &str = "ERR_CSV_DUPLICATE_CHILD_ENTITY";
    pub const ERR_CSV_INVALID_BETWEEN: &str = "ERR_CSV_INVALID_BETWEEN";
    pub const ERR_CSV_INVALID_GREATER_THAN_OTHER: &str = "ERR_CSV_INVALID_GREATER_THAN_OTHER";
    pub const ERR_CSV_INVALID_ENUM: &str = "ERR_CSV_INVALID_ENUM";
    pub const ERR_CSV_INVALID_LENGTH: &str = "ERR_CSV_INVALID_LENGTH";
    pub const ERR_CSV_INVALID_UPPERCASE_ALPHA_NUM_WITH_MAX: &str =
        "ERR_CSV_INVALID_UPPERCASE_ALPHA_NUM_WITH_MAX";
    pub const ERR_CSV_AGE_RANGE_FIELDS_INCOMPLETE: &str = "ERR_CSV_AGE_RANGE_FIELDS_INCOMPLETE";
    pub const ERR_UNAUTHORIZED_UPLOAD_TO_ORG: &str = "ERR_UNAUTHORIZED_UPLOAD_TO_ORG";
}

/// One row-level validation failure, addressed to a row and column so the
/// caller can fix the whole spreadsheet in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvError {
    pub code: &'static str,
    pub row: u32,
    pub column: String,
    pub message: String,
    pub params: BTreeMap<String, String>,
}

impl CsvError {
    fn new(code: &'static str, row: u32, column: &str, message: String) -> Self {
        Self {
            code,
            row,
            column: column.to_string(),
            message,
            params: BTreeMap::new(),
        }
    }

    fn with_params<const N: usize>(mut self, params: [(&str, String); N]) -> Self {
        for (key, value) in params {
            self.params.insert(key.to_string(), value);
        }
        self
    }

    pub fn missing_required(row: u32, column: &str, entity: &str, attribute: &str) -> Self {
        Self::new(
            codes::ERR_CSV_MISSING_REQUIRED,
            row,
            column,
            format!("{} {} is required.", entity, attribute),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
        ])
    }

    pub fn multiple_exist(row: u32, column: &str, entity: &str, name: &str, count: usize) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_MULTIPLE_EXIST,
            row,
            column,
            format!(
                "\"{}\" {} matches {}, it should match one {}.",
                name, entity, count, entity
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("name", name.to_string()),
            ("count", count.to_string()),
        ])
    }

    pub fn multiple_exist_child(
        row: u32,
        column: &str,
        entity: &str,
        name: &str,
        parent_entity: &str,
        parent_name: &str,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_MULTIPLE_EXIST_CHILD,
            row,
            column,
            format!(
                "\"{}\" {} already exists more than once in \"{}\" {}.",
                name, entity, parent_name, parent_entity
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("name", name.to_string()),
            ("parent_entity", parent_entity.to_string()),
            ("parent_name", parent_name.to_string()),
        ])
    }

    pub fn none_exist_entity(row: u32, column: &str, entity: &str, name: &str) -> Self {
        Self::new(
            codes::ERR_CSV_NONE_EXIST_ENTITY,
            row,
            column,
            format!("\"{}\" {} doesn't exist.", name, entity),
        )
        .with_params([("entity", entity.to_string()), ("name", name.to_string())])
    }

    pub fn none_exist_child(
        row: u32,
        column: &str,
        entity: &str,
        name: &str,
        parent_entity: &str,
        parent_name: &str,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_NONE_EXIST_CHILD_ENTITY,
            row,
            column,
            format!(
                "\"{}\" {} doesn't exist for \"{}\" {}.",
                name, entity, parent_name, parent_entity
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("name", name.to_string()),
            ("parent_entity", parent_entity.to_string()),
            ("parent_name", parent_name.to_string()),
        ])
    }

    pub fn duplicate_child(
        row: u32,
        column: &str,
        entity: &str,
        name: &str,
        parent_entity: &str,
        parent_name: &str,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_DUPLICATE_CHILD_ENTITY,
            row,
            column,
            format!(
                "\"{}\" {} already exists for \"{}\" {}.",
                name, entity, parent_name, parent_entity
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("name", name.to_string()),
            ("parent_entity", parent_entity.to_string()),
            ("parent_name", parent_name.to_string()),
        ])
    }

    pub fn invalid_between(
        row: u32,
        column: &str,
        entity: &str,
        attribute: &str,
        min: i32,
        max: i32,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_BETWEEN,
            row,
            column,
            format!("{} {} must be between {} and {}.", entity, attribute, min, max),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
            ("min", min.to_string()),
            ("max", max.to_string()),
        ])
    }

    pub fn invalid_greater_than_other(
        row: u32,
        column: &str,
        entity: &str,
        attribute: &str,
        other: &str,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_GREATER_THAN_OTHER,
            row,
            column,
            format!("{} {} must be greater than {}.", entity, attribute, other),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
            ("other", other.to_string()),
        ])
    }

    pub fn invalid_enum(row: u32, column: &str, entity: &str, attribute: &str, values: &str) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_ENUM,
            row,
            column,
            format!("{} {} must be one of these: {}.", entity, attribute, values),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
            ("values", values.to_string()),
        ])
    }

    pub fn invalid_length(row: u32, column: &str, entity: &str, attribute: &str, max: usize) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_LENGTH,
            row,
            column,
            format!(
                "{} {} must not be greater than {} characters.",
                entity, attribute, max
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
            ("max", max.to_string()),
        ])
    }

    pub fn invalid_uppercase_alphanumeric(
        row: u32,
        column: &str,
        entity: &str,
        attribute: &str,
        max: usize,
    ) -> Self {
        Self::new(
            codes::ERR_CSV_INVALID_UPPERCASE_ALPHA_NUM_WITH_MAX,
            row,
            column,
            format!(
                "{} {} must only contain uppercase letters, numbers and must not be greater than {} characters.",
                entity, attribute, max
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("attribute", attribute.to_string()),
            ("max", max.to_string()),
        ])
    }

    pub fn age_range_fields_incomplete(row: u32, column: &str) -> Self {
        Self::new(
            codes::ERR_CSV_AGE_RANGE_FIELDS_INCOMPLETE,
            row,
            column,
            "age range low value, high value and unit must all be provided or all be blank."
                .to_string(),
        )
    }

    pub fn unauthorized_upload(row: u32, column: &str, entity: &str, organization_name: &str) -> Self {
        Self::new(
            codes::ERR_UNAUTHORIZED_UPLOAD_TO_ORG,
            row,
            column,
            format!(
                "Unauthorized to upload {} to organization \"{}\".",
                entity, organization_name
            ),
        )
        .with_params([
            ("entity", entity.to_string()),
            ("organization_name", organization_name.to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_is_row_and_column_addressed() {
        let err = CsvError::missing_required(2, "organization_name", "organization", "name");
        assert_eq!(err.code, codes::ERR_CSV_MISSING_REQUIRED);
        assert_eq!(err.row, 2);
        assert_eq!(err.column, "organization_name");
        assert_eq!(err.message, "organization name is required.");
        assert_eq!(err.params.get("entity").map(String::as_str), Some("organization"));
    }

    #[test]
    fn multiple_exist_reports_observed_count() {
        let err = CsvError::multiple_exist(4, "organization_name", "organization", "Acme", 3);
        assert_eq!(
            err.message,
            "\"Acme\" organization matches 3, it should match one organization."
        );
        assert_eq!(err.params.get("count").map(String::as_str), Some("3"));
    }
}
