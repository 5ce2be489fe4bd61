use crate::database::entities::common_types::AgeRangeUnit;

use super::error::CsvError;

pub const AGE_RANGE_LOW_MIN: i32 = 0;
pub const AGE_RANGE_LOW_MAX: i32 = 99;
pub const AGE_RANGE_HIGH_MIN: i32 = 1;
pub const AGE_RANGE_HIGH_MAX: i32 = 99;

/// Outcome of validating a row's age-range columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRangeFields {
    /// All three columns blank: the row falls back to the system default
    Unspecified,
    /// All three columns present and valid
    Valid {
        low: i32,
        high: i32,
        unit: AgeRangeUnit,
    },
    /// One or more columns failed; errors were appended
    Invalid,
}

/// Validate the three age-range columns together: all-or-none presence,
/// numeric bounds, high > low, and unit enum membership. Every violation is
/// reported with its own row/column-addressed error.
pub fn validate_age_range(
    errors: &mut Vec<CsvError>,
    row_number: u32,
    low_value: &str,
    high_value: &str,
    unit: &str,
) -> AgeRangeFields {
    let all_present = !low_value.is_empty() && !high_value.is_empty() && !unit.is_empty();
    let none_present = low_value.is_empty() && high_value.is_empty() && unit.is_empty();

    if none_present {
        return AgeRangeFields::Unspecified;
    }

    if !all_present {
        errors.push(CsvError::age_range_fields_incomplete(
            row_number,
            "age_range_low_value, age_range_high_value, age_range_unit",
        ));
        return AgeRangeFields::Invalid;
    }

    let mut valid = true;

    let low = match low_value.parse::<i32>() {
        Ok(v) if (AGE_RANGE_LOW_MIN..=AGE_RANGE_LOW_MAX).contains(&v) => Some(v),
        _ => {
            errors.push(CsvError::invalid_between(
                row_number,
                "age_range_low_value",
                "ageRange",
                "age_range_low_value",
                AGE_RANGE_LOW_MIN,
                AGE_RANGE_LOW_MAX,
            ));
            valid = false;
            None
        }
    };

    let high = match high_value.parse::<i32>() {
        Ok(v) if (AGE_RANGE_HIGH_MIN..=AGE_RANGE_HIGH_MAX).contains(&v) => Some(v),
        _ => {
            errors.push(CsvError::invalid_between(
                row_number,
                "age_range_high_value",
                "ageRange",
                "age_range_high_value",
                AGE_RANGE_HIGH_MIN,
                AGE_RANGE_HIGH_MAX,
            ));
            valid = false;
            None
        }
    };

    if let (Some(low), Some(high)) = (low, high) {
        if high <= low {
            errors.push(CsvError::invalid_greater_than_other(
                row_number,
                "age_range_high_value",
                "ageRange",
                "age_range_high_value",
                "age_range_low_value",
            ));
            valid = false;
        }
    }

    let parsed_unit = match unit.parse::<AgeRangeUnit>() {
        Ok(u) => Some(u),
        Err(()) => {
            errors.push(CsvError::invalid_enum(
                row_number,
                "age_range_unit",
                "ageRange",
                "age_range_unit",
                AgeRangeUnit::accepted_values(),
            ));
            valid = false;
            None
        }
    };

    match (valid, low, high, parsed_unit) {
        (true, Some(low), Some(high), Some(unit)) => AgeRangeFields::Valid { low, high, unit },
        _ => AgeRangeFields::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::csv::error::codes;

    #[test]
    fn all_blank_is_unspecified() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 1, "", "", "");
        assert_eq!(fields, AgeRangeFields::Unspecified);
        assert!(errors.is_empty());
    }

    #[test]
    fn partial_presence_is_rejected() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 3, "5", "", "year");
        assert_eq!(fields, AgeRangeFields::Invalid);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, codes::ERR_CSV_AGE_RANGE_FIELDS_INCOMPLETE);
        assert_eq!(errors[0].row, 3);
    }

    #[test]
    fn valid_fields_parse() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 1, "5", "7", "year");
        assert_eq!(
            fields,
            AgeRangeFields::Valid {
                low: 5,
                high: 7,
                unit: AgeRangeUnit::Year,
            }
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn out_of_bounds_low_value_is_rejected() {
        let mut errors = Vec::new();
        validate_age_range(&mut errors, 2, "100", "101", "year");
        assert!(errors
            .iter()
            .any(|e| e.code == codes::ERR_CSV_INVALID_BETWEEN && e.column == "age_range_low_value"));
    }

    #[test]
    fn non_numeric_low_value_is_rejected() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 2, "five", "7", "year");
        assert_eq!(fields, AgeRangeFields::Invalid);
        assert_eq!(errors[0].code, codes::ERR_CSV_INVALID_BETWEEN);
    }

    #[test]
    fn high_must_exceed_low() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 2, "7", "7", "year");
        assert_eq!(fields, AgeRangeFields::Invalid);
        assert_eq!(errors[0].code, codes::ERR_CSV_INVALID_GREATER_THAN_OTHER);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let mut errors = Vec::new();
        let fields = validate_age_range(&mut errors, 2, "5", "7", "fortnight");
        assert_eq!(fields, AgeRangeFields::Invalid);
        assert_eq!(errors[0].code, codes::ERR_CSV_INVALID_ENUM);
    }
}
