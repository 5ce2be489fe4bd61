use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Soft-delete flag carried by every taxonomy entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "active"),
            Status::Inactive => write!(f, "inactive"),
        }
    }
}

/// Unit for age-range bounds.
///
/// The derived ordering (`Month < Year`) is load-bearing: composite
/// age-range filters compare `(value, unit)` tuples and the stored string
/// values ("month" < "year") must order the same way in SQL.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
pub enum AgeRangeUnit {
    #[sea_orm(string_value = "month")]
    Month,
    #[sea_orm(string_value = "year")]
    Year,
}

impl AgeRangeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRangeUnit::Month => "month",
            AgeRangeUnit::Year => "year",
        }
    }

    /// Comma-separated list of accepted values, for error messages.
    pub fn accepted_values() -> &'static str {
        "month, year"
    }
}

impl fmt::Display for AgeRangeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgeRangeUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(AgeRangeUnit::Month),
            "year" => Ok(AgeRangeUnit::Year),
            _ => Err(()),
        }
    }
}

/// Name of the built-in fallback row referenced when an optional CSV column
/// is left blank.
pub const NONE_SPECIFIED: &str = "None Specified";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_range_unit_ordering_matches_string_ordering() {
        assert!(AgeRangeUnit::Month < AgeRangeUnit::Year);
        assert!(AgeRangeUnit::Month.as_str() < AgeRangeUnit::Year.as_str());
    }

    #[test]
    fn age_range_unit_round_trips_from_str() {
        assert_eq!("month".parse::<AgeRangeUnit>(), Ok(AgeRangeUnit::Month));
        assert_eq!("year".parse::<AgeRangeUnit>(), Ok(AgeRangeUnit::Year));
        assert!("decade".parse::<AgeRangeUnit>().is_err());
    }
}
