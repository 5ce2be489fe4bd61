use async_graphql::{Enum, SimpleObject};
use uuid::Uuid;

use campus::database::entities::common_types;
use campus::database::entities::{age_ranges, categories, grades, programs, schools, subjects};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "Status")]
pub enum StatusType {
    Active,
    Inactive,
}

impl From<common_types::Status> for StatusType {
    fn from(status: common_types::Status) -> Self {
        match status {
            common_types::Status::Active => StatusType::Active,
            common_types::Status::Inactive => StatusType::Inactive,
        }
    }
}

impl From<StatusType> for common_types::Status {
    fn from(status: StatusType) -> Self {
        match status {
            StatusType::Active => common_types::Status::Active,
            StatusType::Inactive => common_types::Status::Inactive,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "AgeRangeUnit")]
pub enum AgeRangeUnitType {
    Month,
    Year,
}

impl From<common_types::AgeRangeUnit> for AgeRangeUnitType {
    fn from(unit: common_types::AgeRangeUnit) -> Self {
        match unit {
            common_types::AgeRangeUnit::Month => AgeRangeUnitType::Month,
            common_types::AgeRangeUnit::Year => AgeRangeUnitType::Year,
        }
    }
}

impl From<AgeRangeUnitType> for common_types::AgeRangeUnit {
    fn from(unit: AgeRangeUnitType) -> Self {
        match unit {
            AgeRangeUnitType::Month => common_types::AgeRangeUnit::Month,
            AgeRangeUnitType::Year => common_types::AgeRangeUnit::Year,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct AgeRangeNode {
    pub id: Uuid,
    pub name: String,
    pub status: StatusType,
    pub system: bool,
    pub organization_id: Option<Uuid>,
    pub low_value: i32,
    pub low_value_unit: AgeRangeUnitType,
    pub high_value: i32,
    pub high_value_unit: AgeRangeUnitType,
}

impl From<age_ranges::Model> for AgeRangeNode {
    fn from(model: age_ranges::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status.into(),
            system: model.system,
            organization_id: model.organization_id,
            low_value: model.low_value,
            low_value_unit: model.low_value_unit.into(),
            high_value: model.high_value,
            high_value_unit: model.high_value_unit.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GradeNode {
    pub id: Uuid,
    pub name: String,
    pub status: StatusType,
    pub system: bool,
    pub organization_id: Option<Uuid>,
}

impl From<grades::Model> for GradeNode {
    fn from(model: grades::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status.into(),
            system: model.system,
            organization_id: model.organization_id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct SubjectNode {
    pub id: Uuid,
    pub name: String,
    pub status: StatusType,
    pub system: bool,
    pub organization_id: Option<Uuid>,
}

impl From<subjects::Model> for SubjectNode {
    fn from(model: subjects::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status.into(),
            system: model.system,
            organization_id: model.organization_id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct CategoryNode {
    pub id: Uuid,
    pub name: String,
    pub status: StatusType,
    pub system: bool,
    pub organization_id: Option<Uuid>,
}

impl From<categories::Model> for CategoryNode {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status.into(),
            system: model.system,
            organization_id: model.organization_id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct ProgramNode {
    pub id: Uuid,
    pub name: String,
    pub status: StatusType,
    pub system: bool,
    pub organization_id: Option<Uuid>,
}

impl From<programs::Model> for ProgramNode {
    fn from(model: programs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status.into(),
            system: model.system,
            organization_id: model.organization_id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct SchoolNode {
    pub id: Uuid,
    pub name: String,
    pub shortcode: String,
    pub status: StatusType,
    pub organization_id: Uuid,
}

impl From<schools::Model> for SchoolNode {
    fn from(model: schools::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            shortcode: model.shortcode,
            status: model.status.into(),
            organization_id: model.organization_id,
        }
    }
}
