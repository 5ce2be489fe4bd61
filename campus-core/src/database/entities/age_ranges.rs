use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

use super::common_types::{AgeRangeUnit, Status};

/// An age band like "5 - 7 year(s)". System rows are shared across tenants
/// and carry no owning organization.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "age_ranges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub low_value: i32,
    pub low_value_unit: AgeRangeUnit,
    pub high_value: i32,
    pub high_value_unit: AgeRangeUnit,
    pub status: Status,
    pub system: bool,
    pub organization_id: Option<Uuid>,
    pub created_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organization,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        super::program_age_ranges::Relation::Program.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::program_age_ranges::Relation::AgeRange.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name used everywhere an age range is referenced by value,
    /// e.g. "5 - 7 year(s)".
    pub fn display_name(low: i32, high: i32, unit: AgeRangeUnit) -> String {
        format!("{} - {} {}(s)", low, high, unit)
    }
}

impl ActiveModel {
    pub fn new(
        low_value: i32,
        high_value: i32,
        unit: AgeRangeUnit,
        organization_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(Model::display_name(low_value, high_value, unit)),
            low_value: Set(low_value),
            low_value_unit: Set(unit),
            high_value: Set(high_value),
            high_value_unit: Set(unit),
            status: Set(Status::Active),
            system: Set(organization_id.is_none()),
            organization_id: Set(organization_id),
            created_at: Set(chrono::Utc::now()),
            deleted_at: ActiveValue::NotSet,
        }
    }
}
