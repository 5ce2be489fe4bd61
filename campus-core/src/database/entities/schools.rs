use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

use super::common_types::Status;

/// Schools are always tenant-owned, so unlike the taxonomy entities there
/// is no `system` flag and the organization is mandatory.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub shortcode: String,
    pub status: Status,
    pub organization_id: Uuid,
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
        super::school_programs::Relation::Program.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::school_programs::Relation::School.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(name: String, shortcode: String, organization_id: Uuid) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            shortcode: Set(shortcode),
            status: Set(Status::Active),
            organization_id: Set(organization_id),
            created_at: Set(chrono::Utc::now()),
            deleted_at: ActiveValue::NotSet,
        }
    }
}
