use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

use super::common_types::Status;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
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
        super::program_grades::Relation::Program.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::program_grades::Relation::Grade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(name: String, organization_id: Option<Uuid>) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            status: Set(Status::Active),
            system: Set(organization_id.is_none()),
            organization_id: Set(organization_id),
            created_at: Set(chrono::Utc::now()),
            deleted_at: ActiveValue::NotSet,
        }
    }
}
