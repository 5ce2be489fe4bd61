use sea_orm::{ActiveValue, Set};
use sea_orm_migration::prelude::*;
use uuid::Uuid;

use crate::database::entities::common_types::{AgeRangeUnit, Status, NONE_SPECIFIED};
use crate::database::entities::{age_ranges, categories, grades, programs, subcategories, subjects};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Seeds the built-in "None Specified" rows that bulk imports fall back to
// when an optional reference column is left blank.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let now = chrono::Utc::now();

        use sea_orm::ActiveModelTrait;

        age_ranges::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            low_value: Set(0),
            low_value_unit: Set(AgeRangeUnit::Year),
            high_value: Set(99),
            high_value_unit: Set(AgeRangeUnit::Year),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        grades::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        subcategories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        programs::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(NONE_SPECIFIED.to_string()),
            status: Set(Status::Active),
            system: Set(true),
            organization_id: Set(None),
            created_at: Set(now),
            deleted_at: ActiveValue::NotSet,
        }
        .insert(db)
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

        let db = manager.get_connection();

        programs::Entity::delete_many()
            .filter(programs::Column::Name.eq(NONE_SPECIFIED))
            .filter(programs::Column::System.eq(true))
            .exec(db)
            .await?;
        subcategories::Entity::delete_many()
            .filter(subcategories::Column::Name.eq(NONE_SPECIFIED))
            .filter(subcategories::Column::System.eq(true))
            .exec(db)
            .await?;
        categories::Entity::delete_many()
            .filter(categories::Column::Name.eq(NONE_SPECIFIED))
            .filter(categories::Column::System.eq(true))
            .exec(db)
            .await?;
        subjects::Entity::delete_many()
            .filter(subjects::Column::Name.eq(NONE_SPECIFIED))
            .filter(subjects::Column::System.eq(true))
            .exec(db)
            .await?;
        grades::Entity::delete_many()
            .filter(grades::Column::Name.eq(NONE_SPECIFIED))
            .filter(grades::Column::System.eq(true))
            .exec(db)
            .await?;
        age_ranges::Entity::delete_many()
            .filter(age_ranges::Column::Name.eq(NONE_SPECIFIED))
            .filter(age_ranges::Column::System.eq(true))
            .exec(db)
            .await?;

        Ok(())
    }
}
