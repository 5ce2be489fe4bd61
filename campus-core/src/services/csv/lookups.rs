use sea_orm::sea_query::Condition;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::database::entities::common_types::{AgeRangeUnit, Status, NONE_SPECIFIED};
use crate::database::entities::{age_ranges, categories, grades, organizations, programs, subjects};

use super::error::CsvError;

/// Resolve an organization by unique name. Zero or multiple matches is a
/// row error: the reference must identify exactly one organization.
pub(super) async fn find_organization<C: ConnectionTrait>(
    db: &C,
    name: &str,
    row_number: u32,
) -> Result<Result<organizations::Model, CsvError>, DbErr> {
    let mut matches = organizations::Entity::find()
        .filter(organizations::Column::Name.eq(name))
        .all(db)
        .await?;

    if matches.len() != 1 {
        return Ok(Err(CsvError::multiple_exist(
            row_number,
            "organization_name",
            "organization",
            name,
            matches.len(),
        )));
    }
    Ok(Ok(matches.remove(0)))
}

/// Active rows owned by the organization, or organization-less system rows.
fn org_or_system<C>(organization_id: Uuid, org_col: C, system_col: C) -> Condition
where
    C: ColumnTrait,
{
    Condition::any()
        .add(org_col.eq(organization_id))
        .add(
            Condition::all()
                .add(system_col.eq(true))
                .add(org_col.is_null()),
        )
}

pub(super) async fn find_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
    organization_id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .filter(categories::Column::Status.eq(Status::Active))
        .filter(org_or_system(
            organization_id,
            categories::Column::OrganizationId,
            categories::Column::System,
        ))
        .one(db)
        .await
}

pub(super) async fn find_grade<C: ConnectionTrait>(
    db: &C,
    name: &str,
    organization_id: Uuid,
) -> Result<Option<grades::Model>, DbErr> {
    grades::Entity::find()
        .filter(grades::Column::Name.eq(name))
        .filter(grades::Column::Status.eq(Status::Active))
        .filter(org_or_system(
            organization_id,
            grades::Column::OrganizationId,
            grades::Column::System,
        ))
        .one(db)
        .await
}

pub(super) async fn find_subject<C: ConnectionTrait>(
    db: &C,
    name: &str,
    organization_id: Uuid,
) -> Result<Option<subjects::Model>, DbErr> {
    subjects::Entity::find()
        .filter(subjects::Column::Name.eq(name))
        .filter(subjects::Column::Status.eq(Status::Active))
        .filter(org_or_system(
            organization_id,
            subjects::Column::OrganizationId,
            subjects::Column::System,
        ))
        .one(db)
        .await
}

pub(super) async fn find_program<C: ConnectionTrait>(
    db: &C,
    name: &str,
    organization_id: Uuid,
) -> Result<Option<programs::Model>, DbErr> {
    programs::Entity::find()
        .filter(programs::Column::Name.eq(name))
        .filter(programs::Column::Status.eq(Status::Active))
        .filter(org_or_system(
            organization_id,
            programs::Column::OrganizationId,
            programs::Column::System,
        ))
        .one(db)
        .await
}

/// Resolve an age range by its value triple within the organization scope.
pub(super) async fn find_age_range<C: ConnectionTrait>(
    db: &C,
    low: i32,
    high: i32,
    unit: AgeRangeUnit,
    organization_id: Uuid,
) -> Result<Option<age_ranges::Model>, DbErr> {
    age_ranges::Entity::find()
        .filter(age_ranges::Column::LowValue.eq(low))
        .filter(age_ranges::Column::HighValue.eq(high))
        .filter(age_ranges::Column::LowValueUnit.eq(unit.as_str()))
        .filter(age_ranges::Column::Status.eq(Status::Active))
        .filter(org_or_system(
            organization_id,
            age_ranges::Column::OrganizationId,
            age_ranges::Column::System,
        ))
        .one(db)
        .await
}

/// The seeded system fallback row every blank optional reference resolves
/// to. Its absence is a deployment fault, not a row error.
pub(super) async fn none_specified_age_range<C: ConnectionTrait>(
    db: &C,
) -> Result<age_ranges::Model, DbErr> {
    age_ranges::Entity::find()
        .filter(age_ranges::Column::Name.eq(NONE_SPECIFIED))
        .filter(age_ranges::Column::System.eq(true))
        .filter(age_ranges::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound("system 'None Specified' age range is missing".to_string())
        })
}
