use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::database::entities::common_types::NONE_SPECIFIED;
use crate::database::entities::{
    age_ranges, program_age_ranges, program_grades, program_subjects, programs,
};
use crate::permissions::{Permission, PermissionChecker};

use super::error::CsvError;
use super::lookups;
use super::rows::ProgramRow;
use super::validations::{validate_age_range, AgeRangeFields};

/// Validate one program row: resolve its age range, grade and subject
/// references (blank optional columns fall back to the system
/// "None Specified" rows), reject duplicate associations, and persist only
/// when both the row and the file so far are clean.
pub(super) async fn process_program_row(
    txn: &DatabaseTransaction,
    permissions: &dyn PermissionChecker,
    row: &ProgramRow,
    row_number: u32,
    file_has_errors: bool,
) -> Result<Vec<CsvError>, DbErr> {
    let mut row_errors = Vec::new();

    if row.organization_name.is_empty() {
        row_errors.push(CsvError::missing_required(
            row_number,
            "organization_name",
            "organization",
            "name",
        ));
    }
    if row.program_name.is_empty() {
        row_errors.push(CsvError::missing_required(
            row_number,
            "program_name",
            "program",
            "name",
        ));
    }

    let age_range_fields = validate_age_range(
        &mut row_errors,
        row_number,
        &row.age_range_low_value,
        &row.age_range_high_value,
        &row.age_range_unit,
    );

    // shape errors short-circuit before any database access
    if !row_errors.is_empty() {
        return Ok(row_errors);
    }

    let organization =
        match lookups::find_organization(txn, &row.organization_name, row_number).await? {
            Ok(org) => org,
            Err(err) => {
                row_errors.push(err);
                return Ok(row_errors);
            }
        };

    if !permissions
        .allowed(organization.id, Permission::CreatePrograms)
        .await
    {
        row_errors.push(CsvError::unauthorized_upload(
            row_number,
            "organization_name",
            "program",
            &organization.name,
        ));
        return Ok(row_errors);
    }

    let existing = programs::Entity::find()
        .filter(programs::Column::Name.eq(row.program_name.as_str()))
        .filter(programs::Column::OrganizationId.eq(organization.id))
        .all(txn)
        .await?;

    if existing.len() > 1 {
        row_errors.push(CsvError::multiple_exist_child(
            row_number,
            "program_name",
            "program",
            &row.program_name,
            "organization",
            &organization.name,
        ));
        return Ok(row_errors);
    }
    let existing_program_id = existing.first().map(|program| program.id);

    let age_range = match age_range_fields {
        AgeRangeFields::Unspecified => lookups::none_specified_age_range(txn).await?,
        AgeRangeFields::Valid { low, high, unit } => {
            match lookups::find_age_range(txn, low, high, unit, organization.id).await? {
                Some(age_range) => age_range,
                None => {
                    row_errors.push(CsvError::none_exist_child(
                        row_number,
                        "age_range_low_value, age_range_high_value, age_range_unit",
                        "ageRange",
                        &age_ranges::Model::display_name(low, high, unit),
                        "organization",
                        &organization.name,
                    ));
                    return Ok(row_errors);
                }
            }
        }
        // unreachable in practice: Invalid short-circuits above
        AgeRangeFields::Invalid => return Ok(row_errors),
    };

    let grade_name = if row.grade_name.is_empty() {
        NONE_SPECIFIED
    } else {
        row.grade_name.as_str()
    };
    let grade = match lookups::find_grade(txn, grade_name, organization.id).await? {
        Some(grade) => grade,
        None => {
            row_errors.push(CsvError::none_exist_child(
                row_number,
                "grade_name",
                "grade",
                grade_name,
                "organization",
                &organization.name,
            ));
            return Ok(row_errors);
        }
    };

    let subject_name = if row.subject_name.is_empty() {
        NONE_SPECIFIED
    } else {
        row.subject_name.as_str()
    };
    let subject = match lookups::find_subject(txn, subject_name, organization.id).await? {
        Some(subject) => subject,
        None => {
            row_errors.push(CsvError::none_exist_child(
                row_number,
                "subject_name",
                "subject",
                subject_name,
                "organization",
                &organization.name,
            ));
            return Ok(row_errors);
        }
    };

    // an existing program rejects associations it already has
    if let Some(program_id) = existing_program_id {
        if has_age_range(txn, program_id, age_range.id).await? {
            row_errors.push(CsvError::duplicate_child(
                row_number,
                "age_range_low_value, age_range_high_value, age_range_unit",
                "ageRange",
                &age_range.name,
                "program",
                &row.program_name,
            ));
            return Ok(row_errors);
        }
        if has_grade(txn, program_id, grade.id).await? {
            row_errors.push(CsvError::duplicate_child(
                row_number,
                "grade_name",
                "grade",
                grade_name,
                "program",
                &row.program_name,
            ));
            return Ok(row_errors);
        }
        if has_subject(txn, program_id, subject.id).await? {
            row_errors.push(CsvError::duplicate_child(
                row_number,
                "subject_name",
                "subject",
                subject_name,
                "program",
                &row.program_name,
            ));
            return Ok(row_errors);
        }
    }

    // never write once the file is doomed
    if file_has_errors {
        return Ok(row_errors);
    }

    let program_id = match existing_program_id {
        Some(id) => id,
        None => {
            programs::ActiveModel::new(row.program_name.clone(), Some(organization.id))
                .insert(txn)
                .await?
                .id
        }
    };

    program_age_ranges::ActiveModel {
        program_id: Set(program_id),
        age_range_id: Set(age_range.id),
    }
    .insert(txn)
    .await?;
    program_grades::ActiveModel {
        program_id: Set(program_id),
        grade_id: Set(grade.id),
    }
    .insert(txn)
    .await?;
    program_subjects::ActiveModel {
        program_id: Set(program_id),
        subject_id: Set(subject.id),
    }
    .insert(txn)
    .await?;

    Ok(row_errors)
}

async fn has_age_range(
    txn: &DatabaseTransaction,
    program_id: Uuid,
    age_range_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(program_age_ranges::Entity::find()
        .filter(program_age_ranges::Column::ProgramId.eq(program_id))
        .filter(program_age_ranges::Column::AgeRangeId.eq(age_range_id))
        .one(txn)
        .await?
        .is_some())
}

async fn has_grade(
    txn: &DatabaseTransaction,
    program_id: Uuid,
    grade_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(program_grades::Entity::find()
        .filter(program_grades::Column::ProgramId.eq(program_id))
        .filter(program_grades::Column::GradeId.eq(grade_id))
        .one(txn)
        .await?
        .is_some())
}

async fn has_subject(
    txn: &DatabaseTransaction,
    program_id: Uuid,
    subject_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(program_subjects::Entity::find()
        .filter(program_subjects::Column::ProgramId.eq(program_id))
        .filter(program_subjects::Column::SubjectId.eq(subject_id))
        .one(txn)
        .await?
        .is_some())
}
