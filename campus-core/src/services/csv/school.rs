use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set};

use crate::database::entities::common_types::NONE_SPECIFIED;
use crate::database::entities::{school_programs, schools};
use crate::permissions::{Permission, PermissionChecker};
use crate::services::shortcode::{generate_shortcode, validate_shortcode, SHORTCODE_MAX_LEN};

use super::error::CsvError;
use super::lookups;
use super::rows::SchoolRow;

pub(super) const SCHOOL_NAME_MAX_LEN: usize = 120;

/// Validate one school row. Shortcodes are uppercased; a blank shortcode
/// gets a generated one on creation.
pub(super) async fn process_school_row(
    txn: &DatabaseTransaction,
    permissions: &dyn PermissionChecker,
    row: &SchoolRow,
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
    if row.school_name.is_empty() {
        row_errors.push(CsvError::missing_required(
            row_number,
            "school_name",
            "school",
            "name",
        ));
    } else if row.school_name.chars().count() > SCHOOL_NAME_MAX_LEN {
        row_errors.push(CsvError::invalid_length(
            row_number,
            "school_name",
            "school",
            "name",
            SCHOOL_NAME_MAX_LEN,
        ));
    }

    let shortcode = if row.school_shortcode.is_empty() {
        generate_shortcode()
    } else {
        row.school_shortcode.to_uppercase()
    };
    if !validate_shortcode(&shortcode) {
        row_errors.push(CsvError::invalid_uppercase_alphanumeric(
            row_number,
            "school_shortcode",
            "school",
            "shortcode",
            SHORTCODE_MAX_LEN,
        ));
    }

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
        .allowed(organization.id, Permission::CreateSchools)
        .await
    {
        row_errors.push(CsvError::unauthorized_upload(
            row_number,
            "organization_name",
            "school",
            &organization.name,
        ));
        return Ok(row_errors);
    }

    let existing = schools::Entity::find()
        .filter(schools::Column::Name.eq(row.school_name.as_str()))
        .filter(schools::Column::OrganizationId.eq(organization.id))
        .all(txn)
        .await?;

    if existing.len() > 1 {
        row_errors.push(CsvError::multiple_exist_child(
            row_number,
            "school_name",
            "school",
            &row.school_name,
            "organization",
            &organization.name,
        ));
        return Ok(row_errors);
    }
    let existing_school_id = existing.first().map(|school| school.id);

    let program_name = if row.program_name.is_empty() {
        NONE_SPECIFIED
    } else {
        row.program_name.as_str()
    };
    let program = match lookups::find_program(txn, program_name, organization.id).await? {
        Some(program) => program,
        None => {
            row_errors.push(CsvError::none_exist_child(
                row_number,
                "program_name",
                "program",
                program_name,
                "organization",
                &organization.name,
            ));
            return Ok(row_errors);
        }
    };

    if let Some(school_id) = existing_school_id {
        let duplicate = school_programs::Entity::find()
            .filter(school_programs::Column::SchoolId.eq(school_id))
            .filter(school_programs::Column::ProgramId.eq(program.id))
            .one(txn)
            .await?;
        if duplicate.is_some() {
            row_errors.push(CsvError::duplicate_child(
                row_number,
                "program_name",
                "program",
                program_name,
                "school",
                &row.school_name,
            ));
            return Ok(row_errors);
        }
    }

    // never write once the file is doomed
    if file_has_errors {
        return Ok(row_errors);
    }

    let school_id = match existing_school_id {
        Some(id) => id,
        None => {
            schools::ActiveModel::new(row.school_name.clone(), shortcode, organization.id)
                .insert(txn)
                .await?
                .id
        }
    };

    school_programs::ActiveModel {
        school_id: Set(school_id),
        program_id: Set(program.id),
    }
    .insert(txn)
    .await?;

    Ok(row_errors)
}
