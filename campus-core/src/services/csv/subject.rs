use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set};

use crate::database::entities::common_types::NONE_SPECIFIED;
use crate::database::entities::{subject_categories, subjects};
use crate::permissions::{Permission, PermissionChecker};

use super::error::CsvError;
use super::lookups;
use super::rows::SubjectRow;

/// Validate one subject row and, when both the row and the file so far are
/// clean, persist the subject and its category association.
///
/// Returns the row's errors; the caller threads the file-wide accumulator
/// and decides whether the enclosing transaction commits.
pub(super) async fn process_subject_row(
    txn: &DatabaseTransaction,
    permissions: &dyn PermissionChecker,
    row: &SubjectRow,
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
    if row.subject_name.is_empty() {
        row_errors.push(CsvError::missing_required(
            row_number,
            "subject_name",
            "subject",
            "name",
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
        .allowed(organization.id, Permission::CreateSubjects)
        .await
    {
        row_errors.push(CsvError::unauthorized_upload(
            row_number,
            "organization_name",
            "subject",
            &organization.name,
        ));
        return Ok(row_errors);
    }

    // upsert-by-name within the organization: reuse an existing subject,
    // reject ambiguous names
    let existing = subjects::Entity::find()
        .filter(subjects::Column::Name.eq(row.subject_name.as_str()))
        .filter(subjects::Column::OrganizationId.eq(organization.id))
        .all(txn)
        .await?;

    if existing.len() > 1 {
        row_errors.push(CsvError::multiple_exist_child(
            row_number,
            "subject_name",
            "subject",
            &row.subject_name,
            "organization",
            &organization.name,
        ));
        return Ok(row_errors);
    }
    let existing_subject_id = existing.first().map(|subject| subject.id);

    let category_name = if row.category_name.is_empty() {
        NONE_SPECIFIED
    } else {
        row.category_name.as_str()
    };

    let category = match lookups::find_category(txn, category_name, organization.id).await? {
        Some(category) => category,
        None => {
            row_errors.push(CsvError::none_exist_child(
                row_number,
                "category_name",
                "category",
                category_name,
                "organization",
                &organization.name,
            ));
            return Ok(row_errors);
        }
    };

    if let Some(subject_id) = existing_subject_id {
        let duplicate = subject_categories::Entity::find()
            .filter(subject_categories::Column::SubjectId.eq(subject_id))
            .filter(subject_categories::Column::CategoryId.eq(category.id))
            .one(txn)
            .await?;
        if duplicate.is_some() {
            row_errors.push(CsvError::duplicate_child(
                row_number,
                "category_name",
                "category",
                category_name,
                "subject",
                &row.subject_name,
            ));
            return Ok(row_errors);
        }
    }

    // never write once the file is doomed
    if file_has_errors {
        return Ok(row_errors);
    }

    let subject_id = match existing_subject_id {
        Some(id) => id,
        None => {
            subjects::ActiveModel::new(row.subject_name.clone(), Some(organization.id))
                .insert(txn)
                .await?
                .id
        }
    };

    subject_categories::ActiveModel {
        subject_id: Set(subject_id),
        category_id: Set(category.id),
    }
    .insert(txn)
    .await?;

    Ok(row_errors)
}
