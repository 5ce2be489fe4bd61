use async_graphql::{Context, Object, Result, SimpleObject, Upload};

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ToGraphQLError;
use crate::graphql::types::CsvUploadResult;

#[derive(SimpleObject)]
pub struct RenameDuplicatesResult {
    pub renamed: i32,
}

pub struct Mutation;

#[Object]
impl Mutation {
    /// Bulk-create subjects from a CSV file. All-or-nothing per file: any
    /// row error rolls back the whole upload and the full error list is
    /// returned.
    async fn upload_subjects_from_csv(
        &self,
        ctx: &Context<'_>,
        file: Upload,
    ) -> Result<CsvUploadResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let upload = file.value(ctx)?;
        let outcome = context
            .csv_import_service
            .import_subjects(upload.into_read())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(outcome.into())
    }

    /// Bulk-create programs from a CSV file
    async fn upload_programs_from_csv(
        &self,
        ctx: &Context<'_>,
        file: Upload,
    ) -> Result<CsvUploadResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let upload = file.value(ctx)?;
        let outcome = context
            .csv_import_service
            .import_programs(upload.into_read())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(outcome.into())
    }

    /// Bulk-create schools from a CSV file
    async fn upload_schools_from_csv(
        &self,
        ctx: &Context<'_>,
        file: Upload,
    ) -> Result<CsvUploadResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let upload = file.value(ctx)?;
        let outcome = context
            .csv_import_service
            .import_schools(upload.into_read())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(outcome.into())
    }

    /// Rename colliding non-system entity names within each organization.
    /// Idempotent maintenance operation; returns how many rows changed.
    async fn rename_duplicate_entities(&self, ctx: &Context<'_>) -> Result<RenameDuplicatesResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let report = context.dedupe_service.rename_duplicates().await?;

        Ok(RenameDuplicatesResult {
            renamed: report.total() as i32,
        })
    }
}
