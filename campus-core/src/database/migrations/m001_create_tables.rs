use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create organizations table
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Organizations::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_name")
                    .table(Organizations::Table)
                    .col(Organizations::Name)
                    .to_owned(),
            )
            .await?;

        // Create age_ranges table
        manager
            .create_table(
                Table::create()
                    .table(AgeRanges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AgeRanges::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AgeRanges::Name).string().not_null())
                    .col(ColumnDef::new(AgeRanges::LowValue).integer().not_null())
                    .col(
                        ColumnDef::new(AgeRanges::LowValueUnit)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AgeRanges::HighValue).integer().not_null())
                    .col(
                        ColumnDef::new(AgeRanges::HighValueUnit)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AgeRanges::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(AgeRanges::System)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AgeRanges::OrganizationId).uuid())
                    .col(
                        ColumnDef::new(AgeRanges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AgeRanges::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_age_ranges_organization_id")
                            .from(AgeRanges::Table, AgeRanges::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create the five name/status/system taxonomy tables
        for (table, name_idx, fk_name) in [
            (
                TaxonomyTable::Grades,
                "idx_grades_org_name",
                "fk_grades_organization_id",
            ),
            (
                TaxonomyTable::Subjects,
                "idx_subjects_org_name",
                "fk_subjects_organization_id",
            ),
            (
                TaxonomyTable::Categories,
                "idx_categories_org_name",
                "fk_categories_organization_id",
            ),
            (
                TaxonomyTable::Subcategories,
                "idx_subcategories_org_name",
                "fk_subcategories_organization_id",
            ),
            (
                TaxonomyTable::Programs,
                "idx_programs_org_name",
                "fk_programs_organization_id",
            ),
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Taxonomy::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Taxonomy::Name).string().not_null())
                        .col(
                            ColumnDef::new(Taxonomy::Status)
                                .string_len(16)
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(Taxonomy::System)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Taxonomy::OrganizationId).uuid())
                        .col(
                            ColumnDef::new(Taxonomy::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Taxonomy::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name(fk_name)
                                .from(table, Taxonomy::OrganizationId)
                                .to(Organizations::Table, Organizations::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name(name_idx)
                        .table(table)
                        .col(Taxonomy::OrganizationId)
                        .col(Taxonomy::Name)
                        .to_owned(),
                )
                .await?;
        }

        // Create schools table
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schools::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    .col(ColumnDef::new(Schools::Shortcode).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Schools::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Schools::OrganizationId).uuid().not_null())
                    .col(
                        ColumnDef::new(Schools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schools::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schools_organization_id")
                            .from(Schools::Table, Schools::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schools_org_name")
                    .table(Schools::Table)
                    .col(Schools::OrganizationId)
                    .col(Schools::Name)
                    .to_owned(),
            )
            .await?;

        // Association tables, composite primary keys
        create_join_table(
            manager,
            SubjectCategories::Table,
            SubjectCategories::SubjectId,
            TaxonomyTable::Subjects,
            SubjectCategories::CategoryId,
            TaxonomyTable::Categories,
            ["fk_subject_categories_subject_id", "fk_subject_categories_category_id"],
        )
        .await?;

        create_join_table(
            manager,
            CategorySubcategories::Table,
            CategorySubcategories::CategoryId,
            TaxonomyTable::Categories,
            CategorySubcategories::SubcategoryId,
            TaxonomyTable::Subcategories,
            [
                "fk_category_subcategories_category_id",
                "fk_category_subcategories_subcategory_id",
            ],
        )
        .await?;

        create_join_table(
            manager,
            ProgramAgeRanges::Table,
            ProgramAgeRanges::ProgramId,
            TaxonomyTable::Programs,
            ProgramAgeRanges::AgeRangeId,
            AgeRanges::Table,
            ["fk_program_age_ranges_program_id", "fk_program_age_ranges_age_range_id"],
        )
        .await?;

        create_join_table(
            manager,
            ProgramGrades::Table,
            ProgramGrades::ProgramId,
            TaxonomyTable::Programs,
            ProgramGrades::GradeId,
            TaxonomyTable::Grades,
            ["fk_program_grades_program_id", "fk_program_grades_grade_id"],
        )
        .await?;

        create_join_table(
            manager,
            ProgramSubjects::Table,
            ProgramSubjects::ProgramId,
            TaxonomyTable::Programs,
            ProgramSubjects::SubjectId,
            TaxonomyTable::Subjects,
            ["fk_program_subjects_program_id", "fk_program_subjects_subject_id"],
        )
        .await?;

        create_join_table(
            manager,
            SchoolPrograms::Table,
            SchoolPrograms::SchoolId,
            Schools::Table,
            SchoolPrograms::ProgramId,
            TaxonomyTable::Programs,
            ["fk_school_programs_school_id", "fk_school_programs_program_id"],
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SchoolPrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgramSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgramGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgramAgeRanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CategorySubcategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;
        for table in [
            TaxonomyTable::Programs,
            TaxonomyTable::Subcategories,
            TaxonomyTable::Categories,
            TaxonomyTable::Subjects,
            TaxonomyTable::Grades,
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        manager
            .drop_table(Table::drop().table(AgeRanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
async fn create_join_table<T, A, TA, B, TB>(
    manager: &SchemaManager<'_>,
    table: T,
    left: A,
    left_table: TA,
    right: B,
    right_table: TB,
    fk_names: [&str; 2],
) -> Result<(), DbErr>
where
    T: Iden + Copy + 'static,
    A: Iden + Copy + 'static,
    TA: Iden + Copy + 'static,
    B: Iden + Copy + 'static,
    TB: Iden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(left).uuid().not_null())
                .col(ColumnDef::new(right).uuid().not_null())
                .primary_key(Index::create().col(left).col(right))
                .foreign_key(
                    ForeignKey::create()
                        .name(fk_names[0])
                        .from(table, left)
                        .to(left_table, JoinTarget::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(fk_names[1])
                        .from(table, right)
                        .to(right_table, JoinTarget::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
enum AgeRanges {
    Table,
    Id,
    Name,
    LowValue,
    LowValueUnit,
    HighValue,
    HighValueUnit,
    Status,
    System,
    OrganizationId,
    CreatedAt,
    DeletedAt,
}

// grades, subjects, categories, subcategories and programs share one column
// layout, so a single Iden enum covers their columns
#[derive(Iden, Clone, Copy)]
enum TaxonomyTable {
    Grades,
    Subjects,
    Categories,
    Subcategories,
    Programs,
}

#[derive(Iden)]
enum Taxonomy {
    Id,
    Name,
    Status,
    System,
    OrganizationId,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
enum Schools {
    Table,
    Id,
    Name,
    Shortcode,
    Status,
    OrganizationId,
    CreatedAt,
    DeletedAt,
}

// Join tables reference their parents' "id" column
#[derive(Iden)]
enum JoinTarget {
    Id,
}

#[derive(Iden, Clone, Copy)]
enum SubjectCategories {
    Table,
    SubjectId,
    CategoryId,
}

#[derive(Iden, Clone, Copy)]
enum CategorySubcategories {
    Table,
    CategoryId,
    SubcategoryId,
}

#[derive(Iden, Clone, Copy)]
enum ProgramAgeRanges {
    Table,
    ProgramId,
    AgeRangeId,
}

#[derive(Iden, Clone, Copy)]
enum ProgramGrades {
    Table,
    ProgramId,
    GradeId,
}

#[derive(Iden, Clone, Copy)]
enum ProgramSubjects {
    Table,
    ProgramId,
    SubjectId,
}

#[derive(Iden, Clone, Copy)]
enum SchoolPrograms {
    Table,
    SchoolId,
    ProgramId,
}
