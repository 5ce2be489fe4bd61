use async_graphql::{Context, Object, Result};
use sea_orm::{EntityTrait, QueryFilter};

use campus::database::entities::{age_ranges, categories, grades, programs, schools, subjects};
use campus::pagination::{
    build_condition, paginate, ColumnAlias, ColumnMap, FilterExpression, SortSpec,
};

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ToGraphQLError;
use crate::graphql::types::{
    pagination_args, AgeRangeFilter, AgeRangeNode, AgeRangeSort, CategoryNode, Connection,
    ConnectionDirection, DirectionArgs, GradeNode, ProgramNode, SchoolFilter, SchoolNode,
    SchoolSort, SubjectNode, TaxonomyFilter, TaxonomySort,
};

const TAXONOMY_SORT_FIELDS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];
const AGE_RANGE_SORT_FIELDS: &[(&str, &str)] =
    &[("id", "id"), ("name", "name"), ("lowValue", "low_value")];
const SCHOOL_SORT_FIELDS: &[(&str, &str)] =
    &[("id", "id"), ("name", "name"), ("shortcode", "shortcode")];

fn taxonomy_columns() -> ColumnMap {
    ColumnMap::from([
        ("name", ColumnAlias::Column("name")),
        ("status", ColumnAlias::Column("status")),
        ("system", ColumnAlias::Column("system")),
        ("organizationId", ColumnAlias::Column("organization_id")),
    ])
}

fn age_range_columns() -> ColumnMap {
    ColumnMap::from([
        ("name", ColumnAlias::Column("name")),
        ("status", ColumnAlias::Column("status")),
        ("system", ColumnAlias::Column("system")),
        ("organizationId", ColumnAlias::Column("organization_id")),
        (
            "ageRangeFrom",
            ColumnAlias::Pair {
                first: "low_value",
                second: "low_value_unit",
            },
        ),
        (
            "ageRangeTo",
            ColumnAlias::Pair {
                first: "high_value",
                second: "high_value_unit",
            },
        ),
    ])
}

fn school_columns() -> ColumnMap {
    ColumnMap::from([
        ("name", ColumnAlias::Column("name")),
        ("shortcode", ColumnAlias::Column("shortcode")),
        ("status", ColumnAlias::Column("status")),
        ("organizationId", ColumnAlias::Column("organization_id")),
    ])
}

pub struct Query;

#[Object]
impl Query {
    /// Paginated age ranges, filterable on composite (value, unit) bounds
    async fn age_ranges_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<AgeRangeFilter>,
        sort: Option<AgeRangeSort>,
    ) -> Result<Connection<AgeRangeNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = age_ranges::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &age_range_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: AGE_RANGE_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, AgeRangeNode::from))
    }

    /// Paginated grades
    async fn grades_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<TaxonomyFilter>,
        sort: Option<TaxonomySort>,
    ) -> Result<Connection<GradeNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = grades::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &taxonomy_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: TAXONOMY_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, GradeNode::from))
    }

    /// Paginated subjects
    async fn subjects_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<TaxonomyFilter>,
        sort: Option<TaxonomySort>,
    ) -> Result<Connection<SubjectNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = subjects::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &taxonomy_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: TAXONOMY_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, SubjectNode::from))
    }

    /// Paginated categories
    async fn categories_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<TaxonomyFilter>,
        sort: Option<TaxonomySort>,
    ) -> Result<Connection<CategoryNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = categories::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &taxonomy_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: TAXONOMY_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, CategoryNode::from))
    }

    /// Paginated programs
    async fn programs_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<TaxonomyFilter>,
        sort: Option<TaxonomySort>,
    ) -> Result<Connection<ProgramNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = programs::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &taxonomy_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: TAXONOMY_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, ProgramNode::from))
    }

    /// Paginated schools
    async fn schools_connection(
        &self,
        ctx: &Context<'_>,
        direction: ConnectionDirection,
        direction_args: Option<DirectionArgs>,
        filter: Option<SchoolFilter>,
        sort: Option<SchoolSort>,
    ) -> Result<Connection<SchoolNode>> {
        let context = ctx.data::<GraphQLContext>()?;
        let include_total_count = ctx.look_ahead().field("totalCount").exists();

        let mut scope = schools::Entity::find();
        if let Some(filter) = filter {
            let expression: FilterExpression = filter.into();
            let condition = build_condition(&expression, &school_columns())
                .map_err(|e| e.to_graphql_error())?;
            scope = scope.filter(condition);
        }

        let page = paginate(
            &context.db,
            scope,
            &SortSpec {
                primary_key: "id",
                aliases: SCHOOL_SORT_FIELDS,
                sort: sort.map(Into::into),
            },
            pagination_args(direction, direction_args),
            include_total_count,
        )
        .await
        .map_err(|e| e.to_graphql_error())?;

        Ok(Connection::from_page(page, SchoolNode::from))
    }
}
