use async_graphql::{Enum, InputObject};
use uuid::Uuid;

use campus::pagination::{
    AgeRangeValue, FieldFilter, FilterExpression, FilterOperator, FilterValue,
};

use super::nodes::{AgeRangeUnitType, StatusType};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum StringOperator {
    Eq,
    Neq,
    Contains,
}

impl From<StringOperator> for FilterOperator {
    fn from(op: StringOperator) -> Self {
        match op {
            StringOperator::Eq => FilterOperator::Eq,
            StringOperator::Neq => FilterOperator::Neq,
            StringOperator::Contains => FilterOperator::Contains,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum EqualityOperator {
    Eq,
    Neq,
}

impl From<EqualityOperator> for FilterOperator {
    fn from(op: EqualityOperator) -> Self {
        match op {
            EqualityOperator::Eq => FilterOperator::Eq,
            EqualityOperator::Neq => FilterOperator::Neq,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum BooleanOperator {
    Eq,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl From<ComparisonOperator> for FilterOperator {
    fn from(op: ComparisonOperator) -> Self {
        match op {
            ComparisonOperator::Eq => FilterOperator::Eq,
            ComparisonOperator::Neq => FilterOperator::Neq,
            ComparisonOperator::Gt => FilterOperator::Gt,
            ComparisonOperator::Gte => FilterOperator::Gte,
            ComparisonOperator::Lt => FilterOperator::Lt,
            ComparisonOperator::Lte => FilterOperator::Lte,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct StringFilter {
    pub operator: StringOperator,
    pub value: String,
    #[graphql(default)]
    pub case_insensitive: bool,
}

impl StringFilter {
    fn to_field(&self) -> FieldFilter {
        FieldFilter {
            operator: self.operator.into(),
            value: FilterValue::Str(self.value.clone()),
            case_insensitive: self.case_insensitive,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct UuidFilter {
    pub operator: EqualityOperator,
    pub value: Uuid,
}

impl UuidFilter {
    fn to_field(&self) -> FieldFilter {
        FieldFilter::new(self.operator.into(), FilterValue::Uuid(self.value))
    }
}

#[derive(InputObject, Clone)]
pub struct BooleanFilter {
    pub operator: BooleanOperator,
    pub value: bool,
}

impl BooleanFilter {
    fn to_field(&self) -> FieldFilter {
        FieldFilter::new(FilterOperator::Eq, FilterValue::Bool(self.value))
    }
}

#[derive(InputObject, Clone)]
pub struct StatusFilter {
    pub operator: EqualityOperator,
    pub value: StatusType,
}

impl StatusFilter {
    fn to_field(&self) -> FieldFilter {
        let status: campus::database::entities::common_types::Status = self.value.into();
        FieldFilter::new(self.operator.into(), FilterValue::Str(status.to_string()))
    }
}

/// A composite age-range boundary value: compared against the value/unit
/// column pair as one lexicographic tuple.
#[derive(InputObject, Clone, Copy)]
pub struct AgeRangeValueInput {
    pub value: i32,
    pub unit: AgeRangeUnitType,
}

#[derive(InputObject, Clone)]
pub struct AgeRangeValueFilter {
    pub operator: ComparisonOperator,
    pub value: AgeRangeValueInput,
}

impl AgeRangeValueFilter {
    fn to_field(&self) -> FieldFilter {
        FieldFilter::new(
            self.operator.into(),
            FilterValue::AgeRange(AgeRangeValue {
                value: self.value.value,
                unit: self.value.unit.into(),
            }),
        )
    }
}

/// Filter input shared by the simple taxonomy connections (grades,
/// subjects, categories, programs).
#[derive(InputObject, Clone, Default)]
pub struct TaxonomyFilter {
    pub name: Option<StringFilter>,
    pub status: Option<StatusFilter>,
    pub system: Option<BooleanFilter>,
    pub organization_id: Option<UuidFilter>,
    #[graphql(name = "AND")]
    pub and: Option<Vec<TaxonomyFilter>>,
    #[graphql(name = "OR")]
    pub or: Option<Vec<TaxonomyFilter>>,
}

impl From<TaxonomyFilter> for FilterExpression {
    fn from(filter: TaxonomyFilter) -> Self {
        let mut expression = FilterExpression::new();
        if let Some(name) = &filter.name {
            expression = expression.with_field("name", name.to_field());
        }
        if let Some(status) = &filter.status {
            expression = expression.with_field("status", status.to_field());
        }
        if let Some(system) = &filter.system {
            expression = expression.with_field("system", system.to_field());
        }
        if let Some(organization_id) = &filter.organization_id {
            expression = expression.with_field("organizationId", organization_id.to_field());
        }
        for branch in filter.and.unwrap_or_default() {
            expression = expression.and(branch.into());
        }
        for branch in filter.or.unwrap_or_default() {
            expression = expression.or(branch.into());
        }
        expression
    }
}

#[derive(InputObject, Clone, Default)]
pub struct AgeRangeFilter {
    pub name: Option<StringFilter>,
    pub status: Option<StatusFilter>,
    pub system: Option<BooleanFilter>,
    pub organization_id: Option<UuidFilter>,
    /// Lower bound of the range, compared as a (value, unit) tuple
    pub age_range_from: Option<AgeRangeValueFilter>,
    /// Upper bound of the range, compared as a (value, unit) tuple
    pub age_range_to: Option<AgeRangeValueFilter>,
    #[graphql(name = "AND")]
    pub and: Option<Vec<AgeRangeFilter>>,
    #[graphql(name = "OR")]
    pub or: Option<Vec<AgeRangeFilter>>,
}

impl From<AgeRangeFilter> for FilterExpression {
    fn from(filter: AgeRangeFilter) -> Self {
        let mut expression = FilterExpression::new();
        if let Some(name) = &filter.name {
            expression = expression.with_field("name", name.to_field());
        }
        if let Some(status) = &filter.status {
            expression = expression.with_field("status", status.to_field());
        }
        if let Some(system) = &filter.system {
            expression = expression.with_field("system", system.to_field());
        }
        if let Some(organization_id) = &filter.organization_id {
            expression = expression.with_field("organizationId", organization_id.to_field());
        }
        if let Some(from) = &filter.age_range_from {
            expression = expression.with_field("ageRangeFrom", from.to_field());
        }
        if let Some(to) = &filter.age_range_to {
            expression = expression.with_field("ageRangeTo", to.to_field());
        }
        for branch in filter.and.unwrap_or_default() {
            expression = expression.and(branch.into());
        }
        for branch in filter.or.unwrap_or_default() {
            expression = expression.or(branch.into());
        }
        expression
    }
}

#[derive(InputObject, Clone, Default)]
pub struct SchoolFilter {
    pub name: Option<StringFilter>,
    pub shortcode: Option<StringFilter>,
    pub status: Option<StatusFilter>,
    pub organization_id: Option<UuidFilter>,
    #[graphql(name = "AND")]
    pub and: Option<Vec<SchoolFilter>>,
    #[graphql(name = "OR")]
    pub or: Option<Vec<SchoolFilter>>,
}

impl From<SchoolFilter> for FilterExpression {
    fn from(filter: SchoolFilter) -> Self {
        let mut expression = FilterExpression::new();
        if let Some(name) = &filter.name {
            expression = expression.with_field("name", name.to_field());
        }
        if let Some(shortcode) = &filter.shortcode {
            expression = expression.with_field("shortcode", shortcode.to_field());
        }
        if let Some(status) = &filter.status {
            expression = expression.with_field("status", status.to_field());
        }
        if let Some(organization_id) = &filter.organization_id {
            expression = expression.with_field("organizationId", organization_id.to_field());
        }
        for branch in filter.and.unwrap_or_default() {
            expression = expression.and(branch.into());
        }
        for branch in filter.or.unwrap_or_default() {
            expression = expression.or(branch.into());
        }
        expression
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum TaxonomySortBy {
    Id,
    Name,
}

#[derive(InputObject, Clone)]
pub struct TaxonomySort {
    pub field: TaxonomySortBy,
    pub order: super::paging::SortOrderInput,
}

impl From<TaxonomySort> for campus::pagination::SortInput {
    fn from(sort: TaxonomySort) -> Self {
        Self {
            field: match sort.field {
                TaxonomySortBy::Id => "id".to_string(),
                TaxonomySortBy::Name => "name".to_string(),
            },
            order: sort.order.into(),
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum AgeRangeSortBy {
    Id,
    Name,
    LowValue,
}

#[derive(InputObject, Clone)]
pub struct AgeRangeSort {
    pub field: AgeRangeSortBy,
    pub order: super::paging::SortOrderInput,
}

impl From<AgeRangeSort> for campus::pagination::SortInput {
    fn from(sort: AgeRangeSort) -> Self {
        Self {
            field: match sort.field {
                AgeRangeSortBy::Id => "id".to_string(),
                AgeRangeSortBy::Name => "name".to_string(),
                AgeRangeSortBy::LowValue => "lowValue".to_string(),
            },
            order: sort.order.into(),
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum SchoolSortBy {
    Id,
    Name,
    Shortcode,
}

#[derive(InputObject, Clone)]
pub struct SchoolSort {
    pub field: SchoolSortBy,
    pub order: super::paging::SortOrderInput,
}

impl From<SchoolSort> for campus::pagination::SortInput {
    fn from(sort: SchoolSort) -> Self {
        Self {
            field: match sort.field {
                SchoolSortBy::Id => "id".to_string(),
                SchoolSortBy::Name => "name".to_string(),
                SchoolSortBy::Shortcode => "shortcode".to_string(),
            },
            order: sort.order.into(),
        }
    }
}
