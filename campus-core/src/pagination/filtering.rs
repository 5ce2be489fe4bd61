use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, Condition, Expr, Func, LikeExpr, SimpleExpr};
use uuid::Uuid;

use crate::database::entities::common_types::AgeRangeUnit;
use crate::errors::{FilterError, FilterResult};

/// Free-text `contains` values beyond this length fail the whole operation
/// rather than being truncated.
pub const MAX_CONTAINS_LENGTH: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Contains => "contains",
        };
        write!(f, "{}", s)
    }
}

/// A composite age-range boundary: one logical value spread over a numeric
/// column and a unit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRangeValue {
    pub value: i32,
    pub unit: AgeRangeUnit,
}

impl AgeRangeValue {
    /// Build from a raw unit string, rejecting values outside the enum set.
    pub fn from_parts(value: i32, unit: &str) -> FilterResult<Self> {
        let unit = unit
            .parse::<AgeRangeUnit>()
            .map_err(|_| FilterError::InvalidEnumValue {
                value: unit.to_string(),
                accepted: AgeRangeUnit::accepted_values().to_string(),
            })?;
        Ok(Self { value, unit })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Str(String),
    Bool(bool),
    Uuid(Uuid),
    Date(DateTime<Utc>),
    AgeRange(AgeRangeValue),
}

/// One leaf of a filter expression: operator, value, and an optional
/// case-insensitivity flag (strings only).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub operator: FilterOperator,
    pub value: FilterValue,
    pub case_insensitive: bool,
}

impl FieldFilter {
    pub fn new(operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            operator,
            value,
            case_insensitive: false,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// A declarative filter tree: named field comparisons plus AND/OR branches
/// of nested expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    pub fields: BTreeMap<String, FieldFilter>,
    pub and: Vec<FilterExpression>,
    pub or: Vec<FilterExpression>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, filter: FieldFilter) -> Self {
        self.fields.insert(name.into(), filter);
        self
    }

    pub fn and(mut self, expr: FilterExpression) -> Self {
        self.and.push(expr);
        self
    }

    pub fn or(mut self, expr: FilterExpression) -> Self {
        self.or.push(expr);
        self
    }

    /// True if the field is referenced anywhere in the tree. Resolvers use
    /// this to decide whether a join is needed before filtering.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
            || self.and.iter().any(|f| f.has_field(name))
            || self.or.iter().any(|f| f.has_field(name))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.and.is_empty() && self.or.is_empty()
    }
}

/// Where a logical filter field lives in the schema.
#[derive(Debug, Clone, Copy)]
pub enum ColumnAlias {
    /// One physical column
    Column(&'static str),
    /// Any of several columns may match (combined with OR)
    AnyOf(&'static [&'static str]),
    /// One logical value over two physical columns, compared as a
    /// lexicographic tuple: `first` is most significant, `second` breaks
    /// ties. Used for age-range `(value, unit)` boundaries.
    Pair {
        first: &'static str,
        second: &'static str,
    },
}

/// Allow list mapping filterable field names to their physical columns.
pub type ColumnMap = BTreeMap<&'static str, ColumnAlias>;

/// Compile a filter expression into a query predicate. Pure: no I/O, no
/// side effects; every leaf either produces a condition or fails with a
/// structured error.
pub fn build_condition(filter: &FilterExpression, columns: &ColumnMap) -> FilterResult<Condition> {
    let mut cond = Condition::all();

    for (field, leaf) in &filter.fields {
        let alias = columns
            .get(field.as_str())
            .ok_or_else(|| FilterError::UnknownField(field.clone()))?;
        if let Some(leaf_cond) = field_condition(field, leaf, alias)? {
            cond = cond.add(leaf_cond);
        }
    }

    if !filter.and.is_empty() {
        let mut sub = Condition::all();
        for expr in &filter.and {
            sub = sub.add(build_condition(expr, columns)?);
        }
        cond = cond.add(sub);
    }

    if !filter.or.is_empty() {
        let mut sub = Condition::any();
        for expr in &filter.or {
            sub = sub.add(build_condition(expr, columns)?);
        }
        cond = cond.add(sub);
    }

    Ok(cond)
}

fn field_condition(
    field: &str,
    leaf: &FieldFilter,
    alias: &ColumnAlias,
) -> FilterResult<Option<Condition>> {
    match alias {
        ColumnAlias::Column(col) => {
            Ok(scalar_condition(field, leaf, col)?.map(|expr| Condition::all().add(expr)))
        }
        ColumnAlias::AnyOf(cols) => {
            let mut any = Condition::any();
            let mut matched = false;
            for col in cols.iter() {
                if let Some(expr) = scalar_condition(field, leaf, col)? {
                    any = any.add(expr);
                    matched = true;
                }
            }
            // an empty-contains no-op on every column stays a no-op
            Ok(matched.then_some(any))
        }
        ColumnAlias::Pair { first, second } => {
            let range = match &leaf.value {
                FilterValue::AgeRange(range) => *range,
                _ => {
                    return Err(FilterError::InvalidValue {
                        field: field.to_string(),
                        reason: "paired column alias requires a composite value".to_string(),
                    })
                }
            };
            pair_condition(field, leaf.operator, range, first, second).map(Some)
        }
    }
}

fn scalar_condition(
    field: &str,
    leaf: &FieldFilter,
    col: &str,
) -> FilterResult<Option<SimpleExpr>> {
    let column = || Expr::col(Alias::new(col));
    let invalid_operator = || {
        Err(FilterError::InvalidOperator {
            field: field.to_string(),
            operator: leaf.operator,
        })
    };

    let expr = match (&leaf.value, leaf.operator) {
        (FilterValue::Str(s), FilterOperator::Eq) => {
            if leaf.case_insensitive {
                lowered(col).eq(s.to_lowercase())
            } else {
                column().eq(s.clone())
            }
        }
        (FilterValue::Str(s), FilterOperator::Neq) => {
            if leaf.case_insensitive {
                lowered(col).ne(s.to_lowercase())
            } else {
                column().ne(s.clone())
            }
        }
        (FilterValue::Str(s), FilterOperator::Contains) => {
            // empty needle matches everything: drop the clause entirely
            if s.is_empty() {
                return Ok(None);
            }
            if s.chars().count() > MAX_CONTAINS_LENGTH {
                return Err(FilterError::ValueTooLong {
                    field: field.to_string(),
                    max: MAX_CONTAINS_LENGTH,
                });
            }
            let needle = if leaf.case_insensitive {
                s.to_lowercase()
            } else {
                s.clone()
            };
            let pattern = LikeExpr::new(format!("%{}%", escape_like(&needle))).escape('\\');
            if leaf.case_insensitive {
                lowered(col).like(pattern)
            } else {
                column().like(pattern)
            }
        }
        (FilterValue::Str(_), _) => return invalid_operator(),

        (FilterValue::Bool(b), FilterOperator::Eq) => column().eq(*b),
        (FilterValue::Bool(_), _) => return invalid_operator(),

        (FilterValue::Uuid(u), FilterOperator::Eq) => column().eq(*u),
        (FilterValue::Uuid(u), FilterOperator::Neq) => column().ne(*u),
        (FilterValue::Uuid(u), FilterOperator::Contains) => {
            let pattern =
                LikeExpr::new(format!("%{}%", escape_like(&u.to_string()))).escape('\\');
            Expr::expr(column().cast_as(Alias::new("text"))).like(pattern)
        }
        (FilterValue::Uuid(_), _) => return invalid_operator(),

        (FilterValue::Date(d), FilterOperator::Eq) => column().eq(*d),
        (FilterValue::Date(d), FilterOperator::Neq) => column().ne(*d),
        (FilterValue::Date(d), FilterOperator::Gt) => column().gt(*d),
        (FilterValue::Date(d), FilterOperator::Gte) => column().gte(*d),
        (FilterValue::Date(d), FilterOperator::Lt) => column().lt(*d),
        (FilterValue::Date(d), FilterOperator::Lte) => column().lte(*d),
        (FilterValue::Date(_), _) => return invalid_operator(),

        (FilterValue::AgeRange(_), _) => {
            return Err(FilterError::InvalidValue {
                field: field.to_string(),
                reason: "composite value requires a paired column alias".to_string(),
            })
        }
    };

    Ok(Some(expr))
}

/// Lexicographic tuple comparison over `(first, second)`.
///
/// Ordering operators must not degrade into independent per-column
/// comparisons: `(low_value, unit) >= (12, month)` admits `(12, month)` and
/// `(24, month)` but not `(4, year)`, because the value column is compared
/// first and the unit only breaks ties.
fn pair_condition(
    field: &str,
    operator: FilterOperator,
    range: AgeRangeValue,
    first: &str,
    second: &str,
) -> FilterResult<Condition> {
    let first_col = || Expr::col(Alias::new(first));
    let second_col = || Expr::col(Alias::new(second));
    let value = range.value;
    let unit = range.unit.as_str();

    let cond = match operator {
        FilterOperator::Eq => Condition::all()
            .add(first_col().eq(value))
            .add(second_col().eq(unit)),
        FilterOperator::Neq => Condition::any()
            .add(first_col().ne(value))
            .add(second_col().ne(unit)),
        FilterOperator::Gt => Condition::any().add(first_col().gt(value)).add(
            Condition::all()
                .add(first_col().eq(value))
                .add(second_col().gt(unit)),
        ),
        FilterOperator::Gte => Condition::any().add(first_col().gt(value)).add(
            Condition::all()
                .add(first_col().eq(value))
                .add(second_col().gte(unit)),
        ),
        FilterOperator::Lt => Condition::any().add(first_col().lt(value)).add(
            Condition::all()
                .add(first_col().eq(value))
                .add(second_col().lt(unit)),
        ),
        FilterOperator::Lte => Condition::any().add(first_col().lt(value)).add(
            Condition::all()
                .add(first_col().eq(value))
                .add(second_col().lte(unit)),
        ),
        FilterOperator::Contains => {
            return Err(FilterError::InvalidOperator {
                field: field.to_string(),
                operator,
            })
        }
    };

    Ok(cond)
}

fn lowered(col: &str) -> Expr {
    Expr::expr(Func::lower(Expr::col(Alias::new(col))))
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::subjects;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn subject_columns() -> ColumnMap {
        ColumnMap::from([
            ("name", ColumnAlias::Column("name")),
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
                "classId",
                ColumnAlias::AnyOf(&["studying_class_id", "teaching_class_id"]),
            ),
        ])
    }

    fn to_sql(cond: Condition) -> String {
        subjects::Entity::find()
            .filter(cond)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn eq_builds_simple_comparison() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(FilterOperator::Eq, FilterValue::Str("Maths".to_string())),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("\"name\" = 'Maths'"), "unexpected sql: {sql}");
    }

    #[test]
    fn contains_builds_escaped_like() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(
                FilterOperator::Contains,
                FilterValue::Str("50%_off".to_string()),
            ),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("LIKE '%50\\%\\_off%'"), "unexpected sql: {sql}");
    }

    #[test]
    fn contains_empty_string_is_a_noop() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(FilterOperator::Contains, FilterValue::Str(String::new())),
        );
        let cond = build_condition(&filter, &subject_columns()).unwrap();
        let sql = to_sql(cond);
        assert!(!sql.contains("LIKE"), "noop filter leaked into sql: {sql}");
    }

    #[test]
    fn contains_rejects_overlong_values() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(
                FilterOperator::Contains,
                FilterValue::Str("x".repeat(MAX_CONTAINS_LENGTH + 1)),
            ),
        );
        let err = build_condition(&filter, &subject_columns()).unwrap_err();
        assert!(matches!(err, FilterError::ValueTooLong { max: 250, .. }));
    }

    #[test]
    fn contains_accepts_exactly_250_chars() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(
                FilterOperator::Contains,
                FilterValue::Str("x".repeat(MAX_CONTAINS_LENGTH)),
            ),
        );
        assert!(build_condition(&filter, &subject_columns()).is_ok());
    }

    #[test]
    fn case_insensitive_contains_lowers_both_sides() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(
                FilterOperator::Contains,
                FilterValue::Str("MaThS".to_string()),
            )
            .case_insensitive(),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("LOWER"), "missing LOWER: {sql}");
        assert!(sql.contains("%maths%"), "needle not lowered: {sql}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let filter = FilterExpression::new().with_field(
            "favouriteColour",
            FieldFilter::new(FilterOperator::Eq, FilterValue::Str("red".to_string())),
        );
        let err = build_condition(&filter, &subject_columns()).unwrap_err();
        assert_eq!(err, FilterError::UnknownField("favouriteColour".to_string()));
    }

    #[test]
    fn ordering_operator_on_string_is_rejected() {
        let filter = FilterExpression::new().with_field(
            "name",
            FieldFilter::new(FilterOperator::Gt, FilterValue::Str("M".to_string())),
        );
        let err = build_condition(&filter, &subject_columns()).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidOperator {
                operator: FilterOperator::Gt,
                ..
            }
        ));
    }

    #[test]
    fn bool_only_supports_eq() {
        let filter = FilterExpression::new().with_field(
            "system",
            FieldFilter::new(FilterOperator::Contains, FilterValue::Bool(true)),
        );
        assert!(build_condition(&filter, &subject_columns()).is_err());
    }

    #[test]
    fn pair_gte_is_lexicographic_not_independent() {
        let filter = FilterExpression::new().with_field(
            "ageRangeFrom",
            FieldFilter::new(
                FilterOperator::Gte,
                FilterValue::AgeRange(AgeRangeValue::from_parts(12, "month").unwrap()),
            ),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        // value column strictly greater, OR equal value with unit tie-break
        assert!(sql.contains("\"low_value\" > 12"), "sql: {sql}");
        assert!(
            sql.contains("\"low_value\" = 12") && sql.contains("\"low_value_unit\" >= 'month'"),
            "sql: {sql}"
        );
    }

    #[test]
    fn pair_eq_requires_both_columns() {
        let filter = FilterExpression::new().with_field(
            "ageRangeFrom",
            FieldFilter::new(
                FilterOperator::Eq,
                FilterValue::AgeRange(AgeRangeValue::from_parts(4, "year").unwrap()),
            ),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("\"low_value\" = 4"), "sql: {sql}");
        assert!(sql.contains("\"low_value_unit\" = 'year'"), "sql: {sql}");
    }

    #[test]
    fn pair_rejects_scalar_value() {
        let filter = FilterExpression::new().with_field(
            "ageRangeFrom",
            FieldFilter::new(FilterOperator::Eq, FilterValue::Str("12".to_string())),
        );
        assert!(matches!(
            build_condition(&filter, &subject_columns()).unwrap_err(),
            FilterError::InvalidValue { .. }
        ));
    }

    #[test]
    fn age_range_value_rejects_unknown_unit() {
        let err = AgeRangeValue::from_parts(3, "decade").unwrap_err();
        assert!(matches!(err, FilterError::InvalidEnumValue { .. }));
    }

    #[test]
    fn any_of_alias_matches_either_column() {
        let id = Uuid::new_v4();
        let filter = FilterExpression::new().with_field(
            "classId",
            FieldFilter::new(FilterOperator::Eq, FilterValue::Uuid(id)),
        );
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("studying_class_id"), "sql: {sql}");
        assert!(sql.contains("teaching_class_id"), "sql: {sql}");
        assert!(sql.contains(" OR "), "sql: {sql}");
    }

    #[test]
    fn and_or_branches_recurse() {
        let eq = |name: &str| {
            FilterExpression::new().with_field(
                "name",
                FieldFilter::new(FilterOperator::Eq, FilterValue::Str(name.to_string())),
            )
        };
        let filter = FilterExpression::new().or(eq("Maths")).or(eq("Science"));
        let sql = to_sql(build_condition(&filter, &subject_columns()).unwrap());
        assert!(sql.contains("'Maths'") && sql.contains("'Science'"), "sql: {sql}");
        assert!(sql.contains(" OR "), "sql: {sql}");
    }

    #[test]
    fn has_field_sees_nested_branches() {
        let inner = FilterExpression::new().with_field(
            "system",
            FieldFilter::new(FilterOperator::Eq, FilterValue::Bool(true)),
        );
        let filter = FilterExpression::new().and(inner);
        assert!(filter.has_field("system"));
        assert!(!filter.has_field("name"));
    }
}
