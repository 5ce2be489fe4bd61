use std::str::FromStr;

use sea_orm::sea_query::{ColumnType, Condition};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Value,
};
use uuid::Uuid;

use crate::errors::PaginationError;
use crate::pagination::cursor::Cursor;

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Caller-requested sort: a logical field name plus direction.
#[derive(Clone, Debug)]
pub struct SortInput {
    pub field: String,
    pub order: SortOrder,
}

/// Per-connection sort configuration.
///
/// `aliases` is the allow list of sortable fields mapped to physical
/// columns. The primary key is appended to every ordering as a tiebreaker:
/// without it, rows sharing a sort value could be skipped or repeated
/// between pages.
#[derive(Clone, Debug)]
pub struct SortSpec<'a> {
    pub primary_key: &'a str,
    pub aliases: &'a [(&'a str, &'a str)],
    pub sort: Option<SortInput>,
}

#[derive(Clone, Debug, Default)]
pub struct PaginationArgs {
    pub direction: Direction,
    pub count: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Edge<M> {
    pub cursor: String,
    pub node: M,
}

#[derive(Clone, Debug)]
pub struct ConnectionPage<M> {
    pub total_count: Option<u64>,
    pub page_info: PageInfo,
    pub edges: Vec<Edge<M>>,
}

/// Seek-paginate a select.
///
/// Fetches `count + 1` rows beyond the cursor position and trims the probe
/// row, so `has_next_page`/`has_previous_page` reflect actual row existence
/// rather than being derived from a total count. The COUNT query only runs
/// when `include_total_count` is set.
pub async fn paginate<E, C>(
    db: &C,
    scope: Select<E>,
    sort: &SortSpec<'_>,
    args: PaginationArgs,
    include_total_count: bool,
) -> Result<ConnectionPage<E::Model>, PaginationError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: FromStr,
    C: ConnectionTrait,
{
    let page_size = args.count.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(PaginationError::InvalidPageSize { max: MAX_PAGE_SIZE });
    }

    let (sort_column, order) = match &sort.sort {
        Some(input) => {
            let column = sort
                .aliases
                .iter()
                .find(|(field, _)| *field == input.field.as_str())
                .map(|(_, column)| *column)
                .ok_or_else(|| PaginationError::InvalidSortField(input.field.clone()))?;
            (Some(column), input.order)
        }
        None => (None, SortOrder::Asc),
    };

    // key tuple: requested sort column (when distinct from the pk) plus the
    // primary key as tiebreak
    let mut key_names: Vec<&str> = Vec::new();
    if let Some(column) = sort_column {
        if column != sort.primary_key {
            key_names.push(column);
        }
    }
    key_names.push(sort.primary_key);

    let mut key_columns: Vec<E::Column> = Vec::with_capacity(key_names.len());
    for name in &key_names {
        let column = E::Column::from_str(name)
            .map_err(|_| PaginationError::InvalidSortField((*name).to_string()))?;
        key_columns.push(column);
    }

    let total_count = if include_total_count {
        Some(scope.clone().count(db).await?)
    } else {
        None
    };

    // BACKWARD walks the same total order from the other end
    let sql_order_asc = matches!(
        (args.direction, order),
        (Direction::Forward, SortOrder::Asc) | (Direction::Backward, SortOrder::Desc)
    );
    let sql_order = if sql_order_asc { Order::Asc } else { Order::Desc };

    let mut query = scope;
    for column in &key_columns {
        query = query.order_by(*column, sql_order.clone());
    }

    if let Some(raw) = &args.cursor {
        let cursor = Cursor::decode(raw)?;
        let mut boundary: Vec<Value> = Vec::with_capacity(key_columns.len());
        for (name, column) in key_names.iter().zip(&key_columns) {
            let json = cursor.get(name).ok_or(PaginationError::InvalidCursor)?;
            boundary.push(json_to_db_value(column.def().get_column_type(), json)?);
        }
        query = query.filter(seek_condition(&key_columns, &boundary, sql_order_asc));
    }

    let mut rows = query.limit(page_size + 1).all(db).await?;
    let has_more = rows.len() as u64 > page_size;
    rows.truncate(page_size as usize);
    if args.direction == Direction::Backward {
        rows.reverse();
    }

    let (has_next_page, has_previous_page) = match args.direction {
        Direction::Forward => (has_more, args.cursor.is_some()),
        Direction::Backward => (args.cursor.is_some(), has_more),
    };

    let mut edges = Vec::with_capacity(rows.len());
    for node in rows {
        let mut cursor = Cursor::new();
        for (name, column) in key_names.iter().zip(&key_columns) {
            cursor = cursor.with(*name, db_value_to_json(node.get(*column)));
        }
        edges.push(Edge {
            cursor: cursor.encode(),
            node,
        });
    }

    let page_info = PageInfo {
        has_next_page,
        has_previous_page,
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    Ok(ConnectionPage {
        total_count,
        page_info,
        edges,
    })
}

/// Rows strictly beyond `boundary` in the effective order, compared as a
/// lexicographic tuple: `(a, b) > (va, vb)` is `a > va OR (a = va AND
/// b > vb)`.
fn seek_condition<Col>(columns: &[Col], boundary: &[Value], asc: bool) -> Condition
where
    Col: ColumnTrait,
{
    let mut cond = Condition::any();
    for i in 0..columns.len() {
        let mut branch = Condition::all();
        for j in 0..i {
            branch = branch.add(columns[j].eq(boundary[j].clone()));
        }
        let strict = if asc {
            columns[i].gt(boundary[i].clone())
        } else {
            columns[i].lt(boundary[i].clone())
        };
        cond = cond.add(branch.add(strict));
    }
    cond
}

fn db_value_to_json(value: Value) -> serde_json::Value {
    use serde_json::json;
    match value {
        Value::Bool(Some(v)) => json!(v),
        Value::TinyInt(Some(v)) => json!(v),
        Value::SmallInt(Some(v)) => json!(v),
        Value::Int(Some(v)) => json!(v),
        Value::BigInt(Some(v)) => json!(v),
        Value::TinyUnsigned(Some(v)) => json!(v),
        Value::SmallUnsigned(Some(v)) => json!(v),
        Value::Unsigned(Some(v)) => json!(v),
        Value::BigUnsigned(Some(v)) => json!(v),
        Value::Float(Some(v)) => json!(v),
        Value::Double(Some(v)) => json!(v),
        Value::String(Some(v)) => json!(*v),
        Value::Uuid(Some(v)) => json!(v.to_string()),
        Value::ChronoDateTimeUtc(Some(v)) => json!(v.to_rfc3339()),
        _ => serde_json::Value::Null,
    }
}

fn json_to_db_value(
    column_type: &ColumnType,
    json: &serde_json::Value,
) -> Result<Value, PaginationError> {
    use serde_json::Value as Json;

    let value = match (column_type, json) {
        (ColumnType::Uuid, Json::String(s)) => {
            Value::from(Uuid::parse_str(s).map_err(|_| PaginationError::InvalidCursor)?)
        }
        (ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text, Json::String(s)) => {
            Value::from(s.clone())
        }
        (
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger,
            Json::Number(n),
        ) => Value::BigInt(Some(n.as_i64().ok_or(PaginationError::InvalidCursor)?)),
        (
            ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned,
            Json::Number(n),
        ) => Value::BigUnsigned(Some(n.as_u64().ok_or(PaginationError::InvalidCursor)?)),
        (ColumnType::Float | ColumnType::Double, Json::Number(n)) => {
            Value::Double(Some(n.as_f64().ok_or(PaginationError::InvalidCursor)?))
        }
        (ColumnType::Boolean, Json::Bool(b)) => Value::from(*b),
        (
            ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone,
            Json::String(s),
        ) => {
            let parsed = chrono::DateTime::parse_from_rfc3339(s)
                .map_err(|_| PaginationError::InvalidCursor)?;
            Value::from(parsed.with_timezone(&chrono::Utc))
        }
        _ => return Err(PaginationError::InvalidCursor),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::{organizations, subjects};
    use crate::database::test_utils::setup_test_db;
    use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter};
    use uuid::Uuid;

    const SORT_ALIASES: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

    fn sort_by_name() -> SortSpec<'static> {
        SortSpec {
            primary_key: "id",
            aliases: SORT_ALIASES,
            sort: Some(SortInput {
                field: "name".to_string(),
                order: SortOrder::Asc,
            }),
        }
    }

    async fn seed_org(db: &DatabaseConnection) -> Uuid {
        let org = organizations::ActiveModel::new("Badanamu".to_string())
            .insert(db)
            .await
            .unwrap();
        org.id
    }

    async fn seed_subjects(db: &DatabaseConnection, org: Uuid, names: &[&str]) {
        for name in names {
            subjects::ActiveModel::new((*name).to_string(), Some(org))
                .insert(db)
                .await
                .unwrap();
        }
    }

    fn tenant_scope(org: Uuid) -> Select<subjects::Entity> {
        subjects::Entity::find().filter(subjects::Column::OrganizationId.eq(org))
    }

    #[tokio::test]
    async fn forward_walk_visits_every_row_once_in_order() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;
        seed_subjects(&db, org, &["Art", "Biology", "Chemistry", "Drama", "English"]).await;

        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = paginate(
                &db,
                tenant_scope(org),
                &sort_by_name(),
                PaginationArgs {
                    direction: Direction::Forward,
                    count: Some(2),
                    cursor: cursor.clone(),
                },
                false,
            )
            .await
            .unwrap();

            assert!(page.edges.len() <= 2);
            for edge in &page.edges {
                seen.push(edge.node.name.clone());
            }
            if !page.page_info.has_next_page {
                break;
            }
            cursor = page.page_info.end_cursor.clone();
        }

        assert_eq!(seen, ["Art", "Biology", "Chemistry", "Drama", "English"]);
    }

    #[tokio::test]
    async fn duplicate_sort_values_page_deterministically() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;
        seed_subjects(&db, org, &["Maths", "Maths", "Maths", "Maths"]).await;

        let walk = |db: DatabaseConnection| async move {
            let mut ids = Vec::new();
            let mut cursor: Option<String> = None;
            loop {
                let page = paginate(
                    &db,
                    tenant_scope(org),
                    &sort_by_name(),
                    PaginationArgs {
                        direction: Direction::Forward,
                        count: Some(1),
                        cursor: cursor.clone(),
                    },
                    false,
                )
                .await
                .unwrap();
                for edge in &page.edges {
                    ids.push(edge.node.id);
                }
                if !page.page_info.has_next_page {
                    break;
                }
                cursor = page.page_info.end_cursor.clone();
            }
            ids
        };

        let first = walk(db.clone()).await;
        let second = walk(db.clone()).await;
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4, "tiebreak must not repeat or skip rows");
    }

    #[tokio::test]
    async fn backward_page_returns_rows_before_cursor_in_sort_order() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;
        seed_subjects(&db, org, &["Art", "Biology", "Chemistry", "Drama"]).await;

        // land on "Chemistry" via a forward walk
        let forward = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs {
                direction: Direction::Forward,
                count: Some(3),
                cursor: None,
            },
            false,
        )
        .await
        .unwrap();
        let chemistry_cursor = forward.edges[2].cursor.clone();

        let page = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs {
                direction: Direction::Backward,
                count: Some(2),
                cursor: Some(chemistry_cursor),
            },
            false,
        )
        .await
        .unwrap();

        let names: Vec<_> = page.edges.iter().map(|e| e.node.name.clone()).collect();
        assert_eq!(names, ["Art", "Biology"]);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
    }

    #[tokio::test]
    async fn total_count_is_skipped_unless_requested() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;
        seed_subjects(&db, org, &["Art", "Biology"]).await;

        let without = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs::default(),
            false,
        )
        .await
        .unwrap();
        assert_eq!(without.total_count, None);

        let with = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs::default(),
            true,
        )
        .await
        .unwrap();
        assert_eq!(with.total_count, Some(2));
    }

    #[tokio::test]
    async fn empty_page_has_no_cursors() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;

        let page = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs::default(),
            true,
        )
        .await
        .unwrap();

        assert!(page.edges.is_empty());
        assert_eq!(page.page_info.start_cursor, None);
        assert_eq!(page.page_info.end_cursor, None);
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn rejects_out_of_range_page_sizes() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;

        for bad in [0, MAX_PAGE_SIZE + 1] {
            let err = paginate(
                &db,
                tenant_scope(org),
                &sort_by_name(),
                PaginationArgs {
                    direction: Direction::Forward,
                    count: Some(bad),
                    cursor: None,
                },
                false,
            )
            .await
            .unwrap_err();
            assert!(matches!(err, PaginationError::InvalidPageSize { .. }));
        }
    }

    #[tokio::test]
    async fn rejects_malformed_cursor() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;

        let err = paginate(
            &db,
            tenant_scope(org),
            &sort_by_name(),
            PaginationArgs {
                direction: Direction::Forward,
                count: Some(5),
                cursor: Some("definitely-not-a-cursor".to_string()),
            },
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PaginationError::InvalidCursor));
    }

    #[tokio::test]
    async fn rejects_unknown_sort_field() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;

        let err = paginate(
            &db,
            tenant_scope(org),
            &SortSpec {
                primary_key: "id",
                aliases: SORT_ALIASES,
                sort: Some(SortInput {
                    field: "shoeSize".to_string(),
                    order: SortOrder::Asc,
                }),
            },
            PaginationArgs::default(),
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PaginationError::InvalidSortField(_)));
    }

    #[tokio::test]
    async fn descending_sort_walks_in_reverse_order() {
        let db = setup_test_db().await;
        let org = seed_org(&db).await;
        seed_subjects(&db, org, &["Art", "Biology", "Chemistry"]).await;

        let page = paginate(
            &db,
            tenant_scope(org),
            &SortSpec {
                primary_key: "id",
                aliases: SORT_ALIASES,
                sort: Some(SortInput {
                    field: "name".to_string(),
                    order: SortOrder::Desc,
                }),
            },
            PaginationArgs {
                direction: Direction::Forward,
                count: Some(2),
                cursor: None,
            },
            false,
        )
        .await
        .unwrap();

        let names: Vec<_> = page.edges.iter().map(|e| e.node.name.clone()).collect();
        assert_eq!(names, ["Chemistry", "Biology"]);
        assert!(page.page_info.has_next_page);
    }
}
