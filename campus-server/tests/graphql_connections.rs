use std::sync::Arc;

use sea_orm::{ActiveModelTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use campus::database::entities::common_types::AgeRangeUnit;
use campus::database::entities::{age_ranges, organizations, subjects};
use campus::database::migrations::Migrator;
use campus::permissions::AllowAll;
use campus_server::graphql::{build_schema, AppSchema, GraphQLContext};

async fn setup() -> (DatabaseConnection, AppSchema) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test database");
    Migrator::up(&db, None).await.expect("run migrations");

    let schema = build_schema(GraphQLContext::new(db.clone(), Arc::new(AllowAll)));
    (db, schema)
}

async fn seed_org(db: &DatabaseConnection) -> organizations::Model {
    organizations::ActiveModel::new("Acme".to_string())
        .insert(db)
        .await
        .unwrap()
}

async fn seed_subjects(db: &DatabaseConnection, org: &organizations::Model, names: &[&str]) {
    for name in names {
        subjects::ActiveModel::new((*name).to_string(), Some(org.id))
            .insert(db)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn subjects_connection_pages_in_sort_order() {
    let (db, schema) = setup().await;
    let org = seed_org(&db).await;
    seed_subjects(&db, &org, &["Art", "Biology", "Chemistry"]).await;

    let response = schema
        .execute(
            r#"{
                subjectsConnection(
                    direction: FORWARD,
                    directionArgs: { count: 2 },
                    filter: { system: { operator: EQ, value: false } },
                    sort: { field: NAME, order: ASC }
                ) {
                    totalCount
                    pageInfo { hasNextPage hasPreviousPage endCursor }
                    edges { cursor node { name } }
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let connection = &data["subjectsConnection"];
    assert_eq!(connection["totalCount"], 3);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], false);
    assert_eq!(connection["edges"][0]["node"]["name"], "Art");
    assert_eq!(connection["edges"][1]["node"]["name"], "Biology");

    // resume from the end cursor: exactly the remaining row comes back
    let end_cursor = connection["pageInfo"]["endCursor"].as_str().unwrap();
    let response = schema
        .execute(format!(
            r#"{{
                subjectsConnection(
                    direction: FORWARD,
                    directionArgs: {{ count: 2, cursor: "{end_cursor}" }},
                    filter: {{ system: {{ operator: EQ, value: false }} }},
                    sort: {{ field: NAME, order: ASC }}
                ) {{
                    pageInfo {{ hasNextPage hasPreviousPage }}
                    edges {{ node {{ name }} }}
                }}
            }}"#
        ))
        .await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let connection = &data["subjectsConnection"];
    assert_eq!(connection["edges"].as_array().unwrap().len(), 1);
    assert_eq!(connection["edges"][0]["node"]["name"], "Chemistry");
    assert_eq!(connection["pageInfo"]["hasNextPage"], false);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], true);
}

#[tokio::test]
async fn page_size_is_rejected_at_schema_validation() {
    let (_db, schema) = setup().await;

    let response = schema
        .execute(
            r#"{
                subjectsConnection(direction: FORWARD, directionArgs: { count: 0 }) {
                    edges { node { name } }
                }
            }"#,
        )
        .await;

    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("PageSize"));
}

#[tokio::test]
async fn malformed_cursor_is_a_request_error_not_a_crash() {
    let (_db, schema) = setup().await;

    let response = schema
        .execute(
            r#"{
                subjectsConnection(
                    direction: FORWARD,
                    directionArgs: { count: 5, cursor: "garbage" }
                ) {
                    edges { node { name } }
                }
            }"#,
        )
        .await;

    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("cursor"));
}

#[tokio::test]
async fn contains_filter_with_empty_string_matches_everything() {
    let (db, schema) = setup().await;
    let org = seed_org(&db).await;
    seed_subjects(&db, &org, &["Art", "Biology"]).await;

    let query = |needle: &str| {
        format!(
            r#"{{
                subjectsConnection(
                    direction: FORWARD,
                    filter: {{
                        system: {{ operator: EQ, value: false }},
                        name: {{ operator: CONTAINS, value: "{needle}" }}
                    }}
                ) {{
                    totalCount
                    edges {{ node {{ name }} }}
                }}
            }}"#
        )
    };

    let unfiltered = schema.execute(query("")).await;
    assert!(unfiltered.errors.is_empty(), "errors: {:?}", unfiltered.errors);
    let data = unfiltered.data.into_json().unwrap();
    assert_eq!(data["subjectsConnection"]["totalCount"], 2);

    let filtered = schema.execute(query("Bio")).await;
    let data = filtered.data.into_json().unwrap();
    assert_eq!(data["subjectsConnection"]["totalCount"], 1);
}

#[tokio::test]
async fn overlong_contains_filter_fails() {
    let (_db, schema) = setup().await;
    let needle = "x".repeat(251);

    let response = schema
        .execute(format!(
            r#"{{
                subjectsConnection(
                    direction: FORWARD,
                    filter: {{ name: {{ operator: CONTAINS, value: "{needle}" }} }}
                ) {{
                    edges {{ node {{ name }} }}
                }}
            }}"#
        ))
        .await;

    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("250"));
}

#[tokio::test]
async fn age_range_bound_is_compared_as_a_tuple() {
    let (db, schema) = setup().await;
    let org = seed_org(&db).await;

    for (low, high, unit) in [
        (4, 6, AgeRangeUnit::Year),
        (12, 18, AgeRangeUnit::Month),
        (24, 36, AgeRangeUnit::Month),
    ] {
        age_ranges::ActiveModel::new(low, high, unit, Some(org.id))
            .insert(&db)
            .await
            .unwrap();
    }

    // (4, year) sorts below (12, month) because the value column is
    // compared first; only the two month-denominated rows qualify
    let response = schema
        .execute(
            r#"{
                ageRangesConnection(
                    direction: FORWARD,
                    filter: {
                        system: { operator: EQ, value: false },
                        ageRangeFrom: { operator: GTE, value: { value: 12, unit: MONTH } }
                    },
                    sort: { field: LOW_VALUE, order: ASC }
                ) {
                    totalCount
                    edges { node { lowValue lowValueUnit } }
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let connection = &data["ageRangesConnection"];
    assert_eq!(connection["totalCount"], 2);
    assert_eq!(connection["edges"][0]["node"]["lowValue"], 12);
    assert_eq!(connection["edges"][1]["node"]["lowValue"], 24);
}

#[tokio::test]
async fn total_count_only_runs_when_selected() {
    let (db, schema) = setup().await;
    let org = seed_org(&db).await;
    seed_subjects(&db, &org, &["Art"]).await;

    let response = schema
        .execute(
            r#"{
                subjectsConnection(direction: FORWARD) {
                    edges { node { name } }
                }
            }"#,
        )
        .await;

    // no totalCount selected: the resolver skips the COUNT query and the
    // field is simply absent from the response
    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["subjectsConnection"].get("totalCount").is_none());
}
