use std::collections::BTreeMap;

use sea_orm::sea_query::{Alias, CaseStatement, Expr, Order, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use uuid::Uuid;

/// Marker appended to colliding names so tenants notice and fix them.
pub const RENAME_SUFFIX: &str = " [Please change name]";

/// A table that participates in duplicate-name cleanup.
struct DedupeTarget {
    entity: &'static str,
    table: &'static str,
    /// built-in rows are never renamed
    has_system: bool,
    /// duplicates are scoped per organization when the table has one
    has_organization: bool,
}

const TARGETS: &[DedupeTarget] = &[
    DedupeTarget {
        entity: "organization",
        table: "organizations",
        has_system: false,
        has_organization: false,
    },
    DedupeTarget {
        entity: "grade",
        table: "grades",
        has_system: true,
        has_organization: true,
    },
    DedupeTarget {
        entity: "subject",
        table: "subjects",
        has_system: true,
        has_organization: true,
    },
    DedupeTarget {
        entity: "category",
        table: "categories",
        has_system: true,
        has_organization: true,
    },
    DedupeTarget {
        entity: "subcategory",
        table: "subcategories",
        has_system: true,
        has_organization: true,
    },
    DedupeTarget {
        entity: "program",
        table: "programs",
        has_system: true,
        has_organization: true,
    },
    DedupeTarget {
        entity: "school",
        table: "schools",
        has_system: false,
        has_organization: true,
    },
];

#[derive(Debug, Default)]
pub struct RenameReport {
    pub renamed: BTreeMap<&'static str, usize>,
}

impl RenameReport {
    pub fn total(&self) -> usize {
        self.renamed.values().sum()
    }
}

/// Detects and deterministically renames colliding non-system names within
/// each organization scope.
#[derive(Clone)]
pub struct DedupeService {
    db: DatabaseConnection,
}

impl DedupeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rename duplicates across every participating table.
    ///
    /// The read-group-then-write sequence runs in one transaction so a
    /// concurrent insert of the same name cannot slip between the scan and
    /// the update. Idempotent: a second run finds nothing to rename.
    pub async fn rename_duplicates(&self) -> Result<RenameReport, DbErr> {
        let txn = self.db.begin().await?;
        let mut report = RenameReport::default();

        for target in TARGETS {
            let renamed = rename_target(&txn, target).await?;
            if renamed > 0 {
                tracing::info!(entity = target.entity, renamed, "renamed duplicate rows");
            }
            report.renamed.insert(target.entity, renamed);
        }

        txn.commit().await?;
        Ok(report)
    }
}

async fn rename_target(txn: &DatabaseTransaction, target: &DedupeTarget) -> Result<usize, DbErr> {
    let backend = txn.get_database_backend();

    // scan candidate rows ordered so "first occurrence kept" is stable
    // across runs
    let mut select = Query::select();
    select
        .column(Alias::new("id"))
        .column(Alias::new("name"))
        .from(Alias::new(target.table))
        .order_by(Alias::new("created_at"), Order::Asc)
        .order_by(Alias::new("id"), Order::Asc);
    if target.has_organization {
        select.column(Alias::new("organization_id"));
    }
    if target.has_system {
        select.and_where(Expr::col(Alias::new("system")).eq(false));
    }

    let rows = txn.query_all(backend.build(&select)).await?;

    let mut groups: BTreeMap<(String, Option<Uuid>), Vec<Uuid>> = BTreeMap::new();
    for row in rows {
        let id: Uuid = row.try_get("", "id")?;
        let name: String = row.try_get("", "name")?;
        let organization_id: Option<Uuid> = if target.has_organization {
            row.try_get("", "organization_id")?
        } else {
            None
        };
        groups.entry((name, organization_id)).or_default().push(id);
    }

    // keep the first row of each colliding group; suffix the rest, with a
    // [n] counter from the third duplicate on
    let mut renames: Vec<(Uuid, String)> = Vec::new();
    for ((name, _organization_id), ids) in groups {
        if ids.len() < 2 {
            continue;
        }
        for (position, id) in ids.iter().skip(1).enumerate() {
            let new_name = if position == 0 {
                format!("{}{}", name, RENAME_SUFFIX)
            } else {
                format!("{}{}[{}]", name, RENAME_SUFFIX, position + 1)
            };
            renames.push((*id, new_name));
        }
    }

    if renames.is_empty() {
        return Ok(0);
    }

    // one bulk update: a bound-parameter CASE over the affected ids, never
    // interpolated SQL
    let mut case = CaseStatement::new();
    for (id, new_name) in &renames {
        case = case.case(Expr::col(Alias::new("id")).eq(*id), Expr::val(new_name.clone()));
    }
    let case = case.finally(Expr::col(Alias::new("name")));

    let mut update = Query::update();
    update
        .table(Alias::new(target.table))
        .value(Alias::new("name"), SimpleExpr::Case(Box::new(case)))
        .and_where(Expr::col(Alias::new("id")).is_in(renames.iter().map(|(id, _)| *id)));

    txn.execute(backend.build(&update)).await?;
    Ok(renames.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::{organizations, subjects};
    use crate::database::test_utils::setup_test_db;
    use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

    async fn seed_org(db: &DatabaseConnection, name: &str) -> organizations::Model {
        organizations::ActiveModel::new(name.to_string())
            .insert(db)
            .await
            .unwrap()
    }

    async fn seed_subject(db: &DatabaseConnection, name: &str, org: Uuid) {
        subjects::ActiveModel::new(name.to_string(), Some(org))
            .insert(db)
            .await
            .unwrap();
    }

    async fn subject_names(db: &DatabaseConnection, org: Uuid) -> Vec<String> {
        subjects::Entity::find()
            .filter(subjects::Column::OrganizationId.eq(org))
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[tokio::test]
    async fn renames_collisions_and_keeps_one_original() {
        let db = setup_test_db().await;
        let org = seed_org(&db, "Acme").await;
        for _ in 0..3 {
            seed_subject(&db, "X", org.id).await;
        }

        let report = DedupeService::new(db.clone()).rename_duplicates().await.unwrap();
        assert_eq!(report.renamed.get("subject"), Some(&2));

        let mut names = subject_names(&db, org.id).await;
        names.sort();
        assert_eq!(
            names,
            ["X", "X [Please change name]", "X [Please change name][2]"]
        );
    }

    #[tokio::test]
    async fn second_run_is_a_noop() {
        let db = setup_test_db().await;
        let org = seed_org(&db, "Acme").await;
        for _ in 0..3 {
            seed_subject(&db, "X", org.id).await;
        }

        let service = DedupeService::new(db.clone());
        let first = service.rename_duplicates().await.unwrap();
        assert_eq!(first.total(), 2);

        let names_after_first = {
            let mut names = subject_names(&db, org.id).await;
            names.sort();
            names
        };

        let second = service.rename_duplicates().await.unwrap();
        assert_eq!(second.total(), 0);

        let mut names_after_second = subject_names(&db, org.id).await;
        names_after_second.sort();
        assert_eq!(names_after_first, names_after_second);
    }

    #[tokio::test]
    async fn same_name_in_different_organizations_is_not_a_collision() {
        let db = setup_test_db().await;
        let org_a = seed_org(&db, "A").await;
        let org_b = seed_org(&db, "B").await;
        seed_subject(&db, "Maths", org_a.id).await;
        seed_subject(&db, "Maths", org_b.id).await;

        let report = DedupeService::new(db.clone()).rename_duplicates().await.unwrap();
        assert_eq!(report.renamed.get("subject"), Some(&0));
    }

    #[tokio::test]
    async fn system_rows_are_never_renamed() {
        let db = setup_test_db().await;
        // the seeded system rows collide with nothing, and a tenant row with
        // the same name is scoped to its organization
        let org = seed_org(&db, "Acme").await;
        seed_subject(&db, "None Specified", org.id).await;

        let report = DedupeService::new(db.clone()).rename_duplicates().await.unwrap();
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn duplicate_organizations_are_renamed_globally() {
        let db = setup_test_db().await;
        seed_org(&db, "Twin").await;
        seed_org(&db, "Twin").await;

        let report = DedupeService::new(db.clone()).rename_duplicates().await.unwrap();
        assert_eq!(report.renamed.get("organization"), Some(&1));

        let names: Vec<String> = organizations::Entity::find()
            .all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert!(names.contains(&"Twin".to_string()));
        assert!(names.contains(&"Twin [Please change name]".to_string()));
    }
}
