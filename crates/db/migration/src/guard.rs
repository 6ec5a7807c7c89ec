//! Preconditions for migrations that build on earlier ones.
//!
//! sea-orm-migration applies migrations in list order but never checks that a
//! step's prerequisites are actually recorded, and it lets a repeated
//! `ADD COLUMN` fail with whatever message the backend produces. Dependent
//! migrations call these helpers first so both cases surface as a
//! `DbErr::Migration` naming the migration involved.

use sea_orm_migration::{
    prelude::*,
    sea_orm::{ColumnTrait, EntityTrait, QueryFilter},
    seaql_migrations,
};

/// Name of the table sea-orm-migration records applied versions in.
pub const MIGRATION_TABLE: &str = "seaql_migrations";

/// Fails unless `dependency` is recorded as applied.
///
/// A store without the tracking table has had nothing applied, so that counts
/// as unsatisfied too.
pub async fn ensure_applied(
    manager: &SchemaManager<'_>,
    migration: &str,
    dependency: &str,
) -> Result<(), DbErr> {
    if !manager.has_table(MIGRATION_TABLE).await? {
        return Err(unsatisfied(migration, dependency));
    }

    let record = seaql_migrations::Entity::find()
        .filter(seaql_migrations::Column::Version.eq(dependency))
        .one(manager.get_connection())
        .await?;

    match record {
        Some(_) => Ok(()),
        None => Err(unsatisfied(migration, dependency)),
    }
}

pub async fn ensure_column_absent(
    manager: &SchemaManager<'_>,
    migration: &str,
    table: &str,
    column: &str,
) -> Result<(), DbErr> {
    if manager.has_column(table, column).await? {
        tracing::warn!(migration, table, column, "Column already exists");
        return Err(DbErr::Migration(format!(
            "{migration}: column {table}.{column} already exists"
        )));
    }
    Ok(())
}

pub async fn ensure_column_present(
    manager: &SchemaManager<'_>,
    migration: &str,
    table: &str,
    column: &str,
) -> Result<(), DbErr> {
    if !manager.has_column(table, column).await? {
        return Err(DbErr::Migration(format!(
            "{migration}: column {table}.{column} does not exist"
        )));
    }
    Ok(())
}

fn unsatisfied(migration: &str, dependency: &str) -> DbErr {
    tracing::warn!(migration, dependency, "Migration dependency not applied");
    DbErr::Migration(format!(
        "{migration} depends on {dependency}, which has not been applied"
    ))
}
