#![allow(dead_code)]

use lifetime_value_aggregator_migration::Migrator;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Creates a fresh per-test database next to the one `DATABASE_URL` points
/// at and runs all migrations on it.
pub async fn init_db(name: &str) -> Arc<DatabaseConnection> {
    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db_name = format!("lifetime_value_aggregator_test_{name}");

    let conn = Database::connect(&base_url)
        .await
        .expect("Failed to connect to postgres");
    let backend = conn.get_database_backend();
    conn.execute(Statement::from_string(
        backend,
        format!("drop database if exists {db_name}"),
    ))
    .await
    .expect("Failed to drop test database");
    conn.execute(Statement::from_string(
        backend,
        format!("create database {db_name}"),
    ))
    .await
    .expect("Failed to create test database");
    drop(conn);

    let (head, _) = base_url
        .rsplit_once('/')
        .expect("DATABASE_URL must contain a database name");
    let db = Database::connect(format!("{head}/{db_name}"))
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    Arc::new(db)
}
