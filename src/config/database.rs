//! Database configuration module for `BudgetFlow`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` so the schema always matches the Rust struct
//! definitions without hand-written SQL.

use crate::entities::{BudgetSummary, Category, Expense, Funder};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the `SQLite` database at the given URL.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// Creates tables for categories, expenses, funders, and the budget summary
/// cache. Safe to run against a database where the tables already exist only
/// on first initialization; callers reuse an existing file by skipping this.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut category_table = schema.create_table_from_entity(Category);
    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut funder_table = schema.create_table_from_entity(Funder);
    let mut budget_table = schema.create_table_from_entity(BudgetSummary);

    db.execute(builder.build(category_table.if_not_exists()))
        .await?;
    db.execute(builder.build(expense_table.if_not_exists()))
        .await?;
    db.execute(builder.build(funder_table.if_not_exists())).await?;
    db.execute(builder.build(budget_table.if_not_exists())).await?;

    Ok(())
}
