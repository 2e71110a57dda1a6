//! Shared test utilities for `BudgetFlow`.
//!
//! This module provides common helper functions for setting up test
//! databases and building test entities with sensible defaults. The
//! `make_*` builders return plain models without touching a database,
//! which is what the pure aggregation tests need.

#![allow(clippy::unwrap_used)]

use crate::entities::{category, expense, funder};
use crate::errors::Result;
use crate::store::Store;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a [`Store`] over a fresh in-memory database.
pub async fn setup_store() -> Result<Store> {
    let db = setup_test_db().await?;
    Store::new(db).await
}

/// Sets up a database with one category already created.
/// Returns (db, category) for common expense-test scenarios.
pub async fn setup_with_category() -> Result<(DatabaseConnection, category::Model)> {
    let db = setup_test_db().await?;
    let category =
        crate::store::categories::create_category(&db, "Food".to_string(), None).await?;
    Ok((db, category))
}

/// Parses an RFC 3339 timestamp for fixture data.
pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

/// Builds a category model without persisting it.
pub fn make_category(id: &str, name: &str) -> category::Model {
    category::Model {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: None,
        updated_at: None,
    }
}

/// Builds a funder model without persisting it.
pub fn make_funder(id: &str, name: &str) -> funder::Model {
    funder::Model {
        id: id.to_string(),
        name: name.to_string(),
        phone: None,
        email: None,
        created_at: None,
        updated_at: None,
    }
}

/// Builds an expense model without persisting it.
///
/// # Defaults
/// * `title`: `"Expense <id>"`
/// * `category_id`: `"cat-1"`
/// * `funder_id`: None
/// * `created_at`: None
///
/// Use struct-update syntax to override fields:
/// `expense::Model { funder_id: Some("f1".into()), ..make_expense("e1", 10.0, "Pending") }`
pub fn make_expense(id: &str, amount: f64, status: &str) -> expense::Model {
    expense::Model {
        id: id.to_string(),
        title: format!("Expense {id}"),
        amount,
        category_id: "cat-1".to_string(),
        funder_id: None,
        status: status.to_string(),
        notes: None,
        created_at: None,
        updated_at: None,
    }
}
