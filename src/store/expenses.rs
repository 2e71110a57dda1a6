//! Expense store operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! expenses. Mutation input is validated here, before anything reaches the
//! database: titles must be non-empty, amounts positive and within the
//! ceiling, and notes are HTML-stripped and capped. The referenced category
//! must exist at creation time and is never re-validated afterwards, so
//! expenses can outlive their category.

use crate::core::status::ExpenseStatus;
use crate::entities::{Expense, expense};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Largest accepted expense amount.
pub const MAX_AMOUNT: f64 = 10_000_000.0;

/// Longest accepted notes text, in characters, after HTML stripping.
pub const NOTES_MAX_CHARS: usize = 1000;

/// A partial update to an expense. `None` fields are left unchanged; the
/// double-`Option` fields distinguish "unchanged" (`None`) from "cleared"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    /// New title
    pub title: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New category reference
    pub category_id: Option<String>,
    /// New funder reference, or `Some(None)` to clear it
    pub funder_id: Option<Option<String>>,
    /// New lifecycle status
    pub status: Option<ExpenseStatus>,
    /// New notes, or `Some(None)` to clear them
    pub notes: Option<Option<String>>,
}

/// Retrieves expenses ordered by creation time, newest first, optionally
/// filtered to a single category.
pub async fn list_expenses(
    db: &DatabaseConnection,
    category_id: Option<&str>,
) -> Result<Vec<expense::Model>> {
    let mut query = Expense::find();
    if let Some(category_id) = category_id {
        query = query.filter(expense::Column::CategoryId.eq(category_id));
    }
    query
        .order_by_desc(expense::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an expense by its id, returning `None` if it does not exist.
pub async fn get_expense(db: &DatabaseConnection, id: &str) -> Result<Option<expense::Model>> {
    Expense::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a new expense with a store-assigned id and creation timestamp.
///
/// New expenses always start in the `Outstanding` stage. The category must
/// exist at this moment; the funder reference is optional and soft.
pub async fn create_expense(
    db: &DatabaseConnection,
    title: String,
    amount: f64,
    category_id: String,
    funder_id: Option<String>,
    notes: Option<String>,
) -> Result<expense::Model> {
    let title = validate_title(&title)?;
    let amount = validate_amount(amount)?;

    crate::store::categories::get_category(db, &category_id)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            id: category_id.clone(),
        })?;

    let expense = expense::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title: Set(title),
        amount: Set(amount),
        category_id: Set(category_id),
        funder_id: Set(funder_id),
        status: Set(ExpenseStatus::Outstanding.as_str().to_string()),
        notes: Set(sanitize_notes(notes)),
        created_at: Set(Some(chrono::Utc::now())),
        updated_at: Set(None),
    };

    expense.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to an expense. Changed fields go through the
/// same validation as creation; the store assigns `updated_at`. Category
/// and funder references are not existence-checked here, matching the
/// soft-reference model.
pub async fn update_expense(
    db: &DatabaseConnection,
    id: &str,
    changes: ExpenseUpdate,
) -> Result<expense::Model> {
    let existing = get_expense(db, id)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound { id: id.to_string() })?;

    let mut expense: expense::ActiveModel = existing.into();
    if let Some(title) = changes.title {
        expense.title = Set(validate_title(&title)?);
    }
    if let Some(amount) = changes.amount {
        expense.amount = Set(validate_amount(amount)?);
    }
    if let Some(category_id) = changes.category_id {
        expense.category_id = Set(category_id);
    }
    if let Some(funder_id) = changes.funder_id {
        expense.funder_id = Set(funder_id);
    }
    if let Some(status) = changes.status {
        expense.status = Set(status.as_str().to_string());
    }
    if let Some(notes) = changes.notes {
        expense.notes = Set(notes.and_then(|n| sanitize_notes(Some(n))));
    }
    expense.updated_at = Set(Some(chrono::Utc::now()));

    expense.update(db).await.map_err(Into::into)
}

/// Deletes an expense. No other record is touched; deleting an id that no
/// longer exists is a no-op.
pub async fn delete_expense(db: &DatabaseConnection, id: &str) -> Result<()> {
    Expense::delete_by_id(id).exec(db).await?;
    Ok(())
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation {
            message: "Expense title cannot be empty".to_string(),
        });
    }
    Ok(title.to_string())
}

fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Strips HTML tags, trims, and caps notes text. Empty results become
/// `None` so blank notes are not stored.
fn sanitize_notes(notes: Option<String>) -> Option<String> {
    notes.and_then(|raw| {
        let stripped = strip_html(&raw);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.chars().take(NOTES_MAX_CHARS).collect())
        }
    })
}

fn strip_html(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}
