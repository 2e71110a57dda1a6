//! Budget summary cache operations.
//!
//! The summary row is a legacy cache of headline figures kept for older
//! clients. The dashboard never reads it; it can be refreshed from a
//! freshly computed [`BudgetOverview`] after mutations if desired.

use crate::core::aggregate::BudgetOverview;
use crate::entities::{BudgetSummary, budget_summary, budget_summary::SUMMARY_ID};
use crate::errors::Result;
use sea_orm::{Set, prelude::*};

/// Reads the summary row, creating a zeroed default on first access the way
/// the original store did.
pub async fn get_budget_summary(db: &DatabaseConnection) -> Result<budget_summary::Model> {
    if let Some(summary) = BudgetSummary::find_by_id(SUMMARY_ID).one(db).await? {
        return Ok(summary);
    }

    let default_summary = budget_summary::ActiveModel {
        id: Set(SUMMARY_ID.to_string()),
        total_budget: Set(0.0),
        received_fund: Set(0.0),
        people_over_fund: Set(0.0),
        remaining_fund: Set(0.0),
        updated_at: Set(None),
    };
    default_summary.insert(db).await.map_err(Into::into)
}

/// Overwrites the summary row with freshly derived figures.
pub async fn put_budget_summary(
    db: &DatabaseConnection,
    overview: &BudgetOverview,
) -> Result<budget_summary::Model> {
    // Ensure the row exists, then overwrite it
    let existing = get_budget_summary(db).await?;

    let mut summary: budget_summary::ActiveModel = existing.into();
    summary.total_budget = Set(overview.total_budget);
    summary.received_fund = Set(overview.received_fund);
    summary.people_over_fund = Set(0.0);
    summary.remaining_fund = Set(overview.remaining_fund);
    summary.updated_at = Set(Some(chrono::Utc::now()));

    summary.update(db).await.map_err(Into::into)
}
