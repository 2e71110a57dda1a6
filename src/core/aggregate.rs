//! Aggregation engine - derives dashboard figures from record snapshots.
//!
//! All functions here are pure and order-independent: given the same
//! snapshot they produce the same output, so the reconciliation layer can
//! re-invoke them on every change event. Malformed data never fails an
//! aggregation; a non-finite amount counts as zero and an unresolved
//! reference contributes nothing.

use crate::core::status::ExpenseStatus;
use crate::entities::{category, expense, funder};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// How many expenses the dashboard's recent list shows.
pub const RECENT_LIMIT: usize = 5;

/// Headline budget figures across the whole expense collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetOverview {
    /// Sum of every expense amount, regardless of status
    pub total_budget: f64,
    /// Sum of amounts with status `Received`
    pub received_fund: f64,
    /// `total_budget - received_fund`
    pub remaining_fund: f64,
}

/// Count and amount of expenses in one lifecycle stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusBucket {
    /// Number of expenses in this stage
    pub count: usize,
    /// Sum of their amounts
    pub amount: f64,
}

/// One bucket per lifecycle stage. Expenses carrying an unrecognized status
/// string fall into no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusBreakdown {
    /// Expenses with status `Outstanding`
    pub outstanding: StatusBucket,
    /// Expenses with status `Pending`
    pub pending: StatusBucket,
    /// Expenses with status `Received`
    pub received: StatusBucket,
    /// Expenses with status `Spent`
    pub spent: StatusBucket,
}

impl StatusBreakdown {
    /// The bucket for a given status.
    #[must_use]
    pub const fn bucket(&self, status: ExpenseStatus) -> StatusBucket {
        match status {
            ExpenseStatus::Outstanding => self.outstanding,
            ExpenseStatus::Pending => self.pending,
            ExpenseStatus::Received => self.received,
            ExpenseStatus::Spent => self.spent,
        }
    }

    fn bucket_mut(&mut self, status: ExpenseStatus) -> &mut StatusBucket {
        match status {
            ExpenseStatus::Outstanding => &mut self.outstanding,
            ExpenseStatus::Pending => &mut self.pending,
            ExpenseStatus::Received => &mut self.received,
            ExpenseStatus::Spent => &mut self.spent,
        }
    }
}

/// Aggregated amount and count for one category or funder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    /// Id of the category or funder
    pub id: String,
    /// Display name of the category or funder
    pub name: String,
    /// Sum of amounts of the expenses referencing it
    pub total_amount: f64,
    /// Number of expenses referencing it
    pub count: usize,
}

/// Every derived value the dashboard and report consume, bundled so it can
/// be recomputed and swapped as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Headline totals
    pub overview: BudgetOverview,
    /// Per-status buckets
    pub statuses: StatusBreakdown,
    /// Categories with at least one rupee of expenses, largest first
    pub categories: Vec<BreakdownEntry>,
    /// Funders with at least one rupee of expenses, largest first
    pub funders: Vec<BreakdownEntry>,
    /// The [`RECENT_LIMIT`] most recently created expenses
    pub recent: Vec<expense::Model>,
}

impl Aggregates {
    /// Derives the full aggregate set from one snapshot of all three
    /// collections.
    #[must_use]
    pub fn derive(
        categories: &[category::Model],
        funders: &[funder::Model],
        expenses: &[expense::Model],
    ) -> Self {
        Self {
            overview: compute_budget_overview(expenses),
            statuses: compute_status_breakdown(expenses),
            categories: compute_category_breakdown(categories, expenses),
            funders: compute_funder_breakdown(funders, expenses),
            recent: recent_expenses(expenses, RECENT_LIMIT),
        }
    }
}

/// An amount usable for summation. Non-finite values (the stored column is a
/// raw REAL, so legacy rows can hold anything) count as zero so a single bad
/// record cannot poison the dashboard.
fn sanitized_amount(expense: &expense::Model) -> f64 {
    if expense.amount.is_finite() {
        expense.amount
    } else {
        0.0
    }
}

/// Computes the headline budget figures.
///
/// `total_budget` sums every expense unconditionally. `received_fund` sums
/// only expenses whose status is `Received`; amounts already `Spent` are
/// deliberately not counted as received.
#[must_use]
pub fn compute_budget_overview(expenses: &[expense::Model]) -> BudgetOverview {
    let mut total_budget = 0.0;
    let mut received_fund = 0.0;

    for expense in expenses {
        let amount = sanitized_amount(expense);
        total_budget += amount;
        if ExpenseStatus::parse(&expense.status) == Some(ExpenseStatus::Received) {
            received_fund += amount;
        }
    }

    BudgetOverview {
        total_budget,
        received_fund,
        remaining_fund: total_budget - received_fund,
    }
}

/// Buckets the expense collection by lifecycle stage in one linear pass.
/// Expenses with an unrecognized status contribute to no bucket.
#[must_use]
pub fn compute_status_breakdown(expenses: &[expense::Model]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();

    for expense in expenses {
        if let Some(status) = ExpenseStatus::parse(&expense.status) {
            let bucket = breakdown.bucket_mut(status);
            bucket.count += 1;
            bucket.amount += sanitized_amount(expense);
        }
    }

    breakdown
}

/// Computes per-category totals over the expense snapshot.
///
/// Entries with no matching expenses are dropped, and the rest are sorted
/// descending by total; the sort is stable, so ties keep the input
/// (alphabetical) category order. Expenses referencing an id outside the
/// category snapshot are skipped here but still count toward the overview
/// and status buckets.
#[must_use]
pub fn compute_category_breakdown(
    categories: &[category::Model],
    expenses: &[expense::Model],
) -> Vec<BreakdownEntry> {
    let index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(position, category)| (category.id.as_str(), position))
        .collect();

    let mut entries: Vec<BreakdownEntry> = categories
        .iter()
        .map(|category| BreakdownEntry {
            id: category.id.clone(),
            name: category.name.clone(),
            total_amount: 0.0,
            count: 0,
        })
        .collect();

    for expense in expenses {
        if let Some(&position) = index.get(expense.category_id.as_str()) {
            entries[position].total_amount += sanitized_amount(expense);
            entries[position].count += 1;
        }
    }

    entries.retain(|entry| entry.total_amount > 0.0);
    entries.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// Computes per-funder totals over the expense snapshot. Same shape and
/// rules as [`compute_category_breakdown`]; expenses without a funder (or
/// with a dangling funder id) contribute to no entry.
#[must_use]
pub fn compute_funder_breakdown(
    funders: &[funder::Model],
    expenses: &[expense::Model],
) -> Vec<BreakdownEntry> {
    let index: HashMap<&str, usize> = funders
        .iter()
        .enumerate()
        .map(|(position, funder)| (funder.id.as_str(), position))
        .collect();

    let mut entries: Vec<BreakdownEntry> = funders
        .iter()
        .map(|funder| BreakdownEntry {
            id: funder.id.clone(),
            name: funder.name.clone(),
            total_amount: 0.0,
            count: 0,
        })
        .collect();

    for expense in expenses {
        if let Some(&position) = expense
            .funder_id
            .as_deref()
            .and_then(|id| index.get(id))
        {
            entries[position].total_amount += sanitized_amount(expense);
            entries[position].count += 1;
        }
    }

    entries.retain(|entry| entry.total_amount > 0.0);
    entries.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// The `limit` most recently created expenses, newest first.
///
/// Rows with no `created_at` (legacy imports) sort as oldest. The sort is
/// stable, so expenses sharing a timestamp keep their snapshot order.
#[must_use]
pub fn recent_expenses(expenses: &[expense::Model], limit: usize) -> Vec<expense::Model> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}
