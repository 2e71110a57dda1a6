//! Expense lifecycle status.
//!
//! An expense moves through four stages: recorded but unfunded
//! (`Outstanding`), promised by a funder (`Pending`), funds in hand
//! (`Received`), and paid out (`Spent`). No transition order is enforced;
//! the status is a plain tag settable to any of the four values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four lifecycle stages of an expense.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    /// Recorded, no funding arranged yet
    Outstanding,
    /// A funder has committed but funds have not arrived
    Pending,
    /// Funds are in hand
    Received,
    /// Funds have been paid out
    Spent,
}

impl ExpenseStatus {
    /// All statuses in dashboard/report display order.
    pub const ALL: [Self; 4] = [Self::Outstanding, Self::Pending, Self::Received, Self::Spent];

    /// Parses a stored status string, returning `None` for anything outside
    /// the canonical vocabulary. Rows carrying unrecognized values are
    /// excluded from every status bucket rather than failing aggregation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Outstanding" => Some(Self::Outstanding),
            "Pending" => Some(Self::Pending),
            "Received" => Some(Self::Received),
            "Spent" => Some(Self::Spent),
            _ => None,
        }
    }

    /// The canonical string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::Pending => "Pending",
            Self::Received => "Received",
            Self::Spent => "Spent",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
