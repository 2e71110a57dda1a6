//! Budget summary entity - A legacy singleton cache of headline figures.
//!
//! The dashboard derives its numbers from the expense collection on the fly;
//! this row is kept for compatibility with older clients that still read it.
//! It is never consulted by the aggregation code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed primary key of the single summary row.
pub const SUMMARY_ID: &str = "summary";

/// Budget summary database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_summary")]
pub struct Model {
    /// Always [`SUMMARY_ID`]; there is exactly one row
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Cached sum of all expense amounts
    pub total_budget: f64,
    /// Cached sum of received amounts
    pub received_fund: f64,
    /// Unused legacy field, kept for schema compatibility
    pub people_over_fund: f64,
    /// Cached `total_budget - received_fund`
    pub remaining_fund: f64,
    /// When the cache row was last overwritten
    pub updated_at: Option<DateTimeUtc>,
}

/// The summary row stands alone and declares no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
