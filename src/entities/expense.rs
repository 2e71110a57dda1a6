//! Expense entity - A single funding line item.
//!
//! Each expense has a title, amount, `category_id`, optional `funder_id`,
//! lifecycle `status`, and optional notes. The `category_id` and `funder_id`
//! references are soft: they are validated at creation time only, so a row
//! may outlive the category or funder it points at.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Opaque store-assigned identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short human-readable title, trimmed and non-empty
    pub title: String,
    /// Expense amount in rupees
    pub amount: f64,
    /// Id of the category this expense belongs to (not re-validated after creation)
    pub category_id: String,
    /// Optional id of the funder supplying the amount
    pub funder_id: Option<String>,
    /// Lifecycle status: `"Outstanding"`, `"Pending"`, `"Received"`, or `"Spent"`.
    /// Stored as plain text; rows carrying other values are excluded from
    /// every status bucket.
    pub status: String,
    /// Optional notes, HTML-stripped and capped at 1000 characters
    pub notes: Option<String>,
    /// When the expense was created (store-assigned; nullable for legacy rows)
    pub created_at: Option<DateTimeUtc>,
    /// When the expense was last modified (store-assigned on update)
    pub updated_at: Option<DateTimeUtc>,
}

/// Category and funder references are soft ids, so no relations are declared
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
