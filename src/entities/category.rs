//! Category entity - A user-defined grouping label for expenses.
//!
//! Categories are referenced from expenses by id only. Deleting a category
//! leaves its expenses orphaned rather than cascading, so no SQL-level
//! relation is declared.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Opaque store-assigned identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name of the category (e.g., "Food", "Decorations")
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the category was created (store-assigned)
    pub created_at: Option<DateTimeUtc>,
    /// When the category was last modified (store-assigned)
    pub updated_at: Option<DateTimeUtc>,
}

/// Categories are referenced by soft id only and declare no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
