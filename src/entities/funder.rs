//! Funder entity - A person or organisation that may supply funds.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Funder database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "funders")]
pub struct Model {
    /// Opaque store-assigned identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Funder display name, trimmed and non-empty
    pub name: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Optional contact email address
    pub email: Option<String>,
    /// When the funder was created (store-assigned)
    pub created_at: Option<DateTimeUtc>,
    /// When the funder was last modified (store-assigned)
    pub updated_at: Option<DateTimeUtc>,
}

/// Funders are referenced by soft id only and declare no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
