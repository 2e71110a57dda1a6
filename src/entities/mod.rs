//! Entity module - Contains all SeaORM entity definitions for the record store.
//! These entities represent the persisted collections and their fields.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget_summary;
pub mod category;
pub mod expense;
pub mod funder;

// Re-export specific types to avoid conflicts
pub use budget_summary::{
    Column as BudgetSummaryColumn, Entity as BudgetSummary, Model as BudgetSummaryModel,
};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use funder::{Column as FunderColumn, Entity as Funder, Model as FunderModel};
