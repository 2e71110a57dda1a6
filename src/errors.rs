//! Unified error types for `BudgetFlow`.

use thiserror::Error;

/// All errors the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A mutation was rejected before reaching the record store
    #[error("Validation error: {message}")]
    Validation {
        /// Which rule was violated
        message: String,
    },

    /// An expense amount outside the accepted range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// A category id that does not resolve to a stored category
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// The unresolved category id
        id: String,
    },

    /// An expense id that does not resolve to a stored expense
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The unresolved expense id
        id: String,
    },

    /// A funder id that does not resolve to a stored funder
    #[error("Funder not found: {id}")]
    FunderNotFound {
        /// The unresolved funder id
        id: String,
    },

    /// Database error from the `SeaORM` backend
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (report export, config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
