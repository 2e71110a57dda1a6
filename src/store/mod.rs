//! Record store - the persistence boundary of the application.
//!
//! Each collection has its own module of CRUD functions over a
//! `DatabaseConnection`. The [`Store`] wraps those functions and adds the
//! change-notification contract the live layer depends on: after every
//! successful mutation the full collection is re-read and broadcast on a
//! `tokio::sync::watch` channel, so subscribers always receive whole
//! snapshots rather than diffs. If the re-read fails, the error is logged
//! and the previous snapshot stays in place.

/// Legacy budget summary cache row
pub mod budget;
/// Category collection operations
pub mod categories;
/// Expense collection operations
pub mod expenses;
/// Funder collection operations
pub mod funders;

pub use expenses::ExpenseUpdate;

use crate::config::settings::CategorySeed;
use crate::core::aggregate::BudgetOverview;
use crate::entities::{budget_summary, category, expense, funder};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use tokio::sync::watch;
use tracing::{error, warn};

/// The record store: a database connection plus one whole-snapshot watch
/// channel per collection.
pub struct Store {
    db: DatabaseConnection,
    categories_tx: watch::Sender<Vec<category::Model>>,
    expenses_tx: watch::Sender<Vec<expense::Model>>,
    funders_tx: watch::Sender<Vec<funder::Model>>,
}

impl Store {
    /// Wraps an initialized database connection, priming each watch channel
    /// with the collection's current contents.
    pub async fn new(db: DatabaseConnection) -> Result<Self> {
        let categories = categories::list_categories(&db).await?;
        let expenses = expenses::list_expenses(&db, None).await?;
        let funders = funders::list_funders(&db).await?;

        let (categories_tx, _) = watch::channel(categories);
        let (expenses_tx, _) = watch::channel(expenses);
        let (funders_tx, _) = watch::channel(funders);

        Ok(Self {
            db,
            categories_tx,
            expenses_tx,
            funders_tx,
        })
    }

    /// The underlying database connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Subscribes to whole-snapshot category change notifications.
    #[must_use]
    pub fn watch_categories(&self) -> watch::Receiver<Vec<category::Model>> {
        self.categories_tx.subscribe()
    }

    /// Subscribes to whole-snapshot expense change notifications.
    #[must_use]
    pub fn watch_expenses(&self) -> watch::Receiver<Vec<expense::Model>> {
        self.expenses_tx.subscribe()
    }

    /// Subscribes to whole-snapshot funder change notifications.
    #[must_use]
    pub fn watch_funders(&self) -> watch::Receiver<Vec<funder::Model>> {
        self.funders_tx.subscribe()
    }

    // --- categories ---

    /// Lists all categories, ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        categories::list_categories(&self.db).await
    }

    /// Fetches one category by id.
    pub async fn get_category(&self, id: &str) -> Result<Option<category::Model>> {
        categories::get_category(&self.db, id).await
    }

    /// Creates a category and broadcasts the new category snapshot.
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<category::Model> {
        let created = categories::create_category(&self.db, name, description).await?;
        self.refresh_categories().await;
        Ok(created)
    }

    /// Updates a category and broadcasts the new category snapshot.
    pub async fn update_category(
        &self,
        id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<category::Model> {
        let updated = categories::update_category(&self.db, id, name, description).await?;
        self.refresh_categories().await;
        Ok(updated)
    }

    /// Deletes a category (expenses are orphaned, not cascaded) and
    /// broadcasts the new category snapshot.
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        categories::delete_category(&self.db, id).await?;
        self.refresh_categories().await;
        Ok(())
    }

    // --- expenses ---

    /// Lists expenses newest first, optionally filtered by category.
    pub async fn list_expenses(&self, category_id: Option<&str>) -> Result<Vec<expense::Model>> {
        expenses::list_expenses(&self.db, category_id).await
    }

    /// Fetches one expense by id.
    pub async fn get_expense(&self, id: &str) -> Result<Option<expense::Model>> {
        expenses::get_expense(&self.db, id).await
    }

    /// Creates an expense and broadcasts the new expense snapshot.
    pub async fn create_expense(
        &self,
        title: String,
        amount: f64,
        category_id: String,
        funder_id: Option<String>,
        notes: Option<String>,
    ) -> Result<expense::Model> {
        let created =
            expenses::create_expense(&self.db, title, amount, category_id, funder_id, notes)
                .await?;
        self.refresh_expenses().await;
        Ok(created)
    }

    /// Applies a partial update and broadcasts the new expense snapshot.
    pub async fn update_expense(
        &self,
        id: &str,
        changes: ExpenseUpdate,
    ) -> Result<expense::Model> {
        let updated = expenses::update_expense(&self.db, id, changes).await?;
        self.refresh_expenses().await;
        Ok(updated)
    }

    /// Deletes an expense and broadcasts the new expense snapshot.
    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        expenses::delete_expense(&self.db, id).await?;
        self.refresh_expenses().await;
        Ok(())
    }

    // --- funders ---

    /// Lists all funders, ordered by name.
    pub async fn list_funders(&self) -> Result<Vec<funder::Model>> {
        funders::list_funders(&self.db).await
    }

    /// Fetches one funder by id.
    pub async fn get_funder(&self, id: &str) -> Result<Option<funder::Model>> {
        funders::get_funder(&self.db, id).await
    }

    /// Creates a funder and broadcasts the new funder snapshot.
    pub async fn create_funder(
        &self,
        name: String,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<funder::Model> {
        let created = funders::create_funder(&self.db, name, phone, email).await?;
        self.refresh_funders().await;
        Ok(created)
    }

    /// Updates a funder and broadcasts the new funder snapshot.
    pub async fn update_funder(
        &self,
        id: &str,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<funder::Model> {
        let updated = funders::update_funder(&self.db, id, name, phone, email).await?;
        self.refresh_funders().await;
        Ok(updated)
    }

    /// Deletes a funder and broadcasts the new funder snapshot.
    pub async fn delete_funder(&self, id: &str) -> Result<()> {
        funders::delete_funder(&self.db, id).await?;
        self.refresh_funders().await;
        Ok(())
    }

    // --- budget summary cache ---

    /// Reads the legacy summary row, creating the zeroed default on first
    /// access.
    pub async fn get_budget_summary(&self) -> Result<budget_summary::Model> {
        budget::get_budget_summary(&self.db).await
    }

    /// Overwrites the legacy summary row with derived figures.
    pub async fn put_budget_summary(
        &self,
        overview: &BudgetOverview,
    ) -> Result<budget_summary::Model> {
        budget::put_budget_summary(&self.db, overview).await
    }

    // --- seeding ---

    /// Creates any configured categories that do not exist yet (matched by
    /// name). Invalid seeds are skipped with a warning rather than aborting
    /// startup. Returns how many categories were created.
    pub async fn seed_categories(&self, seeds: &[CategorySeed]) -> Result<usize> {
        let mut created = 0;
        for seed in seeds {
            if categories::get_category_by_name(&self.db, seed.name.trim())
                .await?
                .is_some()
            {
                continue;
            }
            match categories::create_category(
                &self.db,
                seed.name.clone(),
                seed.description.clone(),
            )
            .await
            {
                Ok(_) => created += 1,
                Err(error) => warn!("Skipping seed category {:?}: {error}", seed.name),
            }
        }
        if created > 0 {
            self.refresh_categories().await;
        }
        Ok(created)
    }

    // Re-read-and-broadcast helpers. A failed re-read must not wipe the
    // last-good snapshot, so errors are logged and nothing is sent.

    async fn refresh_categories(&self) {
        match categories::list_categories(&self.db).await {
            Ok(snapshot) => {
                self.categories_tx.send_replace(snapshot);
            }
            Err(error) => error!("Failed to refresh category snapshot: {error}"),
        }
    }

    async fn refresh_expenses(&self) {
        match expenses::list_expenses(&self.db, None).await {
            Ok(snapshot) => {
                self.expenses_tx.send_replace(snapshot);
            }
            Err(error) => error!("Failed to refresh expense snapshot: {error}"),
        }
    }

    async fn refresh_funders(&self) {
        match funders::list_funders(&self.db).await {
            Ok(snapshot) => {
                self.funders_tx.send_replace(snapshot);
            }
            Err(error) => error!("Failed to refresh funder snapshot: {error}"),
        }
    }
}
