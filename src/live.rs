//! Live reconciliation layer - keeps an aggregate dashboard view current.
//!
//! [`LiveDashboard`] subscribes to the store's three whole-snapshot watch
//! channels and re-derives the aggregates on every change. Snapshots are
//! cached per collection so an expense event re-crosses the cached
//! category/funder lists (and vice versa) instead of re-reading the whole
//! store. The exposed view is replaced as a unit under a write lock, so a
//! reader never observes a half-applied recomputation, and the three
//! listener tasks are serialized by that same lock - exactly one
//! reconciliation pass runs at a time.
//!
//! The channels are independent streams with no ordering guarantee. A
//! breakdown may therefore transiently reference a just-deleted category;
//! the derivation functions treat any unresolved reference as contributing
//! zero, so the view stays well-formed until the other snapshot lands.

use crate::core::aggregate::{self, Aggregates, RECENT_LIMIT};
use crate::entities::{category, expense, funder};
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The aggregate view the dashboard and report read. `revision` advances
/// once per applied change, so consumers can cheaply detect staleness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// The derived aggregate set
    pub aggregates: Aggregates,
    /// Bumped every time a snapshot actually changes the view
    pub revision: u64,
}

/// Cached collection snapshots plus the view derived from them.
#[derive(Debug, Default)]
struct DashboardState {
    categories: Vec<category::Model>,
    expenses: Vec<expense::Model>,
    funders: Vec<funder::Model>,
    view: DashboardView,
}

impl DashboardState {
    /// Applies an expense snapshot: rebuilds the totals, buckets, and
    /// recent list, and re-crosses both breakdowns against the cached
    /// category and funder lists. Returns false (and changes nothing) when
    /// the snapshot is identical to the cached one.
    fn apply_expenses(&mut self, snapshot: Vec<expense::Model>) -> bool {
        if snapshot == self.expenses {
            return false;
        }
        self.expenses = snapshot;
        self.view.aggregates.overview = aggregate::compute_budget_overview(&self.expenses);
        self.view.aggregates.statuses = aggregate::compute_status_breakdown(&self.expenses);
        self.view.aggregates.recent = aggregate::recent_expenses(&self.expenses, RECENT_LIMIT);
        self.view.aggregates.categories =
            aggregate::compute_category_breakdown(&self.categories, &self.expenses);
        self.view.aggregates.funders =
            aggregate::compute_funder_breakdown(&self.funders, &self.expenses);
        self.view.revision += 1;
        true
    }

    /// Applies a category snapshot: only the category breakdown is
    /// re-derived, against the cached expense snapshot.
    fn apply_categories(&mut self, snapshot: Vec<category::Model>) -> bool {
        if snapshot == self.categories {
            return false;
        }
        self.categories = snapshot;
        self.view.aggregates.categories =
            aggregate::compute_category_breakdown(&self.categories, &self.expenses);
        self.view.revision += 1;
        true
    }

    /// Applies a funder snapshot: only the funder breakdown is re-derived,
    /// against the cached expense snapshot.
    fn apply_funders(&mut self, snapshot: Vec<funder::Model>) -> bool {
        if snapshot == self.funders {
            return false;
        }
        self.funders = snapshot;
        self.view.aggregates.funders =
            aggregate::compute_funder_breakdown(&self.funders, &self.expenses);
        self.view.revision += 1;
        true
    }
}

/// A live-updating dashboard bound to a [`Store`].
///
/// Holds three channel subscriptions for its whole lifetime; [`close`]
/// (or dropping the value) releases all three together, after which no
/// further reconciliation runs.
///
/// [`close`]: LiveDashboard::close
pub struct LiveDashboard {
    state: Arc<RwLock<DashboardState>>,
    tasks: Vec<JoinHandle<()>>,
}

impl LiveDashboard {
    /// Subscribes to the store's three collections and starts the listener
    /// tasks. The initial view is seeded from the channels' current values,
    /// so it is complete before the first change event arrives.
    pub async fn spawn(store: &Store) -> Self {
        let mut categories_rx = store.watch_categories();
        let mut expenses_rx = store.watch_expenses();
        let mut funders_rx = store.watch_funders();

        let mut initial = DashboardState::default();
        initial.apply_categories(categories_rx.borrow_and_update().clone());
        initial.apply_funders(funders_rx.borrow_and_update().clone());
        initial.apply_expenses(expenses_rx.borrow_and_update().clone());
        let state = Arc::new(RwLock::new(initial));

        let categories_state = Arc::clone(&state);
        let categories_task = tokio::spawn(async move {
            while categories_rx.changed().await.is_ok() {
                let snapshot = categories_rx.borrow_and_update().clone();
                let mut state = categories_state.write().await;
                if state.apply_categories(snapshot) {
                    debug!(revision = state.view.revision, "Applied category snapshot");
                }
            }
        });

        let expenses_state = Arc::clone(&state);
        let expenses_task = tokio::spawn(async move {
            while expenses_rx.changed().await.is_ok() {
                let snapshot = expenses_rx.borrow_and_update().clone();
                let mut state = expenses_state.write().await;
                if state.apply_expenses(snapshot) {
                    debug!(revision = state.view.revision, "Applied expense snapshot");
                }
            }
        });

        let funders_state = Arc::clone(&state);
        let funders_task = tokio::spawn(async move {
            while funders_rx.changed().await.is_ok() {
                let snapshot = funders_rx.borrow_and_update().clone();
                let mut state = funders_state.write().await;
                if state.apply_funders(snapshot) {
                    debug!(revision = state.view.revision, "Applied funder snapshot");
                }
            }
        });

        info!("Live dashboard subscribed to record store");
        Self {
            state,
            tasks: vec![categories_task, expenses_task, funders_task],
        }
    }

    /// The current view. Cheap to call; clones the derived aggregates.
    pub async fn view(&self) -> DashboardView {
        self.state.read().await.view.clone()
    }

    /// Releases all three subscriptions. No callback fires afterwards.
    /// Idempotent: closing an already-closed dashboard is a no-op.
    pub fn close(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for LiveDashboard {
    fn drop(&mut self) {
        self.close();
    }
}
