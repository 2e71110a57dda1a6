use budgetflow::config::{database, settings};
use budgetflow::core::report::render_report;
use budgetflow::errors::Result;
use budgetflow::live::LiveDashboard;
use budgetflow::store::Store;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application settings (config.toml + environment)
    let settings = settings::load_default_settings()?;
    info!("Loaded settings, database at {}", settings.database_url);

    // 4. Initialize the database
    let db = database::connect(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Wrap the connection in the record store and seed configured categories
    let store = Store::new(db).await?;
    let seeded = store.seed_categories(&settings.categories).await?;
    if seeded > 0 {
        info!("Seeded {seeded} categories from configuration.");
    }

    // 6. Start the live dashboard and export the current report
    let mut dashboard = LiveDashboard::spawn(&store).await;
    let view = dashboard.view().await;

    // Keep the legacy summary cache in step with the derived figures
    store.put_budget_summary(&view.aggregates.overview).await?;

    let funders = store.list_funders().await?;
    let expenses = store.list_expenses(None).await?;
    let html = render_report(&funders, &expenses, &view.aggregates, chrono::Utc::now());
    std::fs::write(&settings.report_path, html)?;
    info!(
        "Report written to {} ({} expenses, total {})",
        settings.report_path.display(),
        expenses.len(),
        view.aggregates.overview.total_budget
    );

    dashboard.close();
    Ok(())
}
