//! Application settings loading from config.toml
//!
//! Settings cover the database location, the report export path, and an
//! optional list of categories to seed on first run. Every field has a
//! default, so a missing config.toml is not an error, and `DATABASE_URL`
//! in the environment always wins over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default location of the `SQLite` database file.
/// `mode=rwc` lets `SQLite` create the file on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/budgetflow.sqlite?mode=rwc";

/// Default path the rendered report is written to.
const DEFAULT_REPORT_PATH: &str = "budget-report.html";

/// Settings structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database connection URL (overridden by `DATABASE_URL` if set)
    pub database_url: String,
    /// Where the rendered HTML report is written
    pub report_path: PathBuf,
    /// Categories to seed into an empty store
    pub categories: Vec<CategorySeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            categories: Vec::new(),
        }
    }
}

/// A category to create at startup when no category with that name exists yet
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    /// Name of the category
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
/// A missing file yields the defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let mut settings = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?
    } else {
        info!("No config file at {}, using defaults", path.display());
        Settings::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }

    Ok(settings)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            database_url = "sqlite://test.sqlite?mode=rwc"
            report_path = "out/report.html"

            [[categories]]
            name = "Food"
            description = "Meals and catering"

            [[categories]]
            name = "Transport"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite://test.sqlite?mode=rwc");
        assert_eq!(settings.report_path, PathBuf::from("out/report.html"));
        assert_eq!(settings.categories.len(), 2);
        assert_eq!(settings.categories[0].name, "Food");
        assert_eq!(
            settings.categories[0].description.as_deref(),
            Some("Meals and catering")
        );
        assert!(settings.categories[1].description.is_none());
    }

    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("report_path = \"x.html\"").unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.report_path, PathBuf::from("x.html"));
        assert!(settings.categories.is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_settings("definitely-not-a-real-config.toml").unwrap();
        assert_eq!(settings.report_path, PathBuf::from(DEFAULT_REPORT_PATH));
    }
}
