//! Category store operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! categories. All functions are async and return Result types for error
//! handling. Deleting a category never cascades: its expenses keep their
//! `category_id` and become orphaned.

use crate::entities::{Category, category};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Retrieves all categories, ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its id, returning `None` if it does not exist.
pub async fn get_category(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<category::Model>> {
    Category::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a category by exact name. Used by startup seeding to avoid
/// duplicating configured categories.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category with a store-assigned id and creation timestamp.
///
/// The name is trimmed and must be non-empty; a blank description is stored
/// as `None`.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
) -> Result<category::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let category = category::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        description: Set(normalize_description(description)),
        created_at: Set(Some(chrono::Utc::now())),
        updated_at: Set(None),
    };

    category.insert(db).await.map_err(Into::into)
}

/// Updates a category's name and/or description. Fields passed as `None`
/// are left unchanged; the store assigns `updated_at`.
pub async fn update_category(
    db: &DatabaseConnection,
    id: &str,
    name: Option<String>,
    description: Option<String>,
) -> Result<category::Model> {
    let existing = get_category(db, id)
        .await?
        .ok_or_else(|| Error::CategoryNotFound { id: id.to_string() })?;

    let mut category: category::ActiveModel = existing.into();
    if let Some(name) = name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Category name cannot be empty".to_string(),
            });
        }
        category.name = Set(name);
    }
    if let Some(description) = description {
        category.description = Set(normalize_description(Some(description)));
    }
    category.updated_at = Set(Some(chrono::Utc::now()));

    category.update(db).await.map_err(Into::into)
}

/// Deletes a category. Expenses referencing it are left in place with a
/// dangling `category_id`; deleting an id that no longer exists is a no-op.
pub async fn delete_category(db: &DatabaseConnection, id: &str) -> Result<()> {
    Category::delete_by_id(id).exec(db).await?;
    Ok(())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::expenses;
    use crate::test_utils::setup_test_db;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, String::new(), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = create_category(&db, "   ".to_string(), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_trims_and_assigns_id() -> Result<()> {
        let db = setup_test_db().await?;

        let category =
            create_category(&db, "  Decorations  ".to_string(), Some("  ".to_string())).await?;
        assert_eq!(category.name, "Decorations");
        assert!(category.description.is_none());
        assert!(!category.id.is_empty());
        assert!(category.created_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_category(&db, "Transport".to_string(), None).await?;
        create_category(&db, "Food".to_string(), None).await?;

        let categories = list_categories(&db).await?;
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Food", "Transport"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_rename() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_category(&db, "Food".to_string(), None).await?;

        let updated = update_category(
            &db,
            &category.id,
            Some("Catering".to_string()),
            Some("Meals for events".to_string()),
        )
        .await?;
        assert_eq!(updated.name, "Catering");
        assert_eq!(updated.description.as_deref(), Some("Meals for events"));
        assert!(updated.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_fails() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_category(&db, "nope", Some("X".to_string()), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryNotFound { id: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_orphans_expenses() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_category(&db, "Food".to_string(), None).await?;
        let expense = expenses::create_expense(
            &db,
            "Lunch".to_string(),
            250.0,
            category.id.clone(),
            None,
            None,
        )
        .await?;

        delete_category(&db, &category.id).await?;

        assert!(get_category(&db, &category.id).await?.is_none());
        // The expense survives with a dangling category reference
        let orphan = expenses::get_expense(&db, &expense.id).await?.unwrap();
        assert_eq!(orphan.category_id, category.id);

        // Deleting again is a harmless no-op
        delete_category(&db, &category.id).await?;

        Ok(())
    }
}
