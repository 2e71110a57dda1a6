//! Funder store operations.
//!
//! Funders exist independently of expenses: creating, updating, or deleting
//! a funder never touches the expense collection, and expenses referencing
//! a deleted funder simply render as unassigned.

use crate::entities::{Funder, funder};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Retrieves all funders, ordered alphabetically by name.
pub async fn list_funders(db: &DatabaseConnection) -> Result<Vec<funder::Model>> {
    Funder::find()
        .order_by_asc(funder::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a funder by its id, returning `None` if it does not exist.
pub async fn get_funder(db: &DatabaseConnection, id: &str) -> Result<Option<funder::Model>> {
    Funder::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Creates a new funder with a store-assigned id and creation timestamp.
pub async fn create_funder(
    db: &DatabaseConnection,
    name: String,
    phone: Option<String>,
    email: Option<String>,
) -> Result<funder::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Funder name cannot be empty".to_string(),
        });
    }

    let funder = funder::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        phone: Set(normalize_contact(phone)),
        email: Set(normalize_contact(email)),
        created_at: Set(Some(chrono::Utc::now())),
        updated_at: Set(None),
    };

    funder.insert(db).await.map_err(Into::into)
}

/// Updates a funder's details. Fields passed as `None` are left unchanged;
/// the store assigns `updated_at`.
pub async fn update_funder(
    db: &DatabaseConnection,
    id: &str,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
) -> Result<funder::Model> {
    let existing = get_funder(db, id)
        .await?
        .ok_or_else(|| Error::FunderNotFound { id: id.to_string() })?;

    let mut funder: funder::ActiveModel = existing.into();
    if let Some(name) = name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Funder name cannot be empty".to_string(),
            });
        }
        funder.name = Set(name);
    }
    if let Some(phone) = phone {
        funder.phone = Set(normalize_contact(Some(phone)));
    }
    if let Some(email) = email {
        funder.email = Set(normalize_contact(Some(email)));
    }
    funder.updated_at = Set(Some(chrono::Utc::now()));

    funder.update(db).await.map_err(Into::into)
}

/// Deletes a funder. Expenses referencing it keep their `funder_id` and
/// resolve to `Not Assigned` in reports; deleting a missing id is a no-op.
pub async fn delete_funder(db: &DatabaseConnection, id: &str) -> Result<()> {
    Funder::delete_by_id(id).exec(db).await?;
    Ok(())
}

fn normalize_contact(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_funder_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_funder(&db, " ".to_string(), None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_funders() -> Result<()> {
        let db = setup_test_db().await?;

        create_funder(
            &db,
            "Uncle Ravi".to_string(),
            Some("0771234567".to_string()),
            None,
        )
        .await?;
        create_funder(&db, "Aunty Mala".to_string(), None, Some("  ".to_string())).await?;

        let funders = list_funders(&db).await?;
        let names: Vec<&str> = funders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Aunty Mala", "Uncle Ravi"]);
        assert!(funders[0].email.is_none()); // blank contact stored as None

        Ok(())
    }

    #[tokio::test]
    async fn test_update_funder_contact_details() -> Result<()> {
        let db = setup_test_db().await?;
        let funder = create_funder(&db, "Aunty Mala".to_string(), None, None).await?;

        let updated = update_funder(
            &db,
            &funder.id,
            None,
            Some("0719876543".to_string()),
            Some("mala@example.com".to_string()),
        )
        .await?;
        assert_eq!(updated.name, "Aunty Mala");
        assert_eq!(updated.phone.as_deref(), Some("0719876543"));
        assert_eq!(updated.email.as_deref(), Some("mala@example.com"));
        assert!(updated.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_funder_fails() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_funder(&db, "nope", Some("X".to_string()), None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::FunderNotFound { id: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_funder_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let funder = create_funder(&db, "Aunty Mala".to_string(), None, None).await?;

        delete_funder(&db, &funder.id).await?;
        assert!(get_funder(&db, &funder.id).await?.is_none());
        delete_funder(&db, &funder.id).await?;

        Ok(())
    }
}
