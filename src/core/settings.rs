//! Per-plan key/value settings.
//!
//! Currently stores the display names of the two plan participants. Reads
//! fall back to a caller-supplied default, so a plan works even if a key was
//! never written.

use crate::{
    core::permission,
    entities::{Setting, setting},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Default display name for participant A.
pub const DEFAULT_PERSON_A: &str = "Person A";
/// Default display name for participant B.
pub const DEFAULT_PERSON_B: &str = "Person B";

/// Keys and defaults seeded when a plan is created.
const DEFAULT_SETTINGS: [(&str, &str); 2] =
    [("name_A", DEFAULT_PERSON_A), ("name_B", DEFAULT_PERSON_B)];

/// Inserts the default settings for a freshly created plan.
///
/// Called from `plan::create_plan` inside the plan-creation transaction.
pub(crate) async fn seed_defaults<C: ConnectionTrait>(db: &C, plan_id: i64) -> Result<()> {
    for (key, value) in DEFAULT_SETTINGS {
        setting::ActiveModel {
            meal_plan_id: Set(plan_id),
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Reads a setting, falling back to `default` when the key is absent.
/// Requires view permission.
///
/// # Errors
/// Returns `Forbidden` without access, or a database error.
pub async fn get_setting(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    key: &str,
    default: &str,
) -> Result<String> {
    permission::require_view(db, user_id, plan_id).await?;

    Ok(Setting::find_by_id((plan_id, key.to_string()))
        .one(db)
        .await?
        .map_or_else(|| default.to_string(), |s| s.value))
}

/// Creates or overwrites a setting. Requires edit permission.
///
/// # Errors
/// Returns `Forbidden` without edit access, or a database error.
pub async fn update_setting(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    key: &str,
    value: &str,
) -> Result<()> {
    permission::require_edit(db, user_id, plan_id).await?;

    let existing = Setting::find_by_id((plan_id, key.to_string())).one(db).await?;
    match existing {
        Some(row) => {
            let mut active: setting::ActiveModel = row.into();
            active.value = Set(value.to_string());
            active.update(db).await?;
        }
        None => {
            setting::ActiveModel {
                meal_plan_id: Set(plan_id),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Permission;
    use crate::errors::Error;
    use crate::test_utils::{create_test_user, grant_access, setup_with_plan};

    #[tokio::test]
    async fn test_seeded_names_are_readable() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;

        let name_a = get_setting(&db, owner.id, plan.id, "name_A", "fallback").await?;
        assert_eq!(name_a, DEFAULT_PERSON_A);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_default() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;

        let value = get_setting(&db, owner.id, plan.id, "week_start", "monday").await?;
        assert_eq!(value, "monday");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_then_read() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;

        update_setting(&db, owner.id, plan.id, "name_A", "Maja").await?;
        let value = get_setting(&db, owner.id, plan.id, "name_A", DEFAULT_PERSON_A).await?;
        assert_eq!(value, "Maja");

        // New key is created on first write
        update_setting(&db, owner.id, plan.id, "week_start", "sunday").await?;
        let created = get_setting(&db, owner.id, plan.id, "week_start", "monday").await?;
        assert_eq!(created, "sunday");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_requires_edit_permission() -> Result<()> {
        let (db, _owner, plan) = setup_with_plan().await?;
        let viewer = create_test_user(&db, "viewer").await?;
        grant_access(&db, viewer.id, plan.id, Permission::View).await?;

        let denied = update_setting(&db, viewer.id, plan.id, "name_A", "X").await;
        assert!(matches!(
            denied.unwrap_err(),
            Error::Forbidden { reason: _ }
        ));

        // But a viewer may read
        let value = get_setting(&db, viewer.id, plan.id, "name_A", "fallback").await?;
        assert_eq!(value, DEFAULT_PERSON_A);

        Ok(())
    }
}
