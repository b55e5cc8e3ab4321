//! Permission resolution - a single lookup in the access join table.
//!
//! A user has exactly the stored tier, or no access; there is no inheritance
//! or tier combination. The `require_*` helpers are called at the top of
//! every gated operation so a failed check short-circuits before any
//! mutation.

use crate::{
    entities::{Access, Permission, access},
    errors::{Error, Result},
};
use sea_orm::prelude::*;

/// Returns the caller's stored tier for a plan, or None without access.
///
/// # Errors
/// Returns a database error if the lookup fails.
pub async fn permission_for<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    plan_id: i64,
) -> Result<Option<Permission>> {
    Ok(Access::find()
        .filter(access::Column::UserId.eq(user_id))
        .filter(access::Column::MealPlanId.eq(plan_id))
        .one(db)
        .await?
        .map(|entry| entry.permission))
}

/// Whether the user holds any tier on the plan.
///
/// # Errors
/// Returns a database error if the lookup fails.
pub async fn can_view<C: ConnectionTrait>(db: &C, user_id: i64, plan_id: i64) -> Result<bool> {
    Ok(permission_for(db, user_id, plan_id).await?.is_some())
}

/// Whether the user holds an edit-capable tier (OWNER or EDIT) on the plan.
///
/// # Errors
/// Returns a database error if the lookup fails.
pub async fn can_edit<C: ConnectionTrait>(db: &C, user_id: i64, plan_id: i64) -> Result<bool> {
    Ok(permission_for(db, user_id, plan_id)
        .await?
        .is_some_and(Permission::grants_edit))
}

/// Resolves the caller's tier, failing with `Forbidden` without access.
///
/// # Errors
/// Returns [`Error::Forbidden`] when the user has no access entry.
pub async fn require_view<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    plan_id: i64,
) -> Result<Permission> {
    permission_for(db, user_id, plan_id)
        .await?
        .ok_or_else(|| Error::Forbidden {
            reason: "you do not have access to this meal plan".to_string(),
        })
}

/// Resolves the caller's tier, failing with `Forbidden` unless it is
/// edit-capable.
///
/// # Errors
/// Returns [`Error::Forbidden`] when the user has no access entry or only
/// VIEW access.
pub async fn require_edit<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    plan_id: i64,
) -> Result<Permission> {
    let permission = require_view(db, user_id, plan_id).await?;
    if permission.grants_edit() {
        Ok(permission)
    } else {
        Err(Error::Forbidden {
            reason: "you do not have permission to edit this meal plan".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_user, grant_access, setup_with_plan};

    #[tokio::test]
    async fn test_edit_implies_view_for_every_tier() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;

        let editor = create_test_user(&db, "editor").await?;
        grant_access(&db, editor.id, plan.id, Permission::Edit).await?;
        let viewer = create_test_user(&db, "viewer").await?;
        grant_access(&db, viewer.id, plan.id, Permission::View).await?;

        for user_id in [owner.id, editor.id, viewer.id] {
            if can_edit(&db, user_id, plan.id).await? {
                assert!(can_view(&db, user_id, plan.id).await?);
            }
        }

        assert!(can_edit(&db, owner.id, plan.id).await?);
        assert!(can_edit(&db, editor.id, plan.id).await?);
        assert!(!can_edit(&db, viewer.id, plan.id).await?);
        assert!(can_view(&db, viewer.id, plan.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_stranger_has_no_tier() -> Result<()> {
        let (db, _owner, plan) = setup_with_plan().await?;
        let stranger = create_test_user(&db, "stranger").await?;

        assert_eq!(permission_for(&db, stranger.id, plan.id).await?, None);
        assert!(!can_view(&db, stranger.id, plan.id).await?);

        let denied = require_view(&db, stranger.id, plan.id).await;
        assert!(matches!(
            denied.unwrap_err(),
            Error::Forbidden { reason: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_require_edit_rejects_viewer() -> Result<()> {
        let (db, _owner, plan) = setup_with_plan().await?;
        let viewer = create_test_user(&db, "viewer").await?;
        grant_access(&db, viewer.id, plan.id, Permission::View).await?;

        assert_eq!(
            require_view(&db, viewer.id, plan.id).await?,
            Permission::View
        );
        let denied = require_edit(&db, viewer.id, plan.id).await;
        assert!(matches!(
            denied.unwrap_err(),
            Error::Forbidden { reason: _ }
        ));

        Ok(())
    }
}
