//! Plan lifecycle - creation, renaming, listing, and membership.
//!
//! Plan creation is the only place an OWNER access entry is ever written,
//! and it happens in the same transaction as the plan itself together with
//! the default participant-name settings.

use crate::{
    core::{permission, settings},
    entities::{Access, MealPlan, Permission, User, access, meal_plan},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// One member of a plan, as returned by [`list_plan_members`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanMember {
    /// The member's user id
    pub user_id: i64,
    /// The member's email address
    pub email: String,
    /// The member's access tier
    pub permission: Permission,
}

/// Creates a meal plan owned by `user_id`.
///
/// The plan, its OWNER access entry, and the default participant-name
/// settings are inserted atomically.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for an empty name, or a database error.
pub async fn create_plan(
    db: &DatabaseConnection,
    user_id: i64,
    name: &str,
) -> Result<meal_plan::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument {
            message: "meal plan name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let plan = meal_plan::ActiveModel {
        name: Set(name.to_string()),
        created_by_user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    access::ActiveModel {
        user_id: Set(user_id),
        meal_plan_id: Set(plan.id),
        permission: Set(Permission::Owner),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    settings::seed_defaults(&txn, plan.id).await?;

    txn.commit().await?;

    info!(plan_id = plan.id, owner_id = user_id, "created meal plan");
    Ok(plan)
}

/// Renames a plan. Requires edit permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access,
/// [`Error::PlanNotFound`] if the plan row is missing, or
/// [`Error::InvalidArgument`] for an empty name.
pub async fn rename_plan(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    name: &str,
) -> Result<meal_plan::Model> {
    permission::require_edit(db, user_id, plan_id).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument {
            message: "meal plan name cannot be empty".to_string(),
        });
    }

    let plan = MealPlan::find_by_id(plan_id)
        .one(db)
        .await?
        .ok_or(Error::PlanNotFound { plan_id })?;

    let mut active: meal_plan::ActiveModel = plan.into();
    active.name = Set(name.to_string());
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Fetches a plan together with the caller's tier. Requires view permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without access, or [`Error::PlanNotFound`]
/// if the plan row is missing.
pub async fn get_plan(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
) -> Result<(meal_plan::Model, Permission)> {
    let tier = permission::require_view(db, user_id, plan_id).await?;
    let plan = MealPlan::find_by_id(plan_id)
        .one(db)
        .await?
        .ok_or(Error::PlanNotFound { plan_id })?;
    Ok((plan, tier))
}

/// Lists every plan the user has access to, with the held tier.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_accessible_plans(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<(meal_plan::Model, Permission)>> {
    let rows = Access::find()
        .filter(access::Column::UserId.eq(user_id))
        .find_also_related(MealPlan)
        .order_by_asc(access::Column::MealPlanId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(entry, plan)| plan.map(|plan| (plan, entry.permission)))
        .collect())
}

/// Lists the members of a plan with their tiers. Requires view permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without access, or a database error.
pub async fn list_plan_members(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
) -> Result<Vec<PlanMember>> {
    permission::require_view(db, user_id, plan_id).await?;

    let rows = Access::find()
        .filter(access::Column::MealPlanId.eq(plan_id))
        .find_also_related(User)
        .order_by_asc(access::Column::UserId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(entry, member)| {
            member.map(|member| PlanMember {
                user_id: member.id,
                email: member.email,
                permission: entry.permission,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Setting, setting};
    use crate::test_utils::{create_test_user, grant_access, setup_test_db, setup_with_plan};

    #[tokio::test]
    async fn test_create_plan_yields_exactly_one_owner_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let plan = create_plan(&db, user.id, "Weeknights").await?;
        assert_eq!(plan.name, "Weeknights");
        assert_eq!(plan.created_by_user_id, user.id);

        let entries = Access::find()
            .filter(access::Column::MealPlanId.eq(plan.id))
            .all(&db)
            .await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, user.id);
        assert_eq!(entries[0].permission, Permission::Owner);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_plan_seeds_default_settings() -> Result<()> {
        let (db, _owner, plan) = setup_with_plan().await?;

        let seeded = Setting::find()
            .filter(setting::Column::MealPlanId.eq(plan.id))
            .all(&db)
            .await?;
        assert_eq!(seeded.len(), 2);
        assert!(
            seeded
                .iter()
                .any(|s| s.key == "name_A" && s.value == "Person A")
        );
        assert!(
            seeded
                .iter()
                .any(|s| s.key == "name_B" && s.value == "Person B")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_plan_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let result = create_plan(&db, user.id, "   ").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidArgument { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_requires_edit_permission() -> Result<()> {
        let (db, _owner, plan) = setup_with_plan().await?;
        let viewer = create_test_user(&db, "viewer").await?;
        grant_access(&db, viewer.id, plan.id, Permission::View).await?;

        let denied = rename_plan(&db, viewer.id, plan.id, "Hijacked").await;
        assert!(matches!(
            denied.unwrap_err(),
            Error::Forbidden { reason: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_updates_name() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;
        let renamed = rename_plan(&db, owner.id, plan.id, "New Name").await?;
        assert_eq!(renamed.name, "New Name");

        let (fetched, tier) = get_plan(&db, owner.id, plan.id).await?;
        assert_eq!(fetched.name, "New Name");
        assert_eq!(tier, Permission::Owner);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_accessible_plans_reports_tier() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;
        let viewer = create_test_user(&db, "viewer").await?;
        grant_access(&db, viewer.id, plan.id, Permission::View).await?;

        let own = list_accessible_plans(&db, owner.id).await?;
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].1, Permission::Owner);

        let shared = list_accessible_plans(&db, viewer.id).await?;
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].0.id, plan.id);
        assert_eq!(shared[0].1, Permission::View);

        let stranger = create_test_user(&db, "stranger").await?;
        assert!(list_accessible_plans(&db, stranger.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_plan_members() -> Result<()> {
        let (db, owner, plan) = setup_with_plan().await?;
        let editor = create_test_user(&db, "editor").await?;
        grant_access(&db, editor.id, plan.id, Permission::Edit).await?;

        let members = list_plan_members(&db, editor.id, plan.id).await?;
        assert_eq!(members.len(), 2);
        assert!(
            members
                .iter()
                .any(|m| m.user_id == owner.id && m.permission == Permission::Owner)
        );
        assert!(
            members
                .iter()
                .any(|m| m.user_id == editor.id && m.permission == Permission::Edit)
        );

        let stranger = create_test_user(&db, "stranger").await?;
        let denied = list_plan_members(&db, stranger.id, plan.id).await;
        assert!(matches!(
            denied.unwrap_err(),
            Error::Forbidden { reason: _ }
        ));

        Ok(())
    }
}
