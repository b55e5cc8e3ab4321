//! Share/invite lifecycle - creation, redemption, revocation, and leaving.
//!
//! Two code policies exist. A VIEW invite is reusable: at most one
//! unconsumed reusable VIEW share exists per plan and repeated requests
//! return the same code. An EDIT invite is one-time: every request mints a
//! fresh code and each code is consumable exactly once. Redeeming a code
//! inserts the access entry and, for one-time codes, stamps `consumed_at`
//! inside one transaction, so a crash can never leave a half-applied join.

use crate::{
    clock::Clock,
    core::permission,
    entities::{Access, Permission, Share, access, share},
    errors::{Error, Result, is_unique_violation},
};
use rand::{Rng, distributions::Alphanumeric, rngs::OsRng};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Length of generated share codes.
const SHARE_CODE_LEN: usize = 32;

/// How many times code generation retries after a collision before giving
/// up. Collisions over a 62^32 space are negligible, so hitting this bound
/// means something is broken rather than unlucky.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Generates a random mixed-case alphanumeric code from the OS CSPRNG.
fn generate_share_code(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Parses a requested invite tier. Only "view" and "edit" are grantable.
fn parse_requested_permission(requested: &str) -> Result<Permission> {
    match requested {
        "view" => Ok(Permission::View),
        "edit" => Ok(Permission::Edit),
        other => Err(Error::InvalidArgument {
            message: format!("permission must be 'view' or 'edit', got '{other}'"),
        }),
    }
}

/// Creates an invite code for a plan and returns it. Requires edit
/// permission.
///
/// For VIEW, an existing unconsumed reusable code is returned as-is; for
/// EDIT, a fresh one-time code is minted every call. The existence check is
/// racy under concurrent creation, so a unique-constraint violation at
/// insert time is treated as a collision and generation retries.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access,
/// [`Error::InvalidArgument`] for an unknown tier, or [`Error::Conflict`]
/// if the retry bound is exhausted.
pub async fn create_invite(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    requested: &str,
) -> Result<String> {
    permission::require_edit(db, user_id, plan_id).await?;
    let granted = parse_requested_permission(requested)?;

    // View invites are idempotent by policy
    if granted == Permission::View {
        let existing = Share::find()
            .filter(share::Column::MealPlanId.eq(plan_id))
            .filter(share::Column::Permission.eq(Permission::View))
            .filter(share::Column::IsOneTime.eq(false))
            .filter(share::Column::ConsumedAt.is_null())
            .one(db)
            .await?;
        if let Some(existing) = existing {
            return Ok(existing.share_code);
        }
    }

    let is_one_time = granted == Permission::Edit;

    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_share_code(SHARE_CODE_LEN);

        let taken = Share::find()
            .filter(share::Column::ShareCode.eq(&code))
            .one(db)
            .await?
            .is_some();
        if taken {
            continue;
        }

        let now = chrono::Utc::now();
        let inserted = share::ActiveModel {
            meal_plan_id: Set(plan_id),
            share_code: Set(code.clone()),
            permission: Set(granted),
            is_one_time: Set(is_one_time),
            consumed_at: Set(None),
            created_by_user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await;

        match inserted {
            Ok(_) => {
                info!(plan_id, one_time = is_one_time, "created invite code");
                return Ok(code);
            }
            // Another writer claimed the code between check and insert
            Err(err) if is_unique_violation(&err) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    Err(Error::Conflict {
        message: "could not allocate a unique share code".to_string(),
    })
}

/// Redeems a share code for `user_id` and returns the joined plan's id.
///
/// The access insert and the one-time consumption stamp commit together.
///
/// # Errors
/// Returns [`Error::ShareNotFound`] for an unknown code,
/// [`Error::InviteAlreadyConsumed`] for a spent one-time code, or
/// [`Error::AlreadyMember`] if the user already has access.
pub async fn join(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    share_code: &str,
    user_id: i64,
) -> Result<i64> {
    let txn = db.begin().await?;

    let invite = Share::find()
        .filter(share::Column::ShareCode.eq(share_code))
        .one(&txn)
        .await?
        .ok_or(Error::ShareNotFound)?;
    let plan_id = invite.meal_plan_id;

    if invite.is_one_time && invite.consumed_at.is_some() {
        return Err(Error::InviteAlreadyConsumed);
    }

    let already_member = Access::find()
        .filter(access::Column::UserId.eq(user_id))
        .filter(access::Column::MealPlanId.eq(plan_id))
        .one(&txn)
        .await?
        .is_some();
    if already_member {
        return Err(Error::AlreadyMember { plan_id });
    }

    let now = clock.now();
    access::ActiveModel {
        user_id: Set(user_id),
        meal_plan_id: Set(plan_id),
        permission: Set(invite.permission),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if invite.is_one_time {
        let mut active: share::ActiveModel = invite.into();
        active.consumed_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&txn).await?;
    }

    txn.commit().await?;

    info!(plan_id, user_id, "user joined meal plan via share code");
    Ok(plan_id)
}

/// Lists every share of a plan, consumed ones included. Requires edit
/// permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access, or a database error.
pub async fn list_shares(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
) -> Result<Vec<share::Model>> {
    permission::require_edit(db, user_id, plan_id).await?;

    Share::find()
        .filter(share::Column::MealPlanId.eq(plan_id))
        .order_by_asc(share::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes a share, revoking the code unconditionally. Requires edit
/// permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access, or
/// [`Error::ShareNotFound`] if the share is missing or belongs to another
/// plan.
pub async fn delete_share(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    share_id: i64,
) -> Result<()> {
    permission::require_edit(db, user_id, plan_id).await?;

    let invite = Share::find_by_id(share_id)
        .filter(share::Column::MealPlanId.eq(plan_id))
        .one(db)
        .await?
        .ok_or(Error::ShareNotFound)?;

    invite.delete(db).await?;
    Ok(())
}

/// Removes the caller's own access entry from a plan.
///
/// # Errors
/// Returns [`Error::AccessNotFound`] without an access entry, or
/// [`Error::Forbidden`] for owners - an owner can never leave their own
/// plan and must transfer or delete it instead.
pub async fn leave_plan(db: &DatabaseConnection, user_id: i64, plan_id: i64) -> Result<()> {
    let entry = Access::find()
        .filter(access::Column::UserId.eq(user_id))
        .filter(access::Column::MealPlanId.eq(plan_id))
        .one(db)
        .await?
        .ok_or(Error::AccessNotFound { plan_id })?;

    if entry.permission == Permission::Owner {
        return Err(Error::Forbidden {
            reason: "plan owners cannot leave their own plan".to_string(),
        });
    }

    entry.delete(db).await?;
    info!(plan_id, user_id, "user left meal plan");
    Ok(())
}
