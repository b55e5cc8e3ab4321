//! Recipe management - creation, listing, voting, and soft deletion.
//!
//! Recipes are soft-deleted only: historical plan slots keep referencing
//! them, so the row stays and an `is_deleted` flag hides it. The derived
//! fields (`vote_count` reset, `last_cooked_date`) are written by the slot
//! engine; the only direct mutation here is the vote increment.

use crate::{
    core::permission,
    entities::{Recipe, recipe},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Looks up an active (non-deleted) recipe within a plan.
async fn find_in_plan<C: ConnectionTrait>(
    db: &C,
    plan_id: i64,
    recipe_id: i64,
) -> Result<recipe::Model> {
    Recipe::find_by_id(recipe_id)
        .filter(recipe::Column::MealPlanId.eq(plan_id))
        .filter(recipe::Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { recipe_id })
}

/// Creates a recipe in a plan. Requires edit permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access, or
/// [`Error::InvalidArgument`] for an empty name.
pub async fn create_recipe(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    name: &str,
    link: Option<String>,
    notes: Option<String>,
) -> Result<recipe::Model> {
    permission::require_edit(db, user_id, plan_id).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument {
            message: "recipe name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now();
    recipe::ActiveModel {
        meal_plan_id: Set(plan_id),
        name: Set(name.to_string()),
        link: Set(link),
        notes: Set(notes),
        vote_count: Set(0),
        last_cooked_date: Set(None),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists a plan's active recipes ordered alphabetically by name. Requires
/// view permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without access, or a database error.
pub async fn list_recipes(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
) -> Result<Vec<recipe::Model>> {
    permission::require_view(db, user_id, plan_id).await?;

    Recipe::find()
        .filter(recipe::Column::MealPlanId.eq(plan_id))
        .filter(recipe::Column::IsDeleted.eq(false))
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Increments a recipe's vote counter by one. Requires edit permission.
///
/// The increment is a single atomic SQL update rather than a
/// read-modify-write, so concurrent votes cannot lose updates.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access, or
/// [`Error::RecipeNotFound`] if the recipe is missing or deleted.
pub async fn vote_recipe(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    recipe_id: i64,
) -> Result<recipe::Model> {
    permission::require_edit(db, user_id, plan_id).await?;
    find_in_plan(db, plan_id, recipe_id).await?;

    Recipe::update_many()
        .col_expr(
            recipe::Column::VoteCount,
            Expr::col(recipe::Column::VoteCount).add(1),
        )
        .filter(recipe::Column::Id.eq(recipe_id))
        .exec(db)
        .await?;

    find_in_plan(db, plan_id, recipe_id).await
}

/// Soft-deletes a recipe. Requires edit permission.
///
/// The row is flagged, never physically removed, so historical slot
/// references stay valid.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access, or
/// [`Error::RecipeNotFound`] if the recipe is missing or already deleted.
pub async fn delete_recipe(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    recipe_id: i64,
) -> Result<()> {
    permission::require_edit(db, user_id, plan_id).await?;

    let existing = find_in_plan(db, plan_id, recipe_id).await?;
    let mut active: recipe::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await?;

    Ok(())
}
