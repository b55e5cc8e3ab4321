//! Plan slot engine - calendar upserts and derived recipe statistics.
//!
//! A slot is one calendar cell: (plan, date, meal type, extra row, person).
//! Upserting a slot rewires its recipe reference and recomputes the derived
//! statistics of every recipe involved: `last_cooked_date` becomes the
//! latest plan date still referencing the recipe, and a recipe scheduled for
//! today or later gets its vote counter reset so votes reflect appetite
//! rather than history. The slot write and the recomputation run in one
//! transaction - the recompute reads the very table just mutated, so the
//! mutation must be visible to it and must roll back with it on failure.

use crate::{
    clock::Clock,
    core::permission,
    entities::{MealType, Person, PlanSlot, Recipe, plan_slot, recipe},
    errors::{Error, Result, is_unique_violation},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// How many times an upsert retries after losing an insert race on the
/// composite cell index before surfacing `Conflict`.
const MAX_UPSERT_ATTEMPTS: usize = 3;

/// Composite key identifying one calendar cell within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKey {
    /// Calendar date
    pub plan_date: NaiveDate,
    /// Which meal of the day
    pub meal_type: MealType,
    /// Extra meal row discriminator, None for the base row
    pub extra_id: Option<i64>,
    /// Which participant
    pub person: Person,
}

/// Creates or updates the slot at `key`, assigning `recipe_id` (None clears
/// the cell), and recomputes the derived statistics of the new and previous
/// recipes. Requires edit permission. Idempotent: repeating the call with
/// identical arguments leaves the final state unchanged.
///
/// # Errors
/// Returns [`Error::Forbidden`] without edit access,
/// [`Error::RecipeNotFound`] if `recipe_id` does not name an active recipe
/// in this plan, or [`Error::Conflict`] if the insert race persists past the
/// retry bound.
pub async fn upsert_slot(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    user_id: i64,
    plan_id: i64,
    key: SlotKey,
    recipe_id: Option<i64>,
) -> Result<plan_slot::Model> {
    permission::require_edit(db, user_id, plan_id).await?;

    if let Some(recipe_id) = recipe_id {
        let known = Recipe::find_by_id(recipe_id)
            .filter(recipe::Column::MealPlanId.eq(plan_id))
            .filter(recipe::Column::IsDeleted.eq(false))
            .one(db)
            .await?
            .is_some();
        if !known {
            return Err(Error::RecipeNotFound { recipe_id });
        }
    }

    let mut attempt = 0;
    loop {
        match try_upsert(db, clock, plan_id, key, recipe_id).await {
            Err(Error::Conflict { message }) => {
                attempt += 1;
                if attempt >= MAX_UPSERT_ATTEMPTS {
                    return Err(Error::Conflict { message });
                }
                debug!(plan_id, attempt, "slot insert race, retrying as update");
            }
            other => return other,
        }
    }
}

/// One transactional upsert attempt: write the slot, then recompute.
async fn try_upsert(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    plan_id: i64,
    key: SlotKey,
    recipe_id: Option<i64>,
) -> Result<plan_slot::Model> {
    let txn = db.begin().await?;
    let now = clock.now();

    let (slot, old_recipe_id) = match find_slot(&txn, plan_id, key).await? {
        Some(existing) => {
            let old_recipe_id = existing.recipe_id;
            let mut active: plan_slot::ActiveModel = existing.into();
            active.recipe_id = Set(recipe_id);
            active.updated_at = Set(now);
            (active.update(&txn).await?, old_recipe_id)
        }
        None => {
            let inserted = plan_slot::ActiveModel {
                meal_plan_id: Set(plan_id),
                plan_date: Set(key.plan_date),
                meal_type: Set(key.meal_type),
                extra_id: Set(key.extra_id),
                person: Set(key.person),
                recipe_id: Set(recipe_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await;
            match inserted {
                Ok(slot) => (slot, None),
                // Someone else created this cell first; the dropped
                // transaction rolls back and the caller retries as an update.
                Err(err) if is_unique_violation(&err) => {
                    return Err(Error::Conflict {
                        message: "concurrent insert of the same plan slot".to_string(),
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    // Read-after-write: both recomputes run inside the transaction that
    // just mutated the slot table.
    if let Some(new_id) = recipe_id {
        refresh_recipe_stats(&txn, clock, plan_id, new_id).await?;
    }
    if let Some(old_id) = old_recipe_id {
        if Some(old_id) != recipe_id {
            refresh_recipe_stats(&txn, clock, plan_id, old_id).await?;
        }
    }

    txn.commit().await?;
    Ok(slot)
}

/// Locates a slot by its composite cell key.
async fn find_slot<C: ConnectionTrait>(
    db: &C,
    plan_id: i64,
    key: SlotKey,
) -> Result<Option<plan_slot::Model>> {
    let mut query = PlanSlot::find()
        .filter(plan_slot::Column::MealPlanId.eq(plan_id))
        .filter(plan_slot::Column::PlanDate.eq(key.plan_date))
        .filter(plan_slot::Column::MealType.eq(key.meal_type))
        .filter(plan_slot::Column::Person.eq(key.person));
    query = match key.extra_id {
        Some(extra_id) => query.filter(plan_slot::Column::ExtraId.eq(extra_id)),
        None => query.filter(plan_slot::Column::ExtraId.is_null()),
    };
    query.one(db).await.map_err(Into::into)
}

/// Recomputes a recipe's `last_cooked_date` from the plan's current slots
/// and resets its vote counter when the recipe is scheduled for today or
/// later.
async fn refresh_recipe_stats<C: ConnectionTrait>(
    db: &C,
    clock: &dyn Clock,
    plan_id: i64,
    recipe_id: i64,
) -> Result<()> {
    let last_cooked: Option<NaiveDate> = PlanSlot::find()
        .select_only()
        .column_as(plan_slot::Column::PlanDate.max(), "last_cooked")
        .filter(plan_slot::Column::MealPlanId.eq(plan_id))
        .filter(plan_slot::Column::RecipeId.eq(recipe_id))
        .into_tuple::<Option<NaiveDate>>()
        .one(db)
        .await?
        .flatten();

    let current = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { recipe_id })?;

    let mut active: recipe::ActiveModel = current.into();
    active.last_cooked_date = Set(last_cooked);
    if last_cooked.is_some_and(|date| date >= clock.today()) {
        active.vote_count = Set(0);
    }
    active.updated_at = Set(clock.now());
    active.update(db).await?;

    Ok(())
}

/// Fetches a plan's slots within an inclusive date range, ordered by date.
/// Requires view permission.
///
/// # Errors
/// Returns [`Error::Forbidden`] without access, or
/// [`Error::InvalidArgument`] when the range is reversed.
pub async fn get_slots(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<plan_slot::Model>> {
    permission::require_view(db, user_id, plan_id).await?;

    if end_date < start_date {
        return Err(Error::InvalidArgument {
            message: format!("end date {end_date} precedes start date {start_date}"),
        });
    }

    PlanSlot::find()
        .filter(plan_slot::Column::MealPlanId.eq(plan_id))
        .filter(plan_slot::Column::PlanDate.gte(start_date))
        .filter(plan_slot::Column::PlanDate.lte(end_date))
        .order_by_asc(plan_slot::Column::PlanDate)
        .all(db)
        .await
        .map_err(Into::into)
}
