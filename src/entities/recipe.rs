//! Recipe entity - a dish belonging to exactly one meal plan.
//!
//! `vote_count` and `last_cooked_date` are derived by the slot engine and
//! never set directly by callers. Recipes are soft-deleted so historical
//! plan slots keep valid references.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the meal plan this recipe belongs to
    pub meal_plan_id: i64,
    /// Human-readable name of the recipe
    pub name: String,
    /// Optional link to the full recipe
    pub link: Option<String>,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Vote counter, reset to zero when the recipe is newly scheduled
    pub vote_count: i32,
    /// Latest plan date referencing this recipe, None if unscheduled
    pub last_cooked_date: Option<Date>,
    /// Soft delete flag - if true, recipe is hidden but data is preserved
    pub is_deleted: bool,
    /// When the recipe was created
    pub created_at: DateTimeUtc,
    /// When the recipe was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recipe belongs to one meal plan
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id"
    )]
    MealPlan,
    /// One recipe may be referenced by many plan slots
    #[sea_orm(has_many = "super::plan_slot::Entity")]
    Slots,
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl Related<super::plan_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
