//! Meal plan entity - an owned collection of recipes and calendar slots.
//!
//! Every plan has exactly one creator; who can see or change it is governed
//! entirely by the access entries in `user_meal_plan_access`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_plans")]
pub struct Model {
    /// Unique identifier for the meal plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the plan
    pub name: String,
    /// ID of the user who created the plan
    pub created_by_user_id: i64,
    /// When the plan was created
    pub created_at: DateTimeUtc,
    /// When the plan was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between MealPlan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each plan was created by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::user::Column::Id"
    )]
    Creator,
    /// One plan has many access entries
    #[sea_orm(has_many = "super::access::Entity")]
    AccessEntries,
    /// One plan has many share codes
    #[sea_orm(has_many = "super::share::Entity")]
    Shares,
    /// One plan has many recipes
    #[sea_orm(has_many = "super::recipe::Entity")]
    Recipes,
    /// One plan has many calendar slots
    #[sea_orm(has_many = "super::plan_slot::Entity")]
    Slots,
    /// One plan has many key/value settings
    #[sea_orm(has_many = "super::setting::Entity")]
    Settings,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessEntries.def()
    }
}

impl Related<super::share::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shares.def()
    }
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::plan_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slots.def()
    }
}

impl Related<super::setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
