//! Setting entity - per-plan key/value pairs.
//!
//! Stores display preferences such as the participant names (`name_A`,
//! `name_B`). Reads fall back to a caller-supplied default when a key is
//! absent; defaults are seeded when the plan is created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan setting database model, keyed by (plan, key)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_plan_settings")]
pub struct Model {
    /// ID of the meal plan the setting belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub meal_plan_id: i64,
    /// Setting key, e.g. `name_A`
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Stored value
    pub value: String,
}

/// Defines relationships between Setting and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each setting belongs to one meal plan
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id"
    )]
    MealPlan,
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
