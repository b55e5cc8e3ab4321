//! Access entity - the (user, meal plan) -> permission join table.
//!
//! At most one entry exists per (user, plan) pair, enforced by a unique
//! index created in `config::database`. Exactly one OWNER entry exists per
//! plan, inserted in the same transaction that creates the plan. Entries are
//! hard-deleted when a user leaves a plan.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::Permission;

/// Plan access database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_meal_plan_access")]
pub struct Model {
    /// Unique identifier for the access entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user holding the access
    pub user_id: i64,
    /// ID of the meal plan the access is scoped to
    pub meal_plan_id: i64,
    /// The stored access tier - a user has exactly this tier, or no access
    pub permission: Permission,
    /// When the access entry was created
    pub created_at: DateTimeUtc,
    /// When the access entry was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Access and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each access entry belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each access entry belongs to one meal plan
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id"
    )]
    MealPlan,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
