//! Share entity - an invite code granting a permission tier on one plan.
//!
//! Reusable VIEW codes are never consumed and at most one unconsumed one
//! exists per plan (deduplicated at creation). One-time EDIT codes transition
//! at most once from unconsumed to consumed, stamped with `consumed_at`.
//! Shares are hard-deleted on revocation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::Permission;

/// Share code database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_plan_shares")]
pub struct Model {
    /// Unique identifier for the share
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the meal plan this share grants access to
    pub meal_plan_id: i64,
    /// The random invite token redeemed by joining users
    #[sea_orm(unique)]
    pub share_code: String,
    /// Tier granted to whoever redeems the code
    pub permission: Permission,
    /// Whether the code is consumable exactly once
    pub is_one_time: bool,
    /// When a one-time code was redeemed, None while unconsumed
    pub consumed_at: Option<DateTimeUtc>,
    /// ID of the user who created the share
    pub created_by_user_id: i64,
    /// When the share was created
    pub created_at: DateTimeUtc,
    /// When the share was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Share and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each share belongs to one meal plan
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id"
    )]
    MealPlan,
    /// Each share was created by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::user::Column::Id"
    )]
    Creator,
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
