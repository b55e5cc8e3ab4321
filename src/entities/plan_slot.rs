//! Plan slot entity - one calendar-cell assignment in the planning grid.
//!
//! A cell is identified by (plan, date, meal type, extra row, person) and
//! holds at most one recipe reference. The composite uniqueness is enforced
//! by a storage-level index created in `config::database`; `extra_id`
//! discriminates extra meal rows below the two base rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{MealType, Person};

/// Plan slot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_slots")]
pub struct Model {
    /// Unique identifier for the slot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the meal plan this slot belongs to
    pub meal_plan_id: i64,
    /// Calendar date of the slot
    pub plan_date: Date,
    /// Which meal of the day
    pub meal_type: MealType,
    /// Discriminator for extra meal rows, None for the base row
    pub extra_id: Option<i64>,
    /// Which participant the slot is for
    pub person: Person,
    /// The assigned recipe, None for an empty cell
    pub recipe_id: Option<i64>,
    /// When the slot was created
    pub created_at: DateTimeUtc,
    /// When the slot was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between PlanSlot and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each slot belongs to one meal plan
    #[sea_orm(
        belongs_to = "super::meal_plan::Entity",
        from = "Column::MealPlanId",
        to = "super::meal_plan::Column::Id"
    )]
    MealPlan,
    /// Each slot references at most one recipe
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id"
    )]
    Recipe,
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlan.def()
    }
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
