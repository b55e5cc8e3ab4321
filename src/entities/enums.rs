//! Database-backed enums shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access tier a user holds on a meal plan.
///
/// Tiers are stored as-is; there is no inheritance or combination logic.
/// Edit-capable tiers (OWNER, EDIT) always imply view access.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Permission {
    /// Plan creator; full control, cannot leave the plan
    #[sea_orm(string_value = "OWNER")]
    Owner,
    /// May mutate recipes, slots, shares, and settings
    #[sea_orm(string_value = "EDIT")]
    Edit,
    /// Read-only access
    #[sea_orm(string_value = "VIEW")]
    View,
}

impl Permission {
    /// Whether this tier allows mutating the plan.
    #[must_use]
    pub const fn grants_edit(self) -> bool {
        matches!(self, Self::Owner | Self::Edit)
    }
}

/// Which meal of the day a plan slot belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum MealType {
    /// Midday meal row of the planning grid
    #[sea_orm(string_value = "LUNCH")]
    Lunch,
    /// Evening meal row of the planning grid
    #[sea_orm(string_value = "DINNER")]
    Dinner,
}

/// Which of the two plan participants a slot is for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Person {
    /// First participant (display name from the `name_A` setting)
    #[sea_orm(string_value = "A")]
    A,
    /// Second participant (display name from the `name_B` setting)
    #[sea_orm(string_value = "B")]
    B,
}
