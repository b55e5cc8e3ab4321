//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod access;
pub mod enums;
pub mod meal_plan;
pub mod plan_slot;
pub mod recipe;
pub mod setting;
pub mod share;
pub mod user;

// Re-export specific types to avoid conflicts
pub use access::{Column as AccessColumn, Entity as Access, Model as AccessModel};
pub use enums::{MealType, Permission, Person};
pub use meal_plan::{Column as MealPlanColumn, Entity as MealPlan, Model as MealPlanModel};
pub use plan_slot::{Column as PlanSlotColumn, Entity as PlanSlot, Model as PlanSlotModel};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use share::{Column as ShareColumn, Entity as Share, Model as ShareModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
