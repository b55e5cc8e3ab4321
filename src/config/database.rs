//! Database configuration module for `matplan`.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions via `Schema::create_table_from_entity`,
//! so the database schema matches the Rust struct definitions without manual
//! SQL. The uniqueness constraints that span several columns - one slot per
//! calendar cell, one access entry per (user, plan) pair - cannot be expressed
//! column-locally and are created as explicit unique indexes here; the share
//! and slot writers rely on them under concurrent inserts.

use crate::entities::{Access, MealPlan, PlanSlot, Recipe, Setting, Share, User};
use crate::entities::{access, plan_slot};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default
/// `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/matplan.sqlite".to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if the variable is not set.
///
/// # Errors
/// Returns a database error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables and the unique indexes the core relies on.
///
/// # Errors
/// Returns a database error if any statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(User)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(MealPlan)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Access)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Share)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Recipe)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(PlanSlot)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Setting)))
        .await?;

    // One access entry per (user, plan) pair
    let access_index = Index::create()
        .name("uq_user_meal_plan_access")
        .table(Access)
        .col(access::Column::UserId)
        .col(access::Column::MealPlanId)
        .unique()
        .to_owned();
    db.execute(builder.build(&access_index)).await?;

    // One slot per calendar cell per person. NULL extra_id rows are treated
    // as distinct by SQLite, so the base-row case additionally depends on
    // the transactional find-then-write in the slot engine.
    let slot_index = Index::create()
        .name("uq_plan_slot_cell")
        .table(PlanSlot)
        .col(plan_slot::Column::MealPlanId)
        .col(plan_slot::Column::PlanDate)
        .col(plan_slot::Column::MealType)
        .col(plan_slot::Column::ExtraId)
        .col(plan_slot::Column::Person)
        .unique()
        .to_owned();
    db.execute(builder.build(&slot_index)).await?;

    Ok(())
}
