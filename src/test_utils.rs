//! Shared test utilities for `matplan`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults. Tests run against an
//! in-memory `SQLite` database and a clock fixed at 2024-01-20T12:00:00Z, so
//! date arithmetic in scenarios is deterministic.

use crate::{
    auth::{TokenVerifier, VerifiedToken},
    clock::Clock,
    core::identity,
    entities::{self, Permission},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::collections::HashMap;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`Clock`] pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The standard test clock: 2024-01-20T12:00:00Z.
#[allow(clippy::unwrap_used)]
pub fn test_clock() -> FixedClock {
    FixedClock("2024-01-20T12:00:00Z".parse().unwrap())
}

/// Shorthand for building calendar dates in scenarios.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A base-row lunch slot key for participant A on the given date.
pub fn lunch_slot(plan_date: NaiveDate) -> crate::core::slot::SlotKey {
    crate::core::slot::SlotKey {
        plan_date,
        meal_type: entities::MealType::Lunch,
        extra_id: None,
        person: entities::Person::A,
    }
}

/// Creates a test user via identity resolution.
///
/// The external UID and email are derived from `name`, so distinct names
/// yield distinct users.
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::user::Model> {
    let token = VerifiedToken::new(format!("uid-{name}"), format!("{name}@example.com"))?;
    identity::resolve_or_create(db, &token).await
}

/// Sets up a complete test environment with a user and their plan.
/// Returns (db, owner, plan) for common test scenarios.
pub async fn setup_with_plan() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::meal_plan::Model,
)> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let plan = crate::core::plan::create_plan(&db, owner.id, "Test Plan").await?;
    Ok((db, owner, plan))
}

/// Grants `permission` on a plan directly, bypassing the invite flow.
///
/// Useful for tests that need a specific tier without minting share codes.
pub async fn grant_access(
    db: &DatabaseConnection,
    user_id: i64,
    plan_id: i64,
    permission: Permission,
) -> Result<entities::access::Model> {
    let now = Utc::now();
    entities::access::ActiveModel {
        user_id: Set(user_id),
        meal_plan_id: Set(plan_id),
        permission: Set(permission),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test recipe directly in a plan, bypassing permission checks.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    plan_id: i64,
    name: &str,
) -> Result<entities::recipe::Model> {
    let now = Utc::now();
    entities::recipe::ActiveModel {
        meal_plan_id: Set(plan_id),
        name: Set(name.to_string()),
        link: Set(None),
        notes: Set(None),
        vote_count: Set(0),
        last_cooked_date: Set(None),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A [`TokenVerifier`] backed by a fixed bearer -> claims map.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, VerifiedToken>,
}

impl StaticTokenVerifier {
    /// Builds a verifier accepting exactly one bearer credential.
    #[must_use]
    pub fn with_token(bearer: &str, token: VerifiedToken) -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(bearer.to_string(), token);
        Self { tokens }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, bearer: &str) -> Result<VerifiedToken> {
        self.tokens
            .get(bearer)
            .cloned()
            .ok_or_else(|| Error::Unauthenticated {
                reason: "unknown bearer credential".to_string(),
            })
    }
}
