//! Unified error types for `matplan`.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! one-to-one onto the stable error kinds a transport layer would translate
//! into status codes; none of them is ever swallowed internally except
//! [`Error::Conflict`], which the share and slot modules retry a bounded
//! number of times before surfacing.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable credential, or a token missing required claims.
    #[error("authentication failed: {reason}")]
    Unauthenticated {
        /// Why the credential was rejected
        reason: String,
    },

    /// Authenticated, but the caller's permission tier does not allow this.
    #[error("permission denied: {reason}")]
    Forbidden {
        /// Which check failed
        reason: String,
    },

    /// The referenced meal plan does not exist.
    #[error("meal plan {plan_id} not found")]
    PlanNotFound {
        /// Plan primary key
        plan_id: i64,
    },

    /// No share matches the given code or id.
    #[error("share code not found")]
    ShareNotFound,

    /// The referenced recipe does not exist in this plan (or is deleted).
    #[error("recipe {recipe_id} not found in this plan")]
    RecipeNotFound {
        /// Recipe primary key
        recipe_id: i64,
    },

    /// The caller has no access entry for the plan.
    #[error("no access entry for meal plan {plan_id}")]
    AccessNotFound {
        /// Plan primary key
        plan_id: i64,
    },

    /// Malformed input, e.g. an unknown permission tier or an empty name.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// A one-time invite was already redeemed.
    #[error("this invite has already been used")]
    InviteAlreadyConsumed,

    /// The joining user already has an access entry for the plan.
    #[error("user already has access to meal plan {plan_id}")]
    AlreadyMember {
        /// Plan primary key
        plan_id: i64,
    },

    /// A uniqueness race that persisted past the bounded retry attempts.
    #[error("conflicting concurrent write: {message}")]
    Conflict {
        /// Which uniqueness constraint kept firing
        message: String,
    },

    /// Configuration error (environment, connection string, ...).
    #[error("configuration error: {message}")]
    Config {
        /// What failed to load or parse
        message: String,
    },

    /// Database error propagated from SeaORM.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// True when a database error is a unique-constraint violation.
///
/// The share-code and plan-slot writers use this to distinguish "another
/// writer got there first, retry" from genuine failures.
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
