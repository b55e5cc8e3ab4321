//! Core business logic - framework-agnostic operations over the meal-plan
//! data model.
//!
//! Every mutating operation resolves the caller's permission first and
//! short-circuits before touching storage; the share manager and the slot
//! engine are the only modules with non-trivial state transitions.

/// Identity resolution - maps verified tokens to user records
pub mod identity;
/// Permission resolution - (user, plan) -> access tier
pub mod permission;
/// Plan lifecycle - creation, renaming, listing, membership
pub mod plan;
/// Recipe management - creation, listing, voting, soft deletion
pub mod recipe;
/// Per-plan key/value settings
pub mod settings;
/// Share/invite lifecycle - creation, redemption, revocation, leaving
pub mod share;
/// Plan slot engine - calendar upserts and derived recipe statistics
pub mod slot;
