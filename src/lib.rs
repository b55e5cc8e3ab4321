//! `matplan` - a multi-tenant meal-planning backend core.
//!
//! Users create meal plans (recipe collections plus a weekly calendar grid),
//! share them via invite codes with tiered permissions (owner/edit/view), and
//! assign recipes to calendar slots. This crate covers identity resolution,
//! permission checks, the share/invite lifecycle, and the plan-slot engine
//! with its derived recipe statistics. A transport layer (HTTP, CLI, ...)
//! is expected to sit on top of the `core` modules.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::cognitive_complexity,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions)]

/// External token verification boundary and the typed verified-token result
pub mod auth;
/// Injectable time source for consumption stamps and "today" comparisons
pub mod clock;
/// Configuration management for database connection and schema setup
pub mod config;
/// Core business logic - identity, permissions, sharing, slots, recipes
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
