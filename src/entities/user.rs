//! User entity - one row per person known to the system.
//!
//! Users are created lazily the first time a verified token is seen. The
//! `external_uid` is the identity provider's subject claim and only changes
//! through the documented email-fallback reconciliation in `core::identity`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Subject identifier assigned by the external identity provider
    #[sea_orm(unique)]
    pub external_uid: String,
    /// Verified email address
    #[sea_orm(unique)]
    pub email: String,
    /// When the user record was created
    pub created_at: DateTimeUtc,
    /// When the user record was last updated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many plan access entries
    #[sea_orm(has_many = "super::access::Entity")]
    AccessEntries,
    /// One user may have created many meal plans
    #[sea_orm(has_many = "super::meal_plan::Entity")]
    CreatedPlans,
}

impl Related<super::access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessEntries.def()
    }
}

impl Related<super::meal_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
