//! Identity resolution - maps an externally-verified token to a user record.
//!
//! A read-that-may-write: resolving an identity can insert a new user or
//! rebind an existing one's external UID, so it must run before any
//! permission check that needs a user id.

use crate::{
    auth::{TokenVerifier, VerifiedToken},
    entities::{User, user},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::{info, warn};

/// Finds the user for a verified token, creating or reconciling one if
/// needed.
///
/// Lookup order:
/// 1. by the provider's subject identifier;
/// 2. by email - if found, the stored external UID is overwritten with the
///    token's. This is a deliberate fallback for identity-provider UID churn
///    (e.g. emulator resets). It would silently rebind an account if two
///    external identities ever shared an email, so it is logged loudly;
///    hardening it behind email verification is a production follow-up.
/// 3. otherwise a new user is inserted.
///
/// # Errors
/// Returns a database error if any lookup or write fails.
pub async fn resolve_or_create(
    db: &DatabaseConnection,
    token: &VerifiedToken,
) -> Result<user::Model> {
    if let Some(existing) = User::find()
        .filter(user::Column::ExternalUid.eq(&token.subject))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    if let Some(existing) = User::find()
        .filter(user::Column::Email.eq(&token.email))
        .one(db)
        .await?
    {
        warn!(
            user_id = existing.id,
            email = %existing.email,
            "rebinding user to a new external UID after provider churn"
        );
        let mut active: user::ActiveModel = existing.into();
        active.external_uid = Set(token.subject.clone());
        active.updated_at = Set(chrono::Utc::now());
        return active.update(db).await.map_err(Into::into);
    }

    let now = chrono::Utc::now();
    let created = user::ActiveModel {
        external_uid: Set(token.subject.clone()),
        email: Set(token.email.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = created.id, "created user on first verified token");
    Ok(created)
}

/// Verifies a bearer credential and resolves it to a user record.
///
/// # Errors
/// Returns `Unauthenticated` from the verifier, or a database error from
/// resolution.
pub async fn resolve_identity<V: TokenVerifier>(
    db: &DatabaseConnection,
    verifier: &V,
    bearer: &str,
) -> Result<user::Model> {
    let token = verifier.verify(bearer).await?;
    resolve_or_create(db, &token).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::{StaticTokenVerifier, setup_test_db};

    #[tokio::test]
    async fn test_creates_user_on_first_sight() -> Result<()> {
        let db = setup_test_db().await?;
        let token = VerifiedToken::new("uid-1", "alice@example.com")?;

        let created = resolve_or_create(&db, &token).await?;
        assert_eq!(created.external_uid, "uid-1");
        assert_eq!(created.email, "alice@example.com");

        // Second resolution returns the same record
        let again = resolve_or_create(&db, &token).await?;
        assert_eq!(again.id, created.id);

        let all = User::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_reconciles_by_email_on_uid_churn() -> Result<()> {
        let db = setup_test_db().await?;
        let original = VerifiedToken::new("uid-old", "alice@example.com")?;
        let created = resolve_or_create(&db, &original).await?;

        // Same email arrives under a fresh subject (emulator reset)
        let churned = VerifiedToken::new("uid-new", "alice@example.com")?;
        let rebound = resolve_or_create(&db, &churned).await?;

        assert_eq!(rebound.id, created.id);
        assert_eq!(rebound.external_uid, "uid-new");

        let all = User::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_distinct_emails_get_distinct_users() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = resolve_or_create(&db, &VerifiedToken::new("uid-a", "a@example.com")?).await?;
        let bob = resolve_or_create(&db, &VerifiedToken::new("uid-b", "b@example.com")?).await?;
        assert_ne!(alice.id, bob.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_identity_via_verifier() -> Result<()> {
        let db = setup_test_db().await?;
        let verifier = StaticTokenVerifier::with_token(
            "bearer-abc",
            VerifiedToken::new("uid-1", "alice@example.com")?,
        );

        let user = resolve_identity(&db, &verifier, "bearer-abc").await?;
        assert_eq!(user.email, "alice@example.com");

        let rejected = resolve_identity(&db, &verifier, "bearer-unknown").await;
        assert!(matches!(
            rejected.unwrap_err(),
            Error::Unauthenticated { reason: _ }
        ));

        Ok(())
    }
}
