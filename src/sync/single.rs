//! Single-user sync for post-confirmation trigger events.

use serde_json::Value;

use crate::models::event;
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum SingleSyncError {
    /// The trigger payload had no `userName`: a contract violation by
    /// the caller, not a malformed user.
    #[error("userName not found in event")]
    MissingUserName,
    #[error("email not found in user attributes")]
    MissingEmail,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Upsert the one user described by a confirmation event.
///
/// Returns the user identifier on success. Never writes to the database
/// when either the identifier or the email is missing. The caller owns
/// the fail-open policy; this function only reports what went wrong.
pub async fn sync_single_user(
    store: &dyn UserStore,
    event: &Value,
) -> Result<String, SingleSyncError> {
    let user_id = event::user_name(event).ok_or(SingleSyncError::MissingUserName)?;
    let email = event::email_attribute(event).ok_or(SingleSyncError::MissingEmail)?;

    store.upsert_user(user_id, email).await?;

    Ok(user_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{confirmation_event, InMemoryUserStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_upserts_confirmed_user() {
        let store = InMemoryUserStore::new();
        let event = confirmation_event("u1", Some("a@example.com"));

        let user_id = sync_single_user(&store, &event).await.unwrap();

        assert_eq!(user_id, "u1");
        let row = store.get("u1").unwrap();
        assert_eq!(row.email, "a@example.com");
        assert!(!row.is_dev);
    }

    #[tokio::test]
    async fn test_missing_user_name_writes_nothing() {
        let store = InMemoryUserStore::new();
        let event = json!({"request": {"userAttributes": {"email": "a@example.com"}}});

        let err = sync_single_user(&store, &event).await.unwrap_err();

        assert!(matches!(err, SingleSyncError::MissingUserName));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_email_writes_nothing() {
        let store = InMemoryUserStore::new();
        let event = confirmation_event("u1", None);

        let err = sync_single_user(&store, &event).await.unwrap_err();

        assert!(matches!(err, SingleSyncError::MissingEmail));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = InMemoryUserStore::new().with_failure_on("u1");
        let event = confirmation_event("u1", Some("a@example.com"));

        let err = sync_single_user(&store, &event).await.unwrap_err();

        assert!(matches!(err, SingleSyncError::Store(_)));
    }

    #[tokio::test]
    async fn test_repeat_upsert_is_idempotent() {
        let store = InMemoryUserStore::new();

        sync_single_user(&store, &confirmation_event("u1", Some("old@example.com")))
            .await
            .unwrap();
        sync_single_user(&store, &confirmation_event("u1", Some("new@example.com")))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("u1").unwrap().email, "new@example.com");
    }

    #[tokio::test]
    async fn test_update_leaves_is_dev_untouched() {
        let store = InMemoryUserStore::new();
        store.seed("u1", "old@example.com", true);

        sync_single_user(&store, &confirmation_event("u1", Some("new@example.com")))
            .await
            .unwrap();

        let row = store.get("u1").unwrap();
        assert_eq!(row.email, "new@example.com");
        assert!(row.is_dev);
    }
}
