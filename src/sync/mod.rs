//! Trigger dispatch and the two sync modes.
//!
//! One entry point serves three trigger shapes: a scheduled event, a
//! manual full-sync request, and a single-user confirmation event. The
//! first two run the reconciler and answer with a status object; the
//! last one is fail-open and always echoes the payload back, so a
//! database problem can never block a user's registration.

pub mod full;
pub mod single;

pub use full::{Reconciler, SyncCounts};
pub use single::SingleSyncError;

use serde_json::Value;

use crate::models::event::{self, SyncResponse};
use crate::AppState;

/// What the dispatcher decided to do with a trigger payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A full sync ran; answer with its status object.
    FullSync(SyncResponse),
    /// The payload was treated as a single-user event; echo it back
    /// unchanged, whatever happened internally.
    Passthrough(Value),
}

/// Route a trigger payload to the matching sync mode and run it.
///
/// Precedence, first match wins: scheduled-event marker, explicit
/// full-sync action, single-user event.
pub async fn handle_event(state: &AppState, event: Value) -> Dispatch {
    tracing::info!(event = %event, "received trigger event");

    if event::is_scheduled_event(&event) {
        tracing::info!("processing scheduled event for full user sync");
        return Dispatch::FullSync(run_full_sync(state).await);
    }

    if event::is_full_sync_action(&event) {
        tracing::info!("processing manual trigger for full user sync");
        return Dispatch::FullSync(run_full_sync(state).await);
    }

    match single::sync_single_user(state.store.as_ref(), &event).await {
        Ok(user_id) => tracing::info!(user_id = %user_id, "successfully processed user"),
        // Fail open: log and fall through to the unchanged payload so
        // the upstream registration flow is never blocked.
        Err(e) => tracing::error!(error = %e, "error processing confirmation event"),
    }

    Dispatch::Passthrough(event)
}

async fn run_full_sync(state: &AppState) -> SyncResponse {
    let reconciler = Reconciler::new(
        state.directory.clone(),
        state.store.clone(),
        state.config.directory.pool_id.clone(),
    );

    if reconciler.run().await.succeeded() {
        SyncResponse::completed()
    } else {
        SyncResponse::failed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DatabaseConfig, DirectoryConfig, LoggingConfig, ServerConfig};
    use crate::test_util::{
        confirmation_event, directory_user, manual_sync_event, scheduled_event, InMemoryUserStore,
        StaticDirectory,
    };
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn test_config(pool_id: Option<&str>) -> Config {
        Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgresql://localhost:5432".to_string(),
                name: "appdb".to_string(),
                username: "app".to_string(),
                password: "secret".to_string(),
            },
            directory: DirectoryConfig {
                base_url: "http://localhost:9000".to_string(),
                pool_id: pool_id.map(String::from),
            },
            logging: LoggingConfig::default(),
        }
    }

    fn test_state(
        directory: StaticDirectory,
        store: InMemoryUserStore,
    ) -> (Arc<AppState>, Arc<InMemoryUserStore>) {
        let store = Arc::new(store);
        let state = Arc::new(AppState {
            config: test_config(Some("pool-1")),
            store: store.clone(),
            directory: Arc::new(directory),
        });
        (state, store)
    }

    #[rstest]
    #[case::scheduled(scheduled_event())]
    #[case::manual(manual_sync_event())]
    #[tokio::test]
    async fn test_full_sync_triggers_route_to_reconciler(#[case] event: Value) {
        let directory = StaticDirectory::new(vec![vec![directory_user(
            Some("u1"),
            Some("u1@example.com"),
        )]]);
        let (state, _) = test_state(directory, InMemoryUserStore::new());

        let dispatch = handle_event(&state, event).await;

        assert_eq!(dispatch, Dispatch::FullSync(SyncResponse::completed()));
    }

    #[tokio::test]
    async fn test_full_sync_failure_maps_to_500() {
        let (state, _) = test_state(StaticDirectory::new(vec![]), InMemoryUserStore::new());

        let dispatch = handle_event(&state, manual_sync_event()).await;

        assert_eq!(dispatch, Dispatch::FullSync(SyncResponse::failed()));
    }

    #[tokio::test]
    async fn test_scheduled_marker_wins_over_action() {
        // Precedence check: both markers present, scheduled wins, but
        // either way this must route to the reconciler.
        let directory = StaticDirectory::new(vec![vec![directory_user(
            Some("u1"),
            Some("u1@example.com"),
        )]]);
        let (state, _) = test_state(directory, InMemoryUserStore::new());
        let event = json!({"source": "aws.events", "action": "sync_users"});

        let dispatch = handle_event(&state, event).await;

        assert_eq!(dispatch, Dispatch::FullSync(SyncResponse::completed()));
    }

    #[rstest]
    #[case::confirmation(confirmation_event("u1", Some("a@example.com")))]
    #[case::wrong_source(json!({"source": "something.else"}))]
    #[case::wrong_action(json!({"action": "delete_users"}))]
    #[case::empty(json!({}))]
    #[tokio::test]
    async fn test_other_payloads_pass_through_unchanged(#[case] event: Value) {
        let (state, _) = test_state(StaticDirectory::new(vec![]), InMemoryUserStore::new());

        let dispatch = handle_event(&state, event.clone()).await;

        assert_eq!(dispatch, Dispatch::Passthrough(event));
    }

    #[tokio::test]
    async fn test_confirmation_event_writes_row() {
        let (state, store) = test_state(StaticDirectory::new(vec![]), InMemoryUserStore::new());
        let event = confirmation_event("u1", Some("a@example.com"));

        handle_event(&state, event).await;

        let row = store.get("u1").unwrap();
        assert_eq!(row.email, "a@example.com");
        assert!(!row.is_dev);
    }

    #[tokio::test]
    async fn test_store_failure_is_fail_open() {
        let store = InMemoryUserStore::new().with_failure_on("u1");
        let (state, _) = test_state(StaticDirectory::new(vec![]), store);
        let event = confirmation_event("u1", Some("a@example.com"));

        let dispatch = handle_event(&state, event.clone()).await;

        assert_eq!(dispatch, Dispatch::Passthrough(event));
    }

    #[tokio::test]
    async fn test_missing_email_is_fail_open_without_write() {
        let (state, store) = test_state(StaticDirectory::new(vec![]), InMemoryUserStore::new());
        let event = confirmation_event("u1", None);

        let dispatch = handle_event(&state, event.clone()).await;

        assert_eq!(dispatch, Dispatch::Passthrough(event));
        assert!(store.is_empty());
    }
}
