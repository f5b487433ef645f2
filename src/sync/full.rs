//! Full reconciliation sync: walk the whole directory and upsert every
//! usable entry.

use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::store::UserStore;

/// Per-outcome counters for one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCounts {
    /// Every entry seen, usable or not.
    pub total: u64,
    pub success: u64,
    pub error: u64,
    pub skipped: u64,
}

impl SyncCounts {
    /// A run succeeded only if it did meaningful work: at least one
    /// upsert went through. A run of pure skips and errors, or over an
    /// empty directory, reports failure even though nothing crashed.
    pub fn succeeded(&self) -> bool {
        self.success > 0
    }
}

/// Stateless reconciler for one full-sync run.
///
/// Each invocation is independent: there is no checkpoint, so an aborted
/// run is visible to the next one only through the database content.
pub struct Reconciler {
    directory: Arc<dyn UserDirectory>,
    store: Arc<dyn UserStore>,
    pool_id: Option<String>,
}

impl Reconciler {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn UserStore>,
        pool_id: Option<String>,
    ) -> Self {
        Self {
            directory,
            store,
            pool_id,
        }
    }

    /// Run one full sync over the configured pool.
    ///
    /// Per-entry failures are counted and never abort the run. A failure
    /// while fetching a page stops enumeration but keeps the counts
    /// accumulated so far (partial sync, not total failure).
    pub async fn run(&self) -> SyncCounts {
        let mut counts = SyncCounts::default();

        let Some(pool_id) = self.pool_id.as_deref() else {
            tracing::error!("directory pool id is not configured, cannot run full sync");
            return counts;
        };

        let mut page_token: Option<String> = None;
        loop {
            let page = match self.directory.list_page(pool_id, page_token.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(error = %e, "error during user pagination");
                    break;
                }
            };

            counts.total += page.users.len() as u64;

            for user in &page.users {
                let Some(user_id) = user.username.as_deref() else {
                    tracing::warn!("user without username found, skipping");
                    counts.skipped += 1;
                    continue;
                };

                let Some(email) = user.email() else {
                    tracing::warn!(user_id = %user_id, "email not found for user, skipping");
                    counts.skipped += 1;
                    continue;
                };

                match self.store.upsert_user(user_id, email).await {
                    Ok(()) => {
                        counts.success += 1;
                        tracing::info!(user_id = %user_id, email = %email, "processed user");
                    }
                    Err(e) => {
                        counts.error += 1;
                        tracing::error!(user_id = %user_id, error = %e, "error processing user");
                    }
                }
            }

            match page.page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!(
            total = counts.total,
            success = counts.success,
            errors = counts.error,
            skipped = counts.skipped,
            "sync summary"
        );

        counts
    }
}
