pub mod config;
pub mod directory;
pub mod models;
pub mod routes;
pub mod store;
pub mod sync;
pub mod test_util;

pub use config::Config;
pub use directory::{DirectoryError, HttpDirectory, UserDirectory};
pub use models::event::SyncResponse;
pub use store::{PgUserStore, StoreError, UserStore};
pub use sync::{Dispatch, Reconciler, SingleSyncError, SyncCounts};

use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn UserStore>,
    pub directory: Arc<dyn UserDirectory>,
}
