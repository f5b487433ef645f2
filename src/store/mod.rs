pub mod postgres;

pub use postgres::PgUserStore;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid database endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Database connection error: {0}")]
    Connect(String),
    #[error("Error upserting user data: {0}")]
    Write(String),
}

/// Write access to the users table.
///
/// The directory is authoritative for email, so the only operation is an
/// idempotent insert-or-update keyed on the user identifier.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the user, or update their email if the row already exists.
    ///
    /// `is_dev` is written `false` on insert and never touched on update.
    async fn upsert_user(&self, user_id: &str, email: &str) -> Result<(), StoreError>;
}
