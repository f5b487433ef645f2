//! PostgreSQL users-table store.

use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection};
use url::Url;

use crate::config::DatabaseConfig;
use crate::store::{StoreError, UserStore};

const UPSERT_USER: &str = "\
    INSERT INTO users (id, email, is_dev) \
    VALUES ($1, $2, FALSE) \
    ON CONFLICT (id) \
    DO UPDATE SET email = EXCLUDED.email";

/// PostgreSQL-backed [`UserStore`].
///
/// Each write opens its own connection, runs the single upsert statement
/// and drops the connection. Sync runs are bursty and infrequent, so no
/// pool is held between writes, and no transaction ever spans more than
/// one user row.
#[derive(Debug)]
pub struct PgUserStore {
    connect_options: PgConnectOptions,
}

impl PgUserStore {
    /// Build connect options from configuration.
    ///
    /// Host and port come from the connection-URL-shaped `database.url`;
    /// database name and credentials come from the dedicated fields.
    pub fn from_config(database: &DatabaseConfig) -> Result<Self, StoreError> {
        let endpoint =
            Url::parse(&database.url).map_err(|e| StoreError::InvalidEndpoint(e.to_string()))?;
        let host = endpoint
            .host_str()
            .ok_or_else(|| StoreError::InvalidEndpoint(format!("no host in {}", database.url)))?;

        let mut options = PgConnectOptions::new()
            .host(host)
            .database(&database.name)
            .username(&database.username)
            .password(&database.password);
        if let Some(port) = endpoint.port() {
            options = options.port(port);
        }

        Ok(Self {
            connect_options: options,
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn upsert_user(&self, user_id: &str, email: &str) -> Result<(), StoreError> {
        let mut conn = self
            .connect_options
            .connect()
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let result = sqlx::query(UPSERT_USER)
            .bind(user_id)
            .bind(email)
            .execute(&mut conn)
            .await;

        // Dropping the connection rolls back on error; close politely on
        // success so the server does not accumulate half-open sessions.
        match result {
            Ok(_) => {
                let _ = conn.close().await;
                tracing::debug!(user_id = %user_id, email = %email, "upserted user");
                Ok(())
            }
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }
}
