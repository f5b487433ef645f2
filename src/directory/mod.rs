pub mod http;

pub use http::HttpDirectory;

use async_trait::async_trait;

use crate::models::user::UserPage;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    RequestFailed(String),
    #[error("Directory returned status {0}")]
    Status(u16),
    #[error("Invalid directory response: {0}")]
    InvalidResponse(String),
}

/// Paginated read access to an identity directory's user listing.
///
/// Pagination is driven entirely by the directory's opaque page token: a
/// `None` token fetches the first page, and a page without a token is the
/// last one. There is no way to resume a listing after a failed fetch.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_page(
        &self,
        pool_id: &str,
        page_token: Option<&str>,
    ) -> Result<UserPage, DirectoryError>;
}
