//! HTTP client for the identity directory admin API.

use reqwest::Client;

use crate::directory::{DirectoryError, UserDirectory};
use crate::models::user::UserPage;

/// Client for the directory's paginated user listing.
pub struct HttpDirectory {
    http_client: Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for HttpDirectory {
    async fn list_page(
        &self,
        pool_id: &str,
        page_token: Option<&str>,
    ) -> Result<UserPage, DirectoryError> {
        let url = format!("{}/pools/{}/users", self.base_url, pool_id);

        let mut request = self.http_client.get(&url);
        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::Status(response.status().as_u16()));
        }

        response
            .json::<UserPage>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))
    }
}
