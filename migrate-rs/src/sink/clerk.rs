//! Clerk Backend API client
//!
//! Only the create-user endpoint is used. Requests carry the secret key as a
//! bearer token and rely on the client's default timeouts.

use async_trait::async_trait;
use tracing::debug;

use super::{ApiResponse, CreateUserRequest, IdentityProvider};
use crate::config::IdentityConfig;
use crate::error::Result;

/// Clerk identity provider
pub struct ClerkClient {
    base_url: String,
    secret_key: String,
    client: reqwest::Client,
}

impl ClerkClient {
    pub fn new(config: &IdentityConfig, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// URL of the create-user endpoint
    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for ClerkClient {
    async fn create_user(&self, request: &CreateUserRequest) -> Result<ApiResponse> {
        let url = self.users_url();
        debug!("ClerkClient: POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("ClerkClient: received status {}", status);

        Ok(ApiResponse { status, body })
    }
}
