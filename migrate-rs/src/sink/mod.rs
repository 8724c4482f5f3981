//! Sink side of the migration: account creation at the identity provider
//!
//! Each user is attempted exactly once. Whatever happens to one user is
//! captured as a [`MigrationOutcome`], so the loop in
//! [`AccountMigrator::migrate_all`] always reaches the end of the batch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::credential::{generate_password, GeneratedCredential};
use crate::error::Result;
use crate::source::UserRecord;

pub mod clerk;
pub mod mock;

pub use clerk::ClerkClient;

/// Body of a create-user request
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email_address: Vec<String>,
    pub first_name: Option<String>,
    pub password: GeneratedCredential,
}

impl CreateUserRequest {
    pub fn for_user(user: &UserRecord, password: GeneratedCredential) -> Self {
        Self {
            email_address: vec![user.email.clone()],
            first_name: user.display_name.clone(),
            password,
        }
    }
}

/// Raw response from the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Account creation endpoint
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Send one create-user request.
    ///
    /// `Err` means the request did not complete at the transport level; any
    /// HTTP status, success or not, is an `Ok`.
    async fn create_user(&self, request: &CreateUserRequest) -> Result<ApiResponse>;
}

/// Result of migrating one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Account created (2xx)
    Created,
    /// The provider already has an account for this email
    AlreadyExists,
    /// Rejected with 422 for another reason
    ValidationError(String),
    /// Any other non-success status
    HttpError { status: u16, body: String },
    /// The request never produced a response
    NetworkError(String),
}

impl MigrationOutcome {
    /// Log this outcome for `email`
    pub fn report(&self, email: &str) {
        match self {
            Self::Created => info!("Successfully created user {} in Clerk.", email),
            Self::AlreadyExists => info!("User {} already exists in Clerk. Skipping.", email),
            Self::ValidationError(details) => {
                error!("Error creating user {} in Clerk (HTTP 422): {}", email, details)
            }
            Self::HttpError { status, body } => {
                error!("HTTP Error creating user {} in Clerk: status {}", email, status);
                error!("Response: {}", body);
            }
            Self::NetworkError(details) => {
                error!("Network or request error creating user {} in Clerk: {}", email, details)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    long_message: Option<String>,
}

impl ErrorEntry {
    fn is_duplicate_email(&self) -> bool {
        self.long_message
            .as_deref()
            .map(|msg| msg.contains("email_address") && msg.contains("already exists"))
            .unwrap_or(false)
    }
}

/// Classify a provider response
pub fn classify(response: &ApiResponse) -> MigrationOutcome {
    match response.status {
        200..=299 => MigrationOutcome::Created,
        422 => match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) if body.errors.iter().any(ErrorEntry::is_duplicate_email) => {
                MigrationOutcome::AlreadyExists
            }
            _ => MigrationOutcome::ValidationError(response.body.clone()),
        },
        status => MigrationOutcome::HttpError {
            status,
            body: response.body.clone(),
        },
    }
}

/// Creates one provider account per user, strictly in sequence
pub struct AccountMigrator<P> {
    provider: P,
    password_length: usize,
}

impl<P: IdentityProvider> AccountMigrator<P> {
    pub fn new(provider: P, password_length: usize) -> Self {
        Self {
            provider,
            password_length,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Attempt to create the account for one user
    pub async fn migrate_user(&self, user: &UserRecord) -> MigrationOutcome {
        info!("Processing user: {}...", user.email);

        let password = generate_password(self.password_length);
        let request = CreateUserRequest::for_user(user, password);

        let outcome = match self.provider.create_user(&request).await {
            Ok(response) => classify(&response),
            Err(e) => MigrationOutcome::NetworkError(e.to_string()),
        };

        outcome.report(&user.email);
        outcome
    }

    /// Attempt every user in order; one outcome per user
    pub async fn migrate_all(&self, users: &[UserRecord]) -> Vec<MigrationOutcome> {
        let mut outcomes = Vec::with_capacity(users.len());
        for user in users {
            outcomes.push(self.migrate_user(user).await);
        }
        outcomes
    }
}
