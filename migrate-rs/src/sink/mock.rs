//! Scripted identity provider for testing
//!
//! Responses are replayed in the order they were scripted; once the script
//! is exhausted every request succeeds with 201. All requests are recorded.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

use super::{ApiResponse, CreateUserRequest, IdentityProvider};
use crate::error::{MigrateError, Result};

enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

/// Mock identity provider
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CreateUserRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn respond(self, response: ApiResponse) -> Self {
        self.push(Scripted::Respond(response))
    }

    /// Queue a transport failure
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Fail(message.into()))
    }

    fn push(self, scripted: Scripted) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(scripted);
        }
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CreateUserRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Email of each request received so far, in order
    pub fn emails(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .flat_map(|request| request.email_address)
            .collect()
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn create_user(&self, request: &CreateUserRequest) -> Result<ApiResponse> {
        debug!("MockProvider: create_user {:?}", request.email_address);

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(MigrateError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                message,
            ))),
            None => Ok(ApiResponse::new(201, r#"{"object":"user"}"#)),
        }
    }
}
