use std::fmt;

use async_trait::async_trait;

use super::types::{NavbarForm, NavbarRecord};

/// Errors that can occur while talking to the navbar collection service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Client misconfigured (bad base URL, TLS init failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-2xx status. `message` is whatever could be
    /// pulled out of the body, if anything.
    Api { status: u16, message: Option<String> },
    /// A 2xx body that could not be decoded.
    Parse(String),
}

impl ServiceError {
    /// True for failures where the request never produced a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ServiceError::Config(_) | ServiceError::Network(_) | ServiceError::Parse(_)
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api {
                status,
                message: Some(message),
            } => write!(f, "API error (HTTP {status}): {message}"),
            ServiceError::Api {
                status,
                message: None,
            } => write!(f, "API error (HTTP {status})"),
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The remote navbar collection.
///
/// Create and update return `Ok(None)` when the service acknowledged the
/// write but its body was not a recognizable record.
#[async_trait]
pub trait NavbarService: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    async fn list(&self) -> Result<Vec<NavbarRecord>, ServiceError>;

    async fn create(&self, form: NavbarForm) -> Result<Option<NavbarRecord>, ServiceError>;

    async fn update(
        &self,
        id: &str,
        form: NavbarForm,
    ) -> Result<Option<NavbarRecord>, ServiceError>;

    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
