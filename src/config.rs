use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{error::Error, quota::ANONYMOUS_EXECUTION_LIMIT};

/// Bound on a single remote call, request through response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Language tag sent to the backend when none is configured.
pub const DEFAULT_LANGUAGE: &str = "java";

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Full URL of the remote compile-and-run endpoint
    pub endpoint: String,

    /// Language tag, carried through to the backend unchanged
    pub language: String,

    /// Client-side timeout for the remote call
    pub timeout: Duration,

    /// Execution ceiling for unauthenticated callers
    pub quota_limit: u32,
}

impl GatewayConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            quota_limit: ANONYMOUS_EXECUTION_LIMIT,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_quota_limit(mut self, quota_limit: u32) -> Self {
        self.quota_limit = quota_limit;
        self
    }

    /// Reject configurations that cannot possibly dispatch.
    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Configuration(
                "compiler endpoint is not configured".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
