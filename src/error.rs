use thiserror::Error;

/// Failure taxonomy for the gateway.
///
/// Every variant except `Configuration` and `HttpClient` corresponds to a
/// terminal outcome of a single execution attempt; the gateway renders them
/// into [`crate::ExecutionOutcome`] messages instead of returning them, so
/// `execute` itself never fails. `Configuration` and `HttpClient` can only
/// surface at construction time.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Execution limit reached. Sign in to keep running code.")]
    QuotaExceeded,

    #[error("Request timeout: the compiler took longer than {0} seconds to respond.")]
    Timeout(u64),

    #[error("Network error: unable to reach the compiler server. Please check your internet connection.")]
    NetworkUnreachable,

    #[error("{0}")]
    Remote(String),

    #[error("An unexpected error occurred: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
