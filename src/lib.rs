//! # Remote Execution Gateway
//!
//! Client-side gateway for compiling and running single-file programs on a
//! remote execution backend the caller does not control. Resolves an
//! entry-point identifier from raw source text, dispatches the request with
//! a bounded timeout, classifies every response and failure shape into one
//! stable outcome type, and gates unauthenticated callers behind a
//! per-session execution quota.

mod classifier;
mod client;
mod config;
mod error;
mod gateway;
mod quota;
mod resolver;
mod types;

pub use classifier::{ResultClassifier, NO_OUTPUT_MESSAGE};
pub use client::{Dispatch, ExecutionClient};
pub use config::{GatewayConfig, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
pub use error::Error;
pub use gateway::ExecutionGateway;
pub use quota::{QuotaState, ANONYMOUS_EXECUTION_LIMIT};
pub use resolver::{EntryPointResolver, DEFAULT_ENTRY_POINT};
pub use types::{
    CodeStatus, ExecutionOutcome, ExecutionRequest, RawEnvelope, RemoteData, RemoteResponse,
};

/// Result type for gateway construction and configuration.
pub type Result<T> = std::result::Result<T, Error>;
