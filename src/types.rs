use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Wire request sent to the remote compiler service.
///
/// The backend expects the entry-point identifier under the `filename` key;
/// it names the source file after it before compiling.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    /// Language tag, carried through to the backend unchanged
    pub language: String,
    /// Source code to compile and run
    pub code: String,
    /// Input fed to the program's stdin
    pub stdin: String,
    /// Resolved entry-point identifier; never empty
    #[serde(rename = "filename")]
    pub entry_point: String,
}

/// Raw, not-yet-interpreted result of one transport-level call.
///
/// Produced by the client, consumed only by the classifier; never exposed to
/// callers.
#[derive(Debug, Clone)]
pub enum RawEnvelope {
    /// 2xx response; `body` may be `Value::Null` if the payload was not JSON
    Ok { body: Value },
    /// Non-2xx response with whatever body the service attached
    HttpError { status: u16, body: Value },
    /// No response reached the network layer (DNS/connection failure)
    NetworkError,
    /// The client-side timeout elapsed before any response
    Timeout,
}

/// Normalized, caller-facing result of an execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    Success { stdout: String },
    Error { message: String },
}

impl ExecutionOutcome {
    pub fn success(stdout: impl Into<String>) -> Self {
        ExecutionOutcome::Success {
            stdout: stdout.into(),
        }
    }

    /// Render a failure into the outcome shape using its display message.
    pub fn failure(error: &Error) -> Self {
        ExecutionOutcome::Error {
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }
}

/// Expected shape of a 2xx body from the remote service.
///
/// The service reports program and compile failures inside a 200 response
/// via `data.error`, not via HTTP status, so both `output` and `error` are
/// optional here and the classifier decides which one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub data: RemoteData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteData {
    pub output: Option<String>,
    pub error: Option<String>,
    pub code_status: Option<CodeStatus>,
    pub time: Option<String>,
    pub memory: Option<u64>,
}

/// Backend-assigned status code for the run, forwarded verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeStatus {
    pub id: i64,
    pub description: String,
}
