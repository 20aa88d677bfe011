use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::Error,
    types::{ExecutionOutcome, RawEnvelope, RemoteResponse},
};

/// Success message when the program produced no output at all.
pub const NO_OUTPUT_MESSAGE: &str = "Code executed successfully with no output";

/// Fallback when an error status carries no recognizable error text.
const GENERIC_COMPILE_ERROR: &str = "Compilation error occurred";

/// Body locations where the remote service nests its own error text,
/// probed in order. The service wraps upstream compiler responses, so the
/// field shows up at either depth depending on which layer failed.
const ERROR_FIELD_PATHS: [&str; 2] = ["/data/error", "/error"];

/// Turns raw envelopes into the stable, caller-facing outcome taxonomy.
///
/// Total over every envelope shape the client can produce: classification
/// never panics and never returns a `Result`. The one inversion to preserve
/// is that the remote service signals program and compile failures inside a
/// 200 response via `data.error`, not via HTTP status.
pub struct ResultClassifier {
    timeout: Duration,
}

impl ResultClassifier {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn classify(&self, envelope: RawEnvelope) -> ExecutionOutcome {
        match envelope {
            RawEnvelope::Timeout => {
                ExecutionOutcome::failure(&Error::Timeout(self.timeout.as_secs()))
            }
            RawEnvelope::NetworkError => ExecutionOutcome::failure(&Error::NetworkUnreachable),
            RawEnvelope::HttpError { status, body } => {
                debug!(status, "classifying http error response");
                let message = nested_error_text(&body)
                    .unwrap_or_else(|| GENERIC_COMPILE_ERROR.to_string());
                ExecutionOutcome::failure(&Error::Remote(message))
            }
            RawEnvelope::Ok { body } => self.classify_ok_body(body),
        }
    }

    fn classify_ok_body(&self, body: Value) -> ExecutionOutcome {
        let response: RemoteResponse = match serde_json::from_value(body) {
            Ok(response) => response,
            Err(err) => {
                return ExecutionOutcome::failure(&Error::MalformedResponse(err.to_string()))
            }
        };

        if let Some(error) = response.data.error.filter(|e| !e.is_empty()) {
            return ExecutionOutcome::failure(&Error::Remote(error));
        }

        match response.data.output {
            Some(output) => ExecutionOutcome::success(output),
            None => ExecutionOutcome::success(NO_OUTPUT_MESSAGE),
        }
    }
}

/// First non-empty error string found at a known nesting depth.
fn nested_error_text(body: &Value) -> Option<String> {
    ERROR_FIELD_PATHS
        .iter()
        .filter_map(|path| body.pointer(path))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
