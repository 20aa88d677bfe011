use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    classifier::ResultClassifier,
    client::{Dispatch, ExecutionClient},
    config::GatewayConfig,
    error::Error,
    quota::QuotaState,
    resolver::EntryPointResolver,
    types::{ExecutionOutcome, ExecutionRequest},
};

/// Orchestrates one execution attempt end to end: admit against the quota,
/// resolve the entry point, dispatch to the remote service, classify the
/// envelope, settle.
///
/// `execute` never fails: every path, including quota denial and every
/// transport failure, settles into an [`ExecutionOutcome`]. One gateway
/// instance corresponds to one caller session; the quota counter is owned
/// here and guarded by a lock so concurrent calls cannot lose increments.
/// Concurrent calls are otherwise uncoordinated: two rapid invocations are
/// two independent in-flight requests, each consuming quota on its own.
pub struct ExecutionGateway {
    dispatcher: Arc<dyn Dispatch>,
    resolver: EntryPointResolver,
    classifier: ResultClassifier,
    quota: Mutex<QuotaState>,
    /// Set by the external authentication collaborator; authenticated
    /// callers bypass the quota entirely.
    authenticated: AtomicBool,
    language: String,
    session_id: Uuid,
}

impl ExecutionGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, Error> {
        let client = ExecutionClient::new(&config)?;
        Ok(Self::with_dispatcher(Arc::new(client), config))
    }

    /// Wire in an alternative transport. This is the seam tests use to
    /// count dispatches without a network.
    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatch>, config: GatewayConfig) -> Self {
        Self {
            dispatcher,
            resolver: EntryPointResolver::new(),
            classifier: ResultClassifier::new(config.timeout),
            quota: Mutex::new(QuotaState::new(config.quota_limit)),
            authenticated: AtomicBool::new(false),
            language: config.language,
            session_id: Uuid::new_v4(),
        }
    }

    /// Run one source file remotely and settle into an outcome.
    pub async fn execute(&self, source: &str, stdin: Option<&str>) -> ExecutionOutcome {
        let authenticated = self.is_authenticated();

        // Admitting. Denial short-circuits before anything is spent: no
        // entry-point resolution, no network call, no quota consumption.
        if !authenticated {
            let quota = self.quota.lock().await;
            if !quota.can_execute() {
                info!(
                    session = %self.session_id,
                    used = quota.count,
                    limit = quota.limit,
                    "execution denied, quota exhausted"
                );
                return ExecutionOutcome::failure(&Error::QuotaExceeded);
            }
        }

        // Dispatching.
        let request = ExecutionRequest {
            language: self.language.clone(),
            code: source.to_string(),
            stdin: stdin.unwrap_or_default().to_string(),
            entry_point: self.resolver.resolve(source),
        };

        debug!(
            session = %self.session_id,
            entry_point = %request.entry_point,
            "starting remote execution"
        );

        let envelope = self.dispatcher.dispatch(&request).await;

        // Quota is spent on having dispatched, not on the program having
        // succeeded, so consume before looking at the envelope.
        if !authenticated {
            let mut quota = self.quota.lock().await;
            *quota = quota.consume();
            debug!(
                session = %self.session_id,
                remaining = quota.remaining(),
                "quota consumed"
            );
        }

        // Classifying, then Settled.
        let outcome = self.classifier.classify(envelope);
        match &outcome {
            ExecutionOutcome::Success { .. } => {
                info!(session = %self.session_id, "execution completed successfully");
            }
            ExecutionOutcome::Error { message } => {
                error!(session = %self.session_id, "execution failed: {message}");
            }
        }

        outcome
    }

    /// Flip the externally-owned authentication state for this session.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::Relaxed);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Relaxed)
    }

    /// Snapshot of the session quota, for display by the caller.
    pub async fn quota(&self) -> QuotaState {
        *self.quota.lock().await
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}
