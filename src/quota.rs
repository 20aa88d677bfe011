use serde::{Deserialize, Serialize};

/// Number of executions granted to an unauthenticated caller.
pub const ANONYMOUS_EXECUTION_LIMIT: u32 = 10;

/// Per-session execution quota.
///
/// A value object: transitions return a new state instead of mutating in
/// place, and the layer that owns the session lifetime decides where the
/// state lives. Quota is spent on usage of the gateway, not on success of
/// the program, so [`QuotaState::consume`] increments unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    pub count: u32,
    pub limit: u32,
    /// Epoch seconds at which the owning layer may reset the counter.
    /// Nothing in this crate acts on it: exhaustion is terminal until an
    /// external state change such as sign-in.
    pub reset_at: Option<u64>,
}

impl QuotaState {
    pub fn new(limit: u32) -> Self {
        Self {
            count: 0,
            limit,
            reset_at: None,
        }
    }

    /// Whether another execution is admitted.
    pub fn can_execute(&self) -> bool {
        self.count < self.limit
    }

    /// Record one dispatched attempt, regardless of its outcome.
    #[must_use]
    pub fn consume(self) -> Self {
        Self {
            count: self.count.saturating_add(1),
            ..self
        }
    }

    /// Executions left before exhaustion, for display by the caller.
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.count)
    }
}

impl Default for QuotaState {
    fn default() -> Self {
        Self::new(ANONYMOUS_EXECUTION_LIMIT)
    }
}
