//! Boundary to the persistence collaborator that creates and updates records.

use thiserror::Error;

use crate::expense::Payload;

/// Failure reported by an external operation. The message is shown to the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OperationError {
    pub message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create/update operations the form dispatches to.
///
/// Both receive the same flat payload. `update` payloads always carry `id`.
pub trait ExpenseOperations {
    fn create(&mut self, payload: &Payload) -> Result<(), OperationError>;

    fn update(&mut self, payload: &Payload) -> Result<(), OperationError>;
}
