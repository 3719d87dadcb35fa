#![doc(test(attr(deny(warnings))))]

//! Expense Form provides the state, validation, and submission workflow of an
//! expense entry form. Persistence, notifications, and visibility are
//! supplied by the host through small traits and callbacks.

pub mod cli;
pub mod config;
pub mod errors;
pub mod expense;
pub mod forms;
pub mod notify;
pub mod operations;
pub mod storage;
pub mod utils;

pub use errors::{ConfigError, FormError};
pub use expense::{
    ExpenseField, ExpenseForm, ExpenseRecord, FieldErrors, FieldState, FormFields, FormProps,
    Payload, SubmissionIntent, SubmissionState, SubmitButton, SubmitOutcome, ValidationOutcome,
};
pub use notify::{Notifier, Toast, ToastKind, ToastQueue};
pub use operations::{ExpenseOperations, OperationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git_hash = build.git_hash,
            profile = build.profile,
            "Expense form tracing initialized."
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
