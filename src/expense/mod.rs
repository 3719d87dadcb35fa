//! The expense entry form: field state, validation, and submission.

pub mod fields;
pub mod form;
pub mod payload;
pub mod record;
pub mod validation;

pub use fields::{ExpenseField, FieldErrors, FieldState, FormFields};
pub use form::{ExpenseForm, FormProps, SubmissionState, SubmitButton, SubmitOutcome};
pub use payload::{Payload, SubmissionIntent};
pub use record::ExpenseRecord;
pub use validation::{ExpenseValidator, ValidationOutcome};
