//! The expense entry form component.
//!
//! [`ExpenseForm`] owns the field state for one open of the form. The host
//! supplies the project, an optional record to edit, and a visibility
//! callback through [`FormProps`]; persistence and notifications are passed
//! to [`ExpenseForm::submit`] as trait objects or generics.

use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::errors::FormError;
use crate::expense::fields::{ExpenseField, FieldErrors, FieldState, FormFields};
use crate::expense::payload::{Payload, SubmissionIntent};
use crate::expense::record::ExpenseRecord;
use crate::expense::validation::ExpenseValidator;
use crate::notify::Notifier;
use crate::operations::ExpenseOperations;

/// Inputs handed down by the parent that owns the form's visibility.
pub struct FormProps<'a> {
    pub project_id: String,
    pub set_open: Box<dyn FnMut(bool) + 'a>,
    pub expense_record: Option<ExpenseRecord>,
}

impl<'a> FormProps<'a> {
    pub fn new(project_id: impl Into<String>, set_open: impl FnMut(bool) + 'a) -> Self {
        Self {
            project_id: project_id.into(),
            set_open: Box::new(set_open),
            expense_record: None,
        }
    }

    pub fn with_record(mut self, record: ExpenseRecord) -> Self {
        self.expense_record = Some(record);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    Succeeded { intent: SubmissionIntent },
    Failed {
        intent: SubmissionIntent,
        message: String,
    },
}

/// Label contract for the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub pending_label: &'static str,
    pub pending: bool,
}

impl SubmitButton {
    pub fn text(&self) -> &'static str {
        if self.pending {
            self.pending_label
        } else {
            self.label
        }
    }
}

pub struct ExpenseForm<'a> {
    project_id: String,
    record: Option<ExpenseRecord>,
    set_open: Box<dyn FnMut(bool) + 'a>,
    state: FieldState,
    validator: ExpenseValidator,
    submission: SubmissionState,
    open: bool,
}

impl<'a> ExpenseForm<'a> {
    /// Opens the form with presence-only validation.
    pub fn mount(props: FormProps<'a>) -> Self {
        Self::build(props, ExpenseValidator::new())
    }

    pub fn mount_with_config(props: FormProps<'a>, config: &FormConfig) -> Self {
        Self::build(
            props,
            ExpenseValidator::with_strict_formats(config.strict_formats),
        )
    }

    fn build(props: FormProps<'a>, validator: ExpenseValidator) -> Self {
        let state = match &props.expense_record {
            Some(record) => FieldState::from_record(record),
            None => FieldState::blank(),
        };
        Self {
            project_id: props.project_id,
            record: props.expense_record,
            set_open: props.set_open,
            state,
            validator,
            submission: SubmissionState::Idle,
            open: true,
        }
    }

    pub fn intent(&self) -> SubmissionIntent {
        match &self.record {
            Some(record) => SubmissionIntent::UpdateIntent {
                existing_id: record.id.clone(),
            },
            None => SubmissionIntent::CreateIntent,
        }
    }

    pub fn fields(&self) -> &FormFields {
        self.state.fields()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn state(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn record(&self) -> Option<&ExpenseRecord> {
        self.record.as_ref()
    }

    /// Project the payload is filed under. Edits keep the record's own
    /// project.
    pub fn project_id(&self) -> &str {
        self.record
            .as_ref()
            .map(|record| record.project_id.as_str())
            .unwrap_or(&self.project_id)
    }

    pub fn submit_button(&self) -> SubmitButton {
        let (label, pending_label) = if self.record.is_some() {
            ("Edit", "Editing...")
        } else {
            ("Add Expense", "Adding...")
        };
        SubmitButton {
            label,
            pending_label,
            pending: self.submission == SubmissionState::Submitting,
        }
    }

    pub fn update(
        &mut self,
        field: ExpenseField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure_open()?;
        self.state.update(field, value);
        debug!(field = field.key(), "expense field updated");
        Ok(())
    }

    /// String-keyed variant of [`ExpenseForm::update`] for hosts that only
    /// know input names.
    pub fn handle_change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let field: ExpenseField = name.parse()?;
        self.update(field, value)
    }

    /// Runs a validation pass and replaces the whole error state with it.
    pub fn validate(&mut self) -> bool {
        let outcome = self.validator.validate(self.state.fields());
        self.state.replace_errors(outcome.errors);
        outcome.is_valid
    }

    /// Validates and, when valid, dispatches to the create or update
    /// operation. The form closes once the call settles, whatever its result.
    pub fn submit<O, N>(
        &mut self,
        operations: &mut O,
        notifier: &mut N,
    ) -> Result<SubmitOutcome, FormError>
    where
        O: ExpenseOperations + ?Sized,
        N: Notifier + ?Sized,
    {
        self.ensure_open()?;

        self.submission = SubmissionState::Validating;
        if !self.validate() {
            self.submission = SubmissionState::Idle;
            warn!(errors = ?self.state.errors(), "expense form validation failed");
            return Ok(SubmitOutcome::Invalid(self.state.errors().clone()));
        }

        let intent = self.intent();
        let payload = Payload::build(self.state.fields(), self.project_id(), &intent);
        self.state.reset();

        self.submission = SubmissionState::Submitting;
        info!(
            project_id = payload.project_id().unwrap_or_default(),
            update = intent.is_update(),
            "submitting expense"
        );
        let result = match intent {
            SubmissionIntent::CreateIntent => operations.create(&payload),
            SubmissionIntent::UpdateIntent { .. } => operations.update(&payload),
        };

        let outcome = match result {
            Ok(()) => {
                let message = intent.success_message();
                info!("{message}");
                notifier.notify_success(&message);
                SubmitOutcome::Succeeded { intent }
            }
            Err(err) => {
                warn!(error = %err, "expense operation failed");
                notifier.notify_error(&err.message);
                SubmitOutcome::Failed {
                    intent,
                    message: err.message,
                }
            }
        };

        self.submission = SubmissionState::Settled;
        self.close();
        Ok(outcome)
    }

    /// Closes the form without submitting.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        debug!("expense form cancelled");
        self.close();
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        (self.set_open)(false);
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.open {
            Ok(())
        } else {
            Err(FormError::FormClosed)
        }
    }
}
