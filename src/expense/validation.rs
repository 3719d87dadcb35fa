use crate::expense::fields::{ExpenseField, FieldErrors, FormFields};

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

/// Presence check for amount, category, and date.
///
/// Values are never trimmed: `" "` counts as filled in. With
/// `strict_formats` enabled, non-empty amounts must parse as numbers and
/// non-empty dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseValidator {
    strict_formats: bool,
}

impl ExpenseValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_formats(strict_formats: bool) -> Self {
        Self { strict_formats }
    }

    pub fn validate(&self, fields: &FormFields) -> ValidationOutcome {
        let mut errors = FieldErrors::default();
        for field in ExpenseField::ALL {
            if let Err(err) = field
                .descriptor()
                .check(fields.get(field), self.strict_formats)
            {
                errors.set(field, err.message);
            }
        }
        ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates with the default (presence-only) rules.
pub fn validate(fields: &FormFields) -> ValidationOutcome {
    ExpenseValidator::new().validate(fields)
}
