use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::errors::FormError;
use crate::expense::record::ExpenseRecord;
use crate::forms::{FieldDescriptor, FieldKind, FormDescriptor};

/// The four fields the expense form knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Amount,
    Category,
    Description,
    Date,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 4] = [
        ExpenseField::Amount,
        ExpenseField::Category,
        ExpenseField::Description,
        ExpenseField::Date,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExpenseField::Amount => "amount",
            ExpenseField::Category => "category",
            ExpenseField::Description => "description",
            ExpenseField::Date => "date",
        }
    }

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &EXPENSE_FORM.fields[self as usize]
    }

    /// Whether the field owns an error slot in [`FieldErrors`].
    pub fn is_required(self) -> bool {
        self.descriptor().required
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExpenseField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Field layout of the expense form, in [`ExpenseField`] order.
pub static EXPENSE_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    FormDescriptor::new(
        "expense",
        vec![
            FieldDescriptor::new("amount", "Amount", FieldKind::Decimal).with_placeholder("0.00"),
            FieldDescriptor::new("category", "Category", FieldKind::Text)
                .with_placeholder("AWS Fees"),
            FieldDescriptor::new("description", "Description", FieldKind::MultilineText)
                .with_optional(),
            FieldDescriptor::new("date", "Date", FieldKind::Date),
        ],
    )
});

/// Current raw values of the form. Nothing here is typed or validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
}

impl FormFields {
    /// Prefills from a stored record. The amount keeps every digit so an
    /// untouched field submits the same value back.
    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            amount: record.amount.to_string(),
            category: record.category.clone(),
            description: record.description.clone().unwrap_or_default(),
            date: record.calendar_date().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn get(&self, field: ExpenseField) -> &str {
        match field {
            ExpenseField::Amount => &self.amount,
            ExpenseField::Category => &self.category,
            ExpenseField::Description => &self.description,
            ExpenseField::Date => &self.date,
        }
    }

    fn slot_mut(&mut self, field: ExpenseField) -> &mut String {
        match field {
            ExpenseField::Amount => &mut self.amount,
            ExpenseField::Category => &mut self.category,
            ExpenseField::Description => &mut self.description,
            ExpenseField::Date => &mut self.date,
        }
    }
}

/// Per-field messages. An empty string means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl FieldErrors {
    /// Message for `field`; description never has one.
    pub fn get(&self, field: ExpenseField) -> Option<&str> {
        match field {
            ExpenseField::Amount => Some(self.amount.as_str()),
            ExpenseField::Category => Some(self.category.as_str()),
            ExpenseField::Date => Some(self.date.as_str()),
            ExpenseField::Description => None,
        }
        .filter(|message| !message.is_empty())
    }

    pub fn set(&mut self, field: ExpenseField, message: impl Into<String>) {
        if let Some(slot) = self.slot_mut(field) {
            *slot = message.into();
        }
    }

    pub fn clear(&mut self, field: ExpenseField) {
        if let Some(slot) = self.slot_mut(field) {
            slot.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty() && self.category.is_empty() && self.date.is_empty()
    }

    fn slot_mut(&mut self, field: ExpenseField) -> Option<&mut String> {
        match field {
            ExpenseField::Amount => Some(&mut self.amount),
            ExpenseField::Category => Some(&mut self.category),
            ExpenseField::Date => Some(&mut self.date),
            ExpenseField::Description => None,
        }
    }
}

/// Value store behind the form. Updates never validate.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    fields: FormFields,
    errors: FieldErrors,
}

impl FieldState {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            fields: FormFields::from_record(record),
            errors: FieldErrors::default(),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replaces one value and clears that field's error. Other errors stay.
    pub fn update(&mut self, field: ExpenseField, value: impl Into<String>) {
        *self.fields.slot_mut(field) = value.into();
        self.errors.clear(field);
    }

    pub fn replace_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Blanks every value. Errors are left as they are.
    pub fn reset(&mut self) {
        self.fields = FormFields::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> ExpenseRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        ExpenseRecord {
            id: "e1".into(),
            project_id: "p1".into(),
            amount: 19.5,
            category: "AWS".into(),
            description: None,
            date: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn parses_only_known_field_names() {
        assert_eq!("amount".parse::<ExpenseField>().unwrap(), ExpenseField::Amount);
        assert_eq!("date".parse::<ExpenseField>().unwrap(), ExpenseField::Date);
        assert!(matches!(
            "Amount".parse::<ExpenseField>(),
            Err(FormError::UnknownField(name)) if name == "Amount"
        ));
        assert!("projectId".parse::<ExpenseField>().is_err());
    }

    #[test]
    fn descriptors_line_up_with_fields() {
        for field in ExpenseField::ALL {
            assert_eq!(field.descriptor().key, field.key());
        }
        let keys: Vec<_> = EXPENSE_FORM.keys().collect();
        assert_eq!(keys, ["amount", "category", "description", "date"]);
        assert!(!ExpenseField::Description.is_required());
        assert!(ExpenseField::Amount.is_required());
    }

    #[test]
    fn prefills_from_record() {
        let state = FieldState::from_record(&record());
        assert_eq!(
            state.fields(),
            &FormFields {
                amount: "19.5".into(),
                category: "AWS".into(),
                description: String::new(),
                date: "2024-01-15".into(),
            }
        );
        assert!(state.errors().is_empty());
    }

    #[test]
    fn update_clears_only_the_edited_field_error() {
        let mut state = FieldState::blank();
        state.replace_errors(FieldErrors {
            amount: "Amount is required".into(),
            category: "Category is required".into(),
            date: "Date is required".into(),
        });

        state.update(ExpenseField::Category, "Hosting");

        assert_eq!(state.fields().category, "Hosting");
        assert_eq!(state.errors().category, "");
        assert_eq!(state.errors().amount, "Amount is required");
        assert_eq!(state.errors().date, "Date is required");
    }

    #[test]
    fn description_update_leaves_errors_alone() {
        let mut state = FieldState::blank();
        state.replace_errors(FieldErrors {
            amount: "Amount is required".into(),
            ..FieldErrors::default()
        });
        state.update(ExpenseField::Description, "monthly bill");
        assert_eq!(state.errors().amount, "Amount is required");
        assert_eq!(state.errors().get(ExpenseField::Description), None);
    }

    #[test]
    fn prefill_keeps_full_amount_precision() {
        let mut precise = record();
        precise.amount = 12.345;
        assert_eq!(FormFields::from_record(&precise).amount, "12.345");
        precise.amount = 120.0;
        assert_eq!(FormFields::from_record(&precise).amount, "120");
    }

    #[test]
    fn error_lookup_skips_empty_messages() {
        let errors = FieldErrors {
            amount: "Amount is required".into(),
            ..FieldErrors::default()
        };
        assert_eq!(errors.get(ExpenseField::Amount), Some("Amount is required"));
        assert_eq!(errors.get(ExpenseField::Category), None);
        assert_eq!(errors.get(ExpenseField::Description), None);
    }

    #[test]
    fn reset_blanks_values() {
        let mut state = FieldState::from_record(&record());
        state.reset();
        assert_eq!(state.fields(), &FormFields::default());
    }
}
