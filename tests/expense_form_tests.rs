mod common;

use common::{fill, record, RecordingOperations, VisibilityLog};
use expense_form::config::FormConfig;
use expense_form::expense::validation;
use expense_form::{
    ExpenseField, ExpenseForm, FieldErrors, FormFields, SubmissionIntent, SubmitOutcome,
    ToastKind, ToastQueue, ValidationOutcome,
};

fn fields(amount: &str, category: &str, date: &str) -> FormFields {
    FormFields {
        amount: amount.into(),
        category: category.into(),
        description: String::new(),
        date: date.into(),
    }
}

#[test]
fn empty_required_fields_are_reported_exactly() {
    let cases = [
        ("", "AWS", "2024-01-01", [true, false, false]),
        ("5", "", "2024-01-01", [false, true, false]),
        ("5", "AWS", "", [false, false, true]),
        ("", "", "2024-01-01", [true, true, false]),
        ("", "", "", [true, true, true]),
    ];
    for (amount, category, date, expected) in cases {
        let outcome = validation::validate(&fields(amount, category, date));
        assert!(!outcome.is_valid);
        let flagged = [
            outcome.errors.get(ExpenseField::Amount).is_some(),
            outcome.errors.get(ExpenseField::Category).is_some(),
            outcome.errors.get(ExpenseField::Date).is_some(),
        ];
        assert_eq!(flagged, expected, "{amount:?} {category:?} {date:?}");
    }
}

#[test]
fn any_non_empty_values_are_valid() {
    for (amount, category, date) in [
        ("12.50", "AWS", "2024-01-01"),
        ("lots", "?", "next tuesday"),
        (" ", " ", " "),
    ] {
        assert!(validation::validate(&fields(amount, category, date)).is_valid);
    }
}

#[test]
fn documented_example_matches() {
    let outcome = validation::validate(&fields("", "AWS", "2024-01-01"));
    assert_eq!(
        outcome,
        ValidationOutcome {
            is_valid: false,
            errors: FieldErrors {
                amount: "Amount is required".into(),
                category: String::new(),
                date: String::new(),
            },
        }
    );
}

#[test]
fn invalid_submission_makes_no_external_call() {
    let visibility = VisibilityLog::default();
    let mut form = ExpenseForm::mount(visibility.props("apollo"));
    fill(&mut form, "10", "", "2024-01-01");
    let mut ops = RecordingOperations::default();
    let mut toasts = ToastQueue::new();

    let outcome = form.submit(&mut ops, &mut toasts).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(form.errors().category, "Category is required");
    assert_eq!(ops.calls(), 0);
    assert!(toasts.is_empty());
    assert!(visibility.calls().is_empty());
    assert!(form.is_open());
    assert_eq!(form.fields().amount, "10");
}

#[test]
fn create_calls_create_once_without_id() {
    let visibility = VisibilityLog::default();
    let mut form = ExpenseForm::mount(visibility.props("apollo"));
    fill(&mut form, "42", "Hosting", "2024-03-01");
    form.handle_change("description", "VPS").unwrap();
    let mut ops = RecordingOperations::default();
    let mut toasts = ToastQueue::new();

    form.submit(&mut ops, &mut toasts).unwrap();

    assert_eq!(ops.creates.len(), 1);
    assert!(ops.updates.is_empty());
    let payload = &ops.creates[0];
    assert_eq!(payload.id(), None);
    assert_eq!(payload.project_id(), Some("apollo"));
    assert_eq!(payload.field(ExpenseField::Description), "VPS");

    let toast = &toasts.drain()[0];
    assert_eq!(toast.kind, ToastKind::Success);
    assert!(toast.message.contains("added"));
    assert_eq!(visibility.calls(), vec![false]);
}

#[test]
fn update_calls_update_once_with_record_identity() {
    let visibility = VisibilityLog::default();
    let props = visibility.props("apollo").with_record(record("e1", "gemini"));
    let mut form = ExpenseForm::mount(props);
    assert_eq!(form.intent(), SubmissionIntent::UpdateIntent { existing_id: "e1".into() });
    form.update(ExpenseField::Category, "Compute").unwrap();
    let mut ops = RecordingOperations::default();
    let mut toasts = ToastQueue::new();

    form.submit(&mut ops, &mut toasts).unwrap();

    assert!(ops.creates.is_empty());
    assert_eq!(ops.updates.len(), 1);
    let payload = &ops.updates[0];
    assert_eq!(payload.id(), Some("e1"));
    assert_eq!(payload.project_id(), Some("gemini"));
    assert_eq!(payload.field(ExpenseField::Amount), "120");
    assert_eq!(payload.field(ExpenseField::Date), "2024-01-15");
    assert!(toasts.drain()[0].message.contains("updated"));
    assert_eq!(visibility.calls(), vec![false]);
}

#[test]
fn operation_errors_are_shown_verbatim_and_still_close() {
    for record in [None, Some(record("e1", "apollo"))] {
        let visibility = VisibilityLog::default();
        let mut props = visibility.props("apollo");
        if let Some(record) = record {
            props = props.with_record(record);
        }
        let mut form = ExpenseForm::mount(props);
        fill(&mut form, "1", "Misc", "2024-01-01");
        let mut ops = RecordingOperations::failing("Quota exceeded: try again later");
        let mut toasts = ToastQueue::new();

        let outcome = form.submit(&mut ops, &mut toasts).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(ops.calls(), 1);
        let toast = &toasts.drain()[0];
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Quota exceeded: try again later");
        assert_eq!(visibility.calls(), vec![false]);
    }
}

#[test]
fn editing_clears_only_that_fields_error() {
    let mut form = ExpenseForm::mount(VisibilityLog::default().props("apollo"));
    assert!(!form.validate());

    form.handle_change("date", "2024-05-05").unwrap();

    assert_eq!(form.errors().date, "");
    assert_eq!(form.errors().amount, "Amount is required");
    assert_eq!(form.errors().category, "Category is required");
}

#[test]
fn unknown_field_names_are_rejected() {
    let mut form = ExpenseForm::mount(VisibilityLog::default().props("apollo"));
    assert!(form.handle_change("projectId", "other").is_err());
    assert_eq!(form.fields(), &FormFields::default());
}

#[test]
fn passing_validation_clears_every_error() {
    let mut form = ExpenseForm::mount(VisibilityLog::default().props("apollo"));
    assert!(!form.validate());
    assert!(!form.errors().is_empty());

    fill(&mut form, "7", "Travel", "2024-06-01");

    assert!(form.validate());
    assert_eq!(form.errors(), &FieldErrors::default());
}

#[test]
fn revalidation_replaces_format_errors() {
    let config = FormConfig {
        strict_formats: true,
        ..FormConfig::default()
    };
    let props = VisibilityLog::default().props("apollo");
    let mut form = ExpenseForm::mount_with_config(props, &config);
    fill(&mut form, "ten", "Travel", "2024-06-01");
    assert!(!form.validate());
    assert_eq!(form.errors().amount, "Enter a numeric amount");

    form.handle_change("amount", "").unwrap();
    assert!(!form.validate());

    assert_eq!(
        form.errors(),
        &FieldErrors {
            amount: "Amount is required".into(),
            ..FieldErrors::default()
        }
    );
}
