//! Plain-text rendering of the open form.

use crate::expense::{ExpenseField, ExpenseForm};
use crate::forms::{FieldDescriptor, FieldKind};

const LABEL_WIDTH: usize = 22;

pub fn title(form: &ExpenseForm<'_>) -> String {
    match form.record() {
        Some(record) => format!("Edit Expense {}", record.id),
        None => format!("Add Expense for {}", form.project_id()),
    }
}

/// Title, one line per field with its error underneath, then the button.
pub fn render_form(form: &ExpenseForm<'_>, currency: &str) -> Vec<String> {
    let mut lines = vec![title(form)];
    for field in ExpenseField::ALL {
        let descriptor = field.descriptor();
        let value = form.fields().get(field);
        let shown = match descriptor.placeholder {
            Some(placeholder) if value.is_empty() => format!("<{placeholder}>"),
            _ => value.to_string(),
        };
        let line = format!(
            "  {:<width$}: {}",
            field_label(descriptor, currency),
            shown,
            width = LABEL_WIDTH
        );
        lines.push(line.trim_end().to_string());
        if let Some(message) = form.errors().get(field) {
            lines.push(format!("    ! {message}"));
        }
    }
    lines.push(format!("  [ {} ]", form.submit_button().text()));
    lines
}

fn field_label(descriptor: &FieldDescriptor, currency: &str) -> String {
    match descriptor.kind {
        FieldKind::Decimal => format!("{} ({})", descriptor.label, currency),
        FieldKind::Date => format!("{} (YYYY-MM-DD)", descriptor.label),
        _ if !descriptor.required => format!("{} (optional)", descriptor.label),
        _ => descriptor.label.to_string(),
    }
}
