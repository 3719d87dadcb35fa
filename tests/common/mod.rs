#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use expense_form::{
    ExpenseForm, ExpenseOperations, ExpenseRecord, FormProps, OperationError, Payload,
};

/// Records every payload handed to the operations and optionally fails them.
#[derive(Default)]
pub struct RecordingOperations {
    pub creates: Vec<Payload>,
    pub updates: Vec<Payload>,
    pub fail_with: Option<String>,
}

impl RecordingOperations {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.creates.len() + self.updates.len()
    }

    fn result(&self) -> Result<(), OperationError> {
        match &self.fail_with {
            Some(message) => Err(OperationError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl ExpenseOperations for RecordingOperations {
    fn create(&mut self, payload: &Payload) -> Result<(), OperationError> {
        self.creates.push(payload.clone());
        self.result()
    }

    fn update(&mut self, payload: &Payload) -> Result<(), OperationError> {
        self.updates.push(payload.clone());
        self.result()
    }
}

/// Collects every value the form passes to its visibility callback.
#[derive(Clone, Default)]
pub struct VisibilityLog(Rc<RefCell<Vec<bool>>>);

impl VisibilityLog {
    pub fn props(&self, project_id: &str) -> FormProps<'static> {
        let log = Rc::clone(&self.0);
        FormProps::new(project_id, move |open| log.borrow_mut().push(open))
    }

    pub fn calls(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }
}

pub fn record(id: &str, project_id: &str) -> ExpenseRecord {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    ExpenseRecord {
        id: id.to_string(),
        project_id: project_id.to_string(),
        amount: 120.0,
        category: "AWS Fees".to_string(),
        description: Some("January invoice".to_string()),
        date: at,
        created_at: at,
        updated_at: at,
    }
}

pub fn fill(form: &mut ExpenseForm<'_>, amount: &str, category: &str, date: &str) {
    form.handle_change("amount", amount).unwrap();
    form.handle_change("category", category).unwrap();
    form.handle_change("date", date).unwrap();
}
