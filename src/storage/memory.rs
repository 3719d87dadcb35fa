use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::expense::{ExpenseField, ExpenseRecord, Payload};
use crate::operations::{ExpenseOperations, OperationError};

/// Process-local expense store. Records live in creation order.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    records: Vec<ExpenseRecord>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn for_project<'a>(
        &'a self,
        project_id: &'a str,
    ) -> impl Iterator<Item = &'a ExpenseRecord> {
        self.records
            .iter()
            .filter(move |record| record.project_id == project_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ExpenseOperations for InMemoryExpenseStore {
    fn create(&mut self, payload: &Payload) -> Result<(), OperationError> {
        let project_id = payload
            .project_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| OperationError::new("Project is required"))?;
        let values = ParsedValues::from_payload(payload)?;
        let now = Utc::now();
        let record = ExpenseRecord {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            amount: values.amount,
            category: values.category,
            description: values.description,
            date: values.date,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %record.id, project_id, "expense created");
        self.records.push(record);
        Ok(())
    }

    fn update(&mut self, payload: &Payload) -> Result<(), OperationError> {
        let id = payload
            .id()
            .ok_or_else(|| OperationError::new("Expense id is required"))?;
        let values = ParsedValues::from_payload(payload)?;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| OperationError::new(format!("Expense {id} not found")))?;
        if payload.project_id() != Some(record.project_id.as_str()) {
            return Err(OperationError::new(
                "Expense belongs to a different project",
            ));
        }
        record.amount = values.amount;
        record.category = values.category;
        record.description = values.description;
        record.date = values.date;
        record.updated_at = Utc::now().max(record.created_at);
        debug!(id, "expense updated");
        Ok(())
    }
}

struct ParsedValues {
    amount: f64,
    category: String,
    description: Option<String>,
    date: DateTime<Utc>,
}

impl ParsedValues {
    fn from_payload(payload: &Payload) -> Result<Self, OperationError> {
        let amount = payload
            .field(ExpenseField::Amount)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| OperationError::new("Amount must be a number"))?;
        let date = NaiveDate::parse_from_str(payload.field(ExpenseField::Date).trim(), "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| OperationError::new("Date must be in YYYY-MM-DD format"))?;
        let description = Some(payload.field(ExpenseField::Description))
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Ok(Self {
            amount,
            category: payload.field(ExpenseField::Category).to_string(),
            description,
            date,
        })
    }
}
