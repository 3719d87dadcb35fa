use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expense::fields::{ExpenseField, FormFields};

pub const PROJECT_ID_KEY: &str = "projectId";
pub const ID_KEY: &str = "id";

/// Which external operation a submission goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionIntent {
    CreateIntent,
    UpdateIntent { existing_id: String },
}

impl SubmissionIntent {
    pub fn is_update(&self) -> bool {
        matches!(self, SubmissionIntent::UpdateIntent { .. })
    }

    /// Verb used in notifications ("added" / "updated").
    pub fn verb(&self) -> &'static str {
        match self {
            SubmissionIntent::CreateIntent => "added",
            SubmissionIntent::UpdateIntent { .. } => "updated",
        }
    }

    pub fn success_message(&self) -> String {
        format!("Expense {} successfully", self.verb())
    }
}

/// Flat field-name to value bag handed to the external operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    /// Collects the visible fields plus the hidden identity fields.
    pub fn build(fields: &FormFields, project_id: &str, intent: &SubmissionIntent) -> Self {
        let mut values = BTreeMap::new();
        values.insert(PROJECT_ID_KEY.to_string(), project_id.to_string());
        if let SubmissionIntent::UpdateIntent { existing_id } = intent {
            values.insert(ID_KEY.to_string(), existing_id.clone());
        }
        for field in ExpenseField::ALL {
            values.insert(field.key().to_string(), fields.get(field).to_string());
        }
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn field(&self, field: ExpenseField) -> &str {
        self.get(field.key()).unwrap_or_default()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.get(PROJECT_ID_KEY)
    }

    /// Record id; absent for creates.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_KEY).filter(|id| !id.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
