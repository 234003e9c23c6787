use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::OperationError,
    models::entities::{Contractor, Employee},
};

/// Flattened set of named values used to parameterize localized message
/// templates. Immutable once built; every field is guaranteed non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateData {
    pub complaint_id: i64,
    pub complaint_number: String,
    pub creator_id: i64,
    pub creator_name: String,
    pub expert_id: i64,
    pub expert_name: String,
    pub client_id: i64,
    pub client_name: String,
    pub consumption_id: i64,
    pub consumption_number: String,
    pub agreement_number: String,
    pub date: String,
    pub differences: String,
}

impl TemplateData {
    /// Parameter map handed to the localization service, keyed by the
    /// template placeholder names.
    pub fn as_params(&self) -> HashMap<String, String> {
        HashMap::from([
            ("COMPLAINT_ID".to_string(), self.complaint_id.to_string()),
            ("COMPLAINT_NUMBER".to_string(), self.complaint_number.clone()),
            ("CREATOR_ID".to_string(), self.creator_id.to_string()),
            ("CREATOR_NAME".to_string(), self.creator_name.clone()),
            ("EXPERT_ID".to_string(), self.expert_id.to_string()),
            ("EXPERT_NAME".to_string(), self.expert_name.clone()),
            ("CLIENT_ID".to_string(), self.client_id.to_string()),
            ("CLIENT_NAME".to_string(), self.client_name.clone()),
            ("CONSUMPTION_ID".to_string(), self.consumption_id.to_string()),
            (
                "CONSUMPTION_NUMBER".to_string(),
                self.consumption_number.clone(),
            ),
            ("AGREEMENT_NUMBER".to_string(), self.agreement_number.clone()),
            ("DATE".to_string(), self.date.clone()),
            ("DIFFERENCES".to_string(), self.differences.clone()),
        ])
    }
}

/// Fluent accumulator for `TemplateData`.
///
/// Setters never validate, so partial chains stay legal; `build` checks every
/// field against the emptiness rule and fails naming the offending one. An
/// empty field here is a programming or upstream-data fault, fatal to the
/// enclosing operation.
#[derive(Debug, Default)]
pub struct TemplateDataBuilder {
    complaint_id: Option<i64>,
    complaint_number: Option<String>,
    creator_id: Option<i64>,
    creator_name: Option<String>,
    expert_id: Option<i64>,
    expert_name: Option<String>,
    client_id: Option<i64>,
    client_name: Option<String>,
    consumption_id: Option<i64>,
    consumption_number: Option<String>,
    agreement_number: Option<String>,
    date: Option<String>,
    differences: Option<String>,
}

impl TemplateDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_complaint(mut self, id: i64, number: String) -> Self {
        self.complaint_id = Some(id);
        self.complaint_number = Some(number);
        self
    }

    pub fn set_creator(mut self, creator: &Employee) -> Self {
        self.creator_id = Some(creator.id);
        self.creator_name = Some(creator.full_name());
        self
    }

    pub fn set_expert(mut self, expert: &Employee) -> Self {
        self.expert_id = Some(expert.id);
        self.expert_name = Some(expert.full_name());
        self
    }

    pub fn set_client(mut self, client: &Contractor) -> Self {
        self.client_id = Some(client.id);
        self.client_name = Some(client.full_name());
        self
    }

    pub fn set_consumption(mut self, id: i64, number: String) -> Self {
        self.consumption_id = Some(id);
        self.consumption_number = Some(number);
        self
    }

    pub fn set_agreement(mut self, number: String) -> Self {
        self.agreement_number = Some(number);
        self
    }

    pub fn set_date(mut self, date: String) -> Self {
        self.date = Some(date);
        self
    }

    pub fn set_differences(mut self, differences: String) -> Self {
        self.differences = Some(differences);
        self
    }

    pub fn build(self) -> Result<TemplateData, OperationError> {
        Ok(TemplateData {
            complaint_id: require_id(self.complaint_id, "COMPLAINT_ID")?,
            complaint_number: require_text(self.complaint_number, "COMPLAINT_NUMBER")?,
            creator_id: require_id(self.creator_id, "CREATOR_ID")?,
            creator_name: require_text(self.creator_name, "CREATOR_NAME")?,
            expert_id: require_id(self.expert_id, "EXPERT_ID")?,
            expert_name: require_text(self.expert_name, "EXPERT_NAME")?,
            client_id: require_id(self.client_id, "CLIENT_ID")?,
            client_name: require_text(self.client_name, "CLIENT_NAME")?,
            consumption_id: require_id(self.consumption_id, "CONSUMPTION_ID")?,
            consumption_number: require_text(self.consumption_number, "CONSUMPTION_NUMBER")?,
            agreement_number: require_text(self.agreement_number, "AGREEMENT_NUMBER")?,
            date: require_text(self.date, "DATE")?,
            differences: require_text(self.differences, "DIFFERENCES")?,
        })
    }
}

fn require_id(value: Option<i64>, field: &str) -> Result<i64, OperationError> {
    match value {
        Some(id) if id != 0 => Ok(id),
        _ => Err(OperationError::Template(field.to_string())),
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String, OperationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(OperationError::Template(field.to_string())),
    }
}
