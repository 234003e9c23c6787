use serde::{Deserialize, Serialize};

/// Tenant on whose behalf notifications are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reseller {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractorType {
    Customer,
    Supplier,
}

/// Customer entity receiving return-status notifications.
///
/// Looked up by id from the directory service; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub contractor_type: ContractorType,
    pub reseller_id: i64,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl Contractor {
    /// First/last name when both are on record, otherwise the plain name.
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            _ => self.name.clone(),
        }
    }
}

/// Staff member associated with the complaint record (creator or expert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
