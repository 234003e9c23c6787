#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use return_notify::{
    clients::{Directory, Localizer, MessageTransport, SmsTransport, messages::OutboundEmail},
    models::{
        entities::{Contractor, ContractorType, Employee, Reseller},
        notification::{NotificationEvent, SendOutcome},
    },
    operation::ReturnOperation,
    senders::NotificationFactory,
    service::NotificationSendingService,
};
use serde_json::{Map, Value, json};

pub fn reseller(id: i64) -> Reseller {
    Reseller {
        id,
        name: format!("Reseller {}", id),
    }
}

pub fn customer(id: i64, reseller_id: i64) -> Contractor {
    Contractor {
        id,
        name: format!("Client {}", id),
        contractor_type: ContractorType::Customer,
        reseller_id,
        first_name: None,
        last_name: None,
        email: Some(format!("client{}@example.com", id)),
        mobile: Some("+15550100".to_string()),
    }
}

pub fn employee(id: i64, first: &str, last: &str) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
    }
}

/// In-memory directory with per-test entity fixtures.
#[derive(Default)]
pub struct FakeDirectory {
    pub resellers: HashMap<i64, Reseller>,
    pub contractors: HashMap<i64, Contractor>,
    pub employees: HashMap<i64, Employee>,
    pub permitted_emails: Vec<String>,
    pub email_from: Option<String>,
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn reseller_by_id(&self, id: i64) -> Result<Option<Reseller>> {
        Ok(self.resellers.get(&id).cloned())
    }

    async fn contractor_by_id(&self, id: i64) -> Result<Option<Contractor>> {
        Ok(self.contractors.get(&id).cloned())
    }

    async fn employee_by_id(&self, id: i64) -> Result<Option<Employee>> {
        Ok(self.employees.get(&id).cloned())
    }

    async fn emails_by_permit(&self, _reseller_id: i64, _permit: &str) -> Result<Vec<String>> {
        Ok(self.permitted_emails.clone())
    }

    async fn reseller_email_from(&self, _reseller_id: i64) -> Result<Option<String>> {
        Ok(self.email_from.clone())
    }
}

/// Deterministic localizer: fixed phrases for the differences templates,
/// `key@reseller` for everything else. Records every requested key.
#[derive(Default)]
pub struct FakeLocalizer {
    pub requested_keys: Mutex<Vec<String>>,
}

impl FakeLocalizer {
    pub fn keys(&self) -> Vec<String> {
        self.requested_keys
            .lock()
            .expect("localizer mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl Localizer for FakeLocalizer {
    async fn localize(
        &self,
        key: &str,
        params: Option<&HashMap<String, String>>,
        reseller_id: i64,
    ) -> Result<String> {
        self.requested_keys
            .lock()
            .expect("localizer mutex poisoned")
            .push(key.to_string());

        match key {
            "NewPositionAdded" => Ok("New position added".to_string()),
            "PositionStatusHasChanged" => {
                let params = params.cloned().unwrap_or_default();
                Ok(format!(
                    "Status changed from {} to {}",
                    params.get("FROM").cloned().unwrap_or_default(),
                    params.get("TO").cloned().unwrap_or_default(),
                ))
            }
            other => Ok(format!("{}@{}", other, reseller_id)),
        }
    }

    async fn status_name(&self, code: i64) -> Result<String> {
        Ok(format!("status-{}", code))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub email: OutboundEmail,
    pub reseller_id: i64,
    pub client_id: i64,
    pub event: NotificationEvent,
    pub sub_event: String,
}

/// Message transport that records every call and answers with a fixed result.
pub struct RecordingMessageTransport {
    pub calls: Mutex<Vec<RecordedEmail>>,
    pub result: bool,
}

impl RecordingMessageTransport {
    pub fn accepting() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: true,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: false,
        }
    }

    pub fn recorded(&self) -> Vec<RecordedEmail> {
        self.calls.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl MessageTransport for RecordingMessageTransport {
    async fn send_message(
        &self,
        email: &OutboundEmail,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
    ) -> bool {
        self.calls
            .lock()
            .expect("transport mutex poisoned")
            .push(RecordedEmail {
                email: email.clone(),
                reseller_id,
                client_id,
                event,
                sub_event: sub_event.to_string(),
            });
        self.result
    }
}

#[derive(Debug, Clone)]
pub struct RecordedSms {
    pub reseller_id: i64,
    pub client_id: i64,
    pub event: NotificationEvent,
    pub sub_event: String,
    pub template_data: HashMap<String, String>,
}

/// SMS transport that records every call and answers with a fixed outcome.
pub struct RecordingSmsTransport {
    pub calls: Mutex<Vec<RecordedSms>>,
    pub outcome: SendOutcome,
}

impl RecordingSmsTransport {
    pub fn accepting() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: SendOutcome::sent(),
        }
    }

    pub fn rejecting(error_text: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: SendOutcome::failed(error_text),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedSms> {
        self.calls.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl SmsTransport for RecordingSmsTransport {
    async fn send_sms(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
        template_data: &HashMap<String, String>,
    ) -> SendOutcome {
        self.calls
            .lock()
            .expect("transport mutex poisoned")
            .push(RecordedSms {
                reseller_id,
                client_id,
                event,
                sub_event: sub_event.to_string(),
                template_data: template_data.clone(),
            });
        self.outcome.clone()
    }
}

/// Everything a test needs to drive the operation and inspect side effects.
pub struct OperationHarness {
    pub operation: ReturnOperation,
    pub message_transport: Arc<RecordingMessageTransport>,
    pub sms_transport: Arc<RecordingSmsTransport>,
    pub localizer: Arc<FakeLocalizer>,
}

/// Wires an operation over fakes with accepting transports.
pub fn operation_with(directory: FakeDirectory) -> OperationHarness {
    operation_with_transports(
        directory,
        RecordingMessageTransport::accepting(),
        RecordingSmsTransport::accepting(),
    )
}

/// Wires an operation over fakes with the given transports.
pub fn operation_with_transports(
    directory: FakeDirectory,
    message_transport: RecordingMessageTransport,
    sms_transport: RecordingSmsTransport,
) -> OperationHarness {
    let message_transport = Arc::new(message_transport);
    let sms_transport = Arc::new(sms_transport);
    let localizer = Arc::new(FakeLocalizer::default());

    let directory: Arc<dyn Directory> = Arc::new(directory);
    let localizer_dyn: Arc<dyn Localizer> = localizer.clone();

    let factory = NotificationFactory::new(
        message_transport.clone(),
        sms_transport.clone(),
    );
    let sending =
        NotificationSendingService::new(factory, directory.clone(), localizer_dyn.clone());
    let operation = ReturnOperation::new(directory, localizer_dyn, sending);

    OperationHarness {
        operation,
        message_transport,
        sms_transport,
        localizer,
    }
}

/// A fully-populated raw request payload for notificationType CHANGE.
pub fn change_request() -> Map<String, Value> {
    request_with_type(2)
}

pub fn request_with_type(notification_type: i64) -> Map<String, Value> {
    json!({
        "resellerId": 14,
        "notificationType": notification_type,
        "clientId": 7,
        "creatorId": 3,
        "expertId": 4,
        "complaintId": 101,
        "complaintNumber": "C-101",
        "consumptionId": 202,
        "consumptionNumber": "K-202",
        "agreementNumber": "A-303",
        "date": "2024-05-17",
        "differences": { "from": 1, "to": 2 },
    })
    .as_object()
    .expect("payload is an object")
    .clone()
}

/// Directory fixture matching `change_request` ids.
pub fn populated_directory() -> FakeDirectory {
    let mut directory = FakeDirectory::default();
    directory.resellers.insert(14, reseller(14));
    directory.contractors.insert(7, customer(7, 14));
    directory.employees.insert(3, employee(3, "Carla", "Creator"));
    directory.employees.insert(4, employee(4, "Edgar", "Expert"));
    directory.permitted_emails = vec![
        "first@reseller.example".to_string(),
        "second@reseller.example".to_string(),
    ];
    directory.email_from = Some("returns@reseller.example".to_string());
    directory
}
