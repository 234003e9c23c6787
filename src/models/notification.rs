use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

/// Kind of return event a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NotificationType {
    New,
    Change,
}

impl NotificationType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(NotificationType::New),
            2 => Some(NotificationType::Change),
            _ => None,
        }
    }
}

/// Delivery channel. Closed set; adding a channel means adding a variant
/// and a sender, not touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    Email,
    Sms,
}

impl FromStr for NotificationChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(NotificationChannel::Email),
            "sms" => Ok(NotificationChannel::Sms),
            other => Err(anyhow!("Unknown notification type: {}", other)),
        }
    }
}

impl Display for NotificationChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationChannel::Email => write!(f, "email"),
            NotificationChannel::Sms => write!(f, "sms"),
        }
    }
}

/// Business event tag forwarded to the transports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationEvent {
    ChangeReturnStatus,
}

impl Display for NotificationEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationEvent::ChangeReturnStatus => write!(f, "changeReturnStatus"),
        }
    }
}

/// Per-send transport record, built once per dispatch and discarded.
#[derive(Debug, Clone)]
pub struct NotificationData {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub reseller_id: i64,
    pub client_id: Option<i64>,
    pub event: NotificationEvent,
    pub sub_event: Option<String>,
    pub template_data: Option<HashMap<String, String>>,
}

impl NotificationData {
    pub fn new(reseller_id: i64, event: NotificationEvent) -> Self {
        Self {
            from: None,
            to: None,
            subject: None,
            body: None,
            reseller_id,
            client_id: None,
            event,
            sub_event: None,
            template_data: None,
        }
    }

    pub fn with_email(mut self, from: String, to: String, subject: String, body: String) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self.subject = Some(subject);
        self.body = Some(body);
        self
    }

    pub fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_sub_event(mut self, sub_event: String) -> Self {
        self.sub_event = Some(sub_event);
        self
    }

    pub fn with_template_data(mut self, template_data: HashMap<String, String>) -> Self {
        self.template_data = Some(template_data);
        self
    }
}

/// Result of one send attempt, returned by value.
///
/// Transports report ordinary failures here instead of raising; `error_text`
/// carries the transport's reason when it has one.
#[derive(Debug, Clone, Default)]
pub struct SendOutcome {
    pub success: bool,
    pub error_text: Option<String>,
}

impl SendOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error_text: None,
        }
    }

    pub fn failed(error_text: impl Into<String>) -> Self {
        Self {
            success: false,
            error_text: Some(error_text.into()),
        }
    }

    pub fn from_bool(success: bool) -> Self {
        Self {
            success,
            error_text: None,
        }
    }
}

/// SMS leg of the aggregated operation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsOutcome {
    pub is_sent: bool,
    pub message: String,
}

impl Default for SmsOutcome {
    fn default() -> Self {
        Self {
            is_sent: false,
            message: String::new(),
        }
    }
}

impl From<SendOutcome> for SmsOutcome {
    fn from(outcome: SendOutcome) -> Self {
        Self {
            is_sent: outcome.success,
            message: outcome.error_text.unwrap_or_default(),
        }
    }
}

/// Aggregated outcome returned to the caller of the operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email: bool,
    pub notification_client_by_sms: SmsOutcome,
}

impl Default for NotificationResult {
    fn default() -> Self {
        Self {
            notification_employee_by_email: false,
            notification_client_by_email: false,
            notification_client_by_sms: SmsOutcome::default(),
        }
    }
}
