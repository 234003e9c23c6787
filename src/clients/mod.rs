pub mod directory;
pub mod health;
pub mod localization;
pub mod messages;
pub mod sms;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    entities::{Contractor, Employee, Reseller},
    notification::{NotificationEvent, SendOutcome},
};

/// Entity and address-book lookups, backed by the directory service.
///
/// Injected as a trait so tests can substitute in-memory fakes.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn reseller_by_id(&self, id: i64) -> Result<Option<Reseller>>;

    async fn contractor_by_id(&self, id: i64) -> Result<Option<Contractor>>;

    async fn employee_by_id(&self, id: i64) -> Result<Option<Employee>>;

    /// Employee email addresses holding the given permit for a reseller.
    async fn emails_by_permit(&self, reseller_id: i64, permit: &str) -> Result<Vec<String>>;

    /// Sender address configured for the reseller, when one exists.
    async fn reseller_email_from(&self, reseller_id: i64) -> Result<Option<String>>;
}

/// Localized string resolution keyed by template name and reseller.
#[async_trait]
pub trait Localizer: Send + Sync {
    async fn localize(
        &self,
        key: &str,
        params: Option<&HashMap<String, String>>,
        reseller_id: i64,
    ) -> Result<String>;

    /// Human-readable name for a return-status code.
    async fn status_name(&self, code: i64) -> Result<String>;
}

/// Generic message-send API used for email dispatch.
///
/// Returns the remote boolean result; transport faults surface as `false`
/// (sends are fire-and-forget, never raised).
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_message(
        &self,
        email: &messages::OutboundEmail,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
    ) -> bool;
}

/// SMS notification-manager API.
///
/// Failure reasons come back inside the outcome, never as errors.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send_sms(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
        template_data: &HashMap<String, String>,
    ) -> SendOutcome;
}
