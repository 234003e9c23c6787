use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    clients::{Directory, Localizer},
    models::{
        entities::Contractor,
        notification::{NotificationChannel, NotificationData, NotificationEvent, SmsOutcome},
        template::TemplateData,
    },
    senders::NotificationFactory,
};

/// Permit an employee must hold to receive goods-return notifications.
const GOODS_RETURN_PERMIT: &str = "tsGoodsReturn";

/// Outcome of the client-facing fan-out.
#[derive(Debug, Clone, Default)]
pub struct ClientNotifications {
    pub email: bool,
    pub sms: SmsOutcome,
}

/// Fans notifications out to employees and clients.
///
/// Sends are sequential and best-effort: an individual rejected send is
/// logged and recorded, never escalated. Only collaborator lookup faults
/// propagate as errors.
pub struct NotificationSendingService {
    factory: NotificationFactory,
    directory: Arc<dyn Directory>,
    localizer: Arc<dyn Localizer>,
}

impl NotificationSendingService {
    pub fn new(
        factory: NotificationFactory,
        directory: Arc<dyn Directory>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            factory,
            directory,
            localizer,
        }
    }

    /// Emails every employee permitted for goods returns under the reseller.
    ///
    /// Returns false when there is nobody to notify (no sender address or an
    /// empty recipient pool); true once the pool was non-empty and sends were
    /// attempted, regardless of per-recipient outcomes.
    pub async fn send_employee_notifications(
        &self,
        reseller_id: i64,
        template_data: &TemplateData,
    ) -> Result<bool> {
        let email_from = self.directory.reseller_email_from(reseller_id).await?;
        let emails = self
            .directory
            .emails_by_permit(reseller_id, GOODS_RETURN_PERMIT)
            .await?;

        let Some(email_from) = email_from.filter(|from| !from.is_empty()) else {
            debug!(reseller_id, "No sender address configured, skipping employee emails");
            return Ok(false);
        };

        if emails.is_empty() {
            debug!(reseller_id, "No permitted employee emails, skipping employee emails");
            return Ok(false);
        }

        let params = template_data.as_params();
        let sender = self.factory.create_sender(NotificationChannel::Email);

        for email in &emails {
            let subject = self
                .localizer
                .localize("complaintEmployeeEmailSubject", Some(&params), reseller_id)
                .await?;
            let body = self
                .localizer
                .localize("complaintEmployeeEmailBody", Some(&params), reseller_id)
                .await?;

            let data = NotificationData::new(reseller_id, NotificationEvent::ChangeReturnStatus)
                .with_email(email_from.clone(), email.clone(), subject, body);

            let outcome = sender.send(&data).await;
            if !outcome.success {
                warn!(reseller_id, email_to = %email, "Employee email was not accepted");
            }
        }

        info!(
            reseller_id,
            recipient_count = emails.len(),
            "Employee notifications dispatched"
        );

        Ok(true)
    }

    /// Notifies the client about the new return status by email and SMS.
    ///
    /// Email is attempted when both the reseller sender address and the
    /// client address are present; SMS when the client has a mobile number.
    pub async fn send_client_notifications(
        &self,
        reseller_id: i64,
        client: &Contractor,
        template_data: &TemplateData,
        new_status: i64,
    ) -> Result<ClientNotifications> {
        let mut result = ClientNotifications::default();
        let params = template_data.as_params();

        let email_from = self.directory.reseller_email_from(reseller_id).await?;

        if let (Some(email_from), Some(client_email)) = (
            email_from.filter(|from| !from.is_empty()),
            client.email.clone().filter(|email| !email.is_empty()),
        ) {
            let subject = self
                .localizer
                .localize("complaintClientEmailSubject", Some(&params), reseller_id)
                .await?;
            let body = self
                .localizer
                .localize("complaintClientEmailBody", Some(&params), reseller_id)
                .await?;

            let data = NotificationData::new(reseller_id, NotificationEvent::ChangeReturnStatus)
                .with_email(email_from, client_email, subject, body)
                .with_client(client.id)
                .with_sub_event(new_status.to_string());

            let sender = self.factory.create_sender(NotificationChannel::Email);
            let outcome = sender.send(&data).await;
            if !outcome.success {
                warn!(reseller_id, client_id = client.id, "Client email was not accepted");
            }

            result.email = true;
        }

        if client.mobile.as_deref().is_some_and(|mobile| !mobile.is_empty()) {
            let data = NotificationData::new(reseller_id, NotificationEvent::ChangeReturnStatus)
                .with_client(client.id)
                .with_sub_event(new_status.to_string())
                .with_template_data(params);

            let sender = self.factory.create_sender(NotificationChannel::Sms);
            let outcome = sender.send(&data).await;
            if !outcome.success {
                warn!(
                    reseller_id,
                    client_id = client.id,
                    error = outcome.error_text.as_deref().unwrap_or(""),
                    "Client SMS was not accepted"
                );
            }

            result.sms = outcome.into();
        }

        Ok(result)
    }
}
