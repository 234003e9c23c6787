use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::{
    clients::SmsTransport,
    models::notification::{NotificationData, SendOutcome},
    senders::NotificationSender,
};

/// Delivers over the SMS notification-manager API.
pub struct SmsNotificationSender {
    transport: Arc<dyn SmsTransport>,
}

impl SmsNotificationSender {
    pub fn new(transport: Arc<dyn SmsTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl NotificationSender for SmsNotificationSender {
    async fn send(&self, data: &NotificationData) -> SendOutcome {
        // The notification manager rejects tenant-less sends; skip the call.
        if data.reseller_id == 0 {
            return SendOutcome::failed("Reseller ID is required");
        }

        let empty = HashMap::new();
        let template_data = data.template_data.as_ref().unwrap_or(&empty);

        self.transport
            .send_sms(
                data.reseller_id,
                data.client_id.unwrap_or(0),
                data.event,
                data.sub_event.as_deref().unwrap_or(""),
                template_data,
            )
            .await
    }
}
