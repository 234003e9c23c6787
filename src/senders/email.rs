use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    clients::{MessageTransport, messages::OutboundEmail},
    models::notification::{NotificationData, SendOutcome},
    senders::NotificationSender,
};

/// Delivers over the generic message-send API, tagged as email.
pub struct EmailNotificationSender {
    transport: Arc<dyn MessageTransport>,
}

impl EmailNotificationSender {
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl NotificationSender for EmailNotificationSender {
    async fn send(&self, data: &NotificationData) -> SendOutcome {
        let email = OutboundEmail {
            email_from: data.from.clone().unwrap_or_default(),
            email_to: data.to.clone().unwrap_or_default(),
            subject: data.subject.clone().unwrap_or_default(),
            message: data.body.clone().unwrap_or_default(),
        };

        let sent = self
            .transport
            .send_message(
                &email,
                data.reseller_id,
                data.client_id.unwrap_or(0),
                data.event,
                data.sub_event.as_deref().unwrap_or(""),
            )
            .await;

        SendOutcome::from_bool(sent)
    }
}
