pub mod email;
pub mod sms;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    clients::{MessageTransport, SmsTransport},
    models::notification::{NotificationChannel, NotificationData, SendOutcome},
    senders::{email::EmailNotificationSender, sms::SmsNotificationSender},
};

/// Common capability of every delivery channel.
///
/// Ordinary send failures come back in the outcome; send never raises.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, data: &NotificationData) -> SendOutcome;
}

/// Creates the sender for a delivery channel.
///
/// Holds the injected transports so senders stay free of construction
/// concerns. The channel set is closed; an unknown channel string is
/// rejected when parsing `NotificationChannel`, not here.
pub struct NotificationFactory {
    message_transport: Arc<dyn MessageTransport>,
    sms_transport: Arc<dyn SmsTransport>,
}

impl NotificationFactory {
    pub fn new(
        message_transport: Arc<dyn MessageTransport>,
        sms_transport: Arc<dyn SmsTransport>,
    ) -> Self {
        Self {
            message_transport,
            sms_transport,
        }
    }

    pub fn create_sender(&self, channel: NotificationChannel) -> Box<dyn NotificationSender> {
        match channel {
            NotificationChannel::Email => Box::new(EmailNotificationSender::new(
                Arc::clone(&self.message_transport),
            )),
            NotificationChannel::Sms => {
                Box::new(SmsNotificationSender::new(Arc::clone(&self.sms_transport)))
            }
        }
    }
}
