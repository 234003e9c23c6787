use std::time::Duration;

use anyhow::{Error, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    clients::MessageTransport,
    config::Config,
    models::notification::NotificationEvent,
};

/// Email payload of the generic message-send API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEmail {
    pub email_from: String,
    pub email_to: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    kind: &'static str,
    payload: &'a OutboundEmail,
    reseller_id: i64,
    client_id: i64,
    event: NotificationEvent,
    sub_event: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    sent: bool,
}

pub struct MessagesClient {
    http_client: Client,
    base_url: String,
}

impl MessagesClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.messages_api_url, "Messages client initialized");

        Ok(Self {
            http_client,
            base_url: config.messages_api_url.clone(),
        })
    }

    async fn post_message(&self, request: &SendMessageRequest<'_>) -> Result<bool, Error> {
        let url = format!("{}/api/v1/messages", self.base_url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow!("Messages API returned status {}", status));
        }

        let result = response.json::<SendMessageResponse>().await?;
        Ok(result.sent)
    }
}

#[async_trait]
impl MessageTransport for MessagesClient {
    async fn send_message(
        &self,
        email: &OutboundEmail,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
    ) -> bool {
        debug!(
            email_to = %email.email_to,
            reseller_id,
            event = %event,
            "Sending email message"
        );

        let request = SendMessageRequest {
            kind: "email",
            payload: email,
            reseller_id,
            client_id,
            event,
            sub_event,
        };

        match self.post_message(&request).await {
            Ok(sent) => {
                if sent {
                    info!(email_to = %email.email_to, "Email message accepted");
                }
                sent
            }
            Err(e) => {
                warn!(error = %e, email_to = %email.email_to, "Email message send failed");
                false
            }
        }
    }
}
