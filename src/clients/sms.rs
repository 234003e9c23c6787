use std::{collections::HashMap, time::Duration};

use anyhow::{Error, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    clients::SmsTransport,
    config::Config,
    models::notification::{NotificationEvent, SendOutcome},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsRequest<'a> {
    reseller_id: i64,
    client_id: i64,
    event: NotificationEvent,
    sub_event: &'a str,
    template_data: &'a HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsResponse {
    sent: bool,
    #[serde(default)]
    error_text: Option<String>,
}

/// Client for the SMS notification-manager API.
pub struct NotificationManagerClient {
    http_client: Client,
    base_url: String,
}

impl NotificationManagerClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.notification_manager_url, "Notification manager client initialized");

        Ok(Self {
            http_client,
            base_url: config.notification_manager_url.clone(),
        })
    }

    async fn post_sms(&self, request: &SendSmsRequest<'_>) -> Result<SendSmsResponse, Error> {
        let url = format!("{}/api/v1/notifications/sms", self.base_url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow!("Notification manager returned status {}", status));
        }

        let result = response.json::<SendSmsResponse>().await?;
        Ok(result)
    }
}

#[async_trait]
impl SmsTransport for NotificationManagerClient {
    async fn send_sms(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        sub_event: &str,
        template_data: &HashMap<String, String>,
    ) -> SendOutcome {
        debug!(reseller_id, client_id, event = %event, "Sending SMS notification");

        let request = SendSmsRequest {
            reseller_id,
            client_id,
            event,
            sub_event,
            template_data,
        };

        match self.post_sms(&request).await {
            Ok(response) => {
                if response.sent {
                    info!(reseller_id, client_id, "SMS notification accepted");
                }
                SendOutcome {
                    success: response.sent,
                    error_text: response.error_text,
                }
            }
            Err(e) => {
                warn!(error = %e, reseller_id, client_id, "SMS notification send failed");
                SendOutcome::failed(e.to_string())
            }
        }
    }
}
