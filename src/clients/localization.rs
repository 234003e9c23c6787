use std::{collections::HashMap, time::Duration};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{clients::Localizer, config::Config};

pub struct LocalizationClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalizeRequest<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a HashMap<String, String>>,
    reseller_id: i64,
}

#[derive(Debug, Deserialize)]
struct LocalizeResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct StatusNameResponse {
    name: String,
}

impl LocalizationClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.localization_service_url, "Localization client initialized");

        Ok(Self {
            http_client,
            base_url: config.localization_service_url.clone(),
        })
    }
}

#[async_trait]
impl Localizer for LocalizationClient {
    async fn localize(
        &self,
        key: &str,
        params: Option<&HashMap<String, String>>,
        reseller_id: i64,
    ) -> Result<String> {
        let url = format!("{}/api/v1/localize", self.base_url);

        debug!(
            key,
            reseller_id,
            param_count = params.map(|p| p.len()).unwrap_or(0),
            "Resolving localized string"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&LocalizeRequest {
                key,
                params,
                reseller_id,
            })
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(anyhow!("Localization service returned status {}", status));
        }

        let localized = response.json::<LocalizeResponse>().await?;
        Ok(localized.text)
    }

    async fn status_name(&self, code: i64) -> Result<String> {
        let url = format!("{}/api/v1/statuses/{}", self.base_url, code);

        debug!(status_code = code, "Resolving status name");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow!("Localization service returned status {}", status));
        }

        let named = response.json::<StatusNameResponse>().await?;
        Ok(named.name)
    }
}
