use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    clients::Directory,
    config::Config,
    models::entities::{Contractor, Employee, Reseller},
};

pub struct DirectoryClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EmailFromResponse {
    email: Option<String>,
}

impl DirectoryClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.directory_service_url, "Directory client initialized");

        Ok(Self {
            http_client,
            base_url: config.directory_service_url.clone(),
        })
    }

    async fn fetch_optional<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<Option<T>, Error> {
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(anyhow!("Directory service returned status {}", status));
        }

        let entity = response.json::<T>().await?;
        Ok(Some(entity))
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn reseller_by_id(&self, id: i64) -> Result<Option<Reseller>> {
        debug!(reseller_id = id, "Fetching reseller");

        self.fetch_optional(format!("{}/api/v1/resellers/{}", self.base_url, id))
            .await
    }

    async fn contractor_by_id(&self, id: i64) -> Result<Option<Contractor>> {
        debug!(contractor_id = id, "Fetching contractor");

        self.fetch_optional(format!("{}/api/v1/contractors/{}", self.base_url, id))
            .await
    }

    async fn employee_by_id(&self, id: i64) -> Result<Option<Employee>> {
        debug!(employee_id = id, "Fetching employee");

        self.fetch_optional(format!("{}/api/v1/employees/{}", self.base_url, id))
            .await
    }

    async fn emails_by_permit(&self, reseller_id: i64, permit: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/v1/resellers/{}/emails?permit={}",
            self.base_url, reseller_id, permit
        );

        debug!(reseller_id, permit, "Fetching permitted employee emails");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow!("Directory service returned status {}", status));
        }

        let emails = response.json::<Vec<String>>().await?;
        Ok(emails)
    }

    async fn reseller_email_from(&self, reseller_id: i64) -> Result<Option<String>> {
        let url = format!(
            "{}/api/v1/resellers/{}/email-from",
            self.base_url, reseller_id
        );

        debug!(reseller_id, "Fetching reseller sender address");

        let response = self
            .fetch_optional::<EmailFromResponse>(url)
            .await?;

        Ok(response.and_then(|r| r.email))
    }
}
