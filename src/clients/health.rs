use std::{collections::HashMap, time::Instant};

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::Config,
    models::health::{HealthCheckResponse, HealthStatus, ServiceHealth},
};

/// Reachability checks for the collaborator services.
pub struct HealthChecker {
    http_client: Client,
    config: Config,
}

impl HealthChecker {
    pub fn new(config: Config) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    pub async fn check_all(&self) -> HealthCheckResponse {
        let mut checks = HashMap::new();

        checks.insert(
            "directory_service".to_string(),
            self.check_service(&self.config.directory_service_url).await,
        );
        checks.insert(
            "localization_service".to_string(),
            self.check_service(&self.config.localization_service_url)
                .await,
        );
        checks.insert(
            "messages_api".to_string(),
            self.check_service(&self.config.messages_api_url).await,
        );
        checks.insert(
            "notification_manager".to_string(),
            self.check_service(&self.config.notification_manager_url)
                .await,
        );

        let overall_status = if checks
            .values()
            .any(|health| health.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthCheckResponse {
            status: overall_status,
            timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            checks,
        }
    }

    async fn check_service(&self, base_url: &str) -> ServiceHealth {
        let start = Instant::now();
        let url = format!("{}/health", base_url);

        match self.http_client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(base_url, response_time_ms = elapsed, "Health check passed");
                ServiceHealth::healthy(elapsed)
            }
            Ok(response) => {
                warn!(base_url, status = %response.status(), "Health check failed");
                ServiceHealth::unhealthy(format!("Returned status {}", response.status()))
            }
            Err(e) => {
                warn!(base_url, error = %e, "Health check request failed");
                ServiceHealth::unhealthy(format!("Request failed: {}", e))
            }
        }
    }
}
