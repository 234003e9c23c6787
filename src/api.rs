use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    clients::{
        directory::DirectoryClient, health::HealthChecker, localization::LocalizationClient,
        messages::MessagesClient, sms::NotificationManagerClient,
    },
    config::Config,
    models::{health::HealthStatus, response::ApiResponse},
    operation::ReturnOperation,
    senders::NotificationFactory,
    service::NotificationSendingService,
};

pub struct AppState {
    operation: ReturnOperation,
    health_checker: HealthChecker,
}

pub fn build_operation(config: &Config) -> Result<ReturnOperation, anyhow::Error> {
    let directory = Arc::new(DirectoryClient::new(config)?);
    let localizer = Arc::new(LocalizationClient::new(config)?);
    let messages = Arc::new(MessagesClient::new(config)?);
    let notification_manager = Arc::new(NotificationManagerClient::new(config)?);

    let factory = NotificationFactory::new(messages, notification_manager);
    let sending = NotificationSendingService::new(
        factory,
        directory.clone(),
        localizer.clone(),
    );

    Ok(ReturnOperation::new(directory, localizer, sending))
}

pub async fn run_api_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        operation: build_operation(&config)?,
        health_checker: HealthChecker::new(config.clone()),
    });

    let app = Router::new()
        .route("/api/v1/returns/notify", post(notify_return))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Return notification server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn notify_return(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let Some(data) = body.get("data").and_then(Value::as_object) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Value>::error(
                "Invalid data format".to_string(),
                "Request body must carry a data object".to_string(),
            )),
        );
    };

    match state.operation.execute(data).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    value,
                    "Return notification processed".to_string(),
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    e.to_string(),
                    "Failed to serialize result".to_string(),
                )),
            ),
        },
        Err(e) => {
            let status = e.status_code();
            (
                status,
                Json(ApiResponse::error(
                    e.to_string(),
                    "Return notification failed".to_string(),
                )),
            )
        }
    }
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}
