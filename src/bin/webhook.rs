// Lambda entry point for the Telegram webhook

use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use summabot::api::{WebhookApp, handler};
use summabot::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    summabot::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    // Built once per container so quotas and sessions survive warm invocations.
    // Deploy with reserved concurrency 1; see `WebhookApp`.
    let app = Arc::new(WebhookApp::from_config(&config).map_err(|e| {
        error!("Failed to initialize bot: {}", e);
        Error::from(format!("Failed to initialize bot: {e}"))
    })?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let app = Arc::clone(&app);
        async move { handler(app, event).await }
    }))
    .await
}
