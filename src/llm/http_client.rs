use crate::config::LlmConfig;
use reqwest::Client;
use std::time::Duration;

pub fn build_gateway_client(config: &LlmConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "Falling back to default HTTP client");
            Client::new()
        })
}
