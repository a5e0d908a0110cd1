use crate::config::BackendConfig;
use reqwest::Client;
use std::time::Duration;

pub fn build_backend_client(config: &BackendConfig) -> Client {
    build_backend_client_with_timeouts(config.timeout_secs, config.connect_timeout_secs)
}

pub fn build_backend_client_with_timeouts(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("lexichat/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}
