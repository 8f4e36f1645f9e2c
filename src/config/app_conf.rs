use std::env;
use std::time::Duration;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Pause applied after an email dispatch before answering the client.
    pub quote_response_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let delay_ms = env::var("QUOTE_RESPONSE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1000);
        AppConfig {
            host,
            port,
            quote_response_delay: Duration::from_millis(delay_ms),
        }
    }
}
