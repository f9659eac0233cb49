//! Env-driven configuration, following the translation server's
//! env-first settings style.

use std::time::Duration;

use dashboard_client::ClientSettings;

/// Poll interval used when `DASHBOARD_POLL_MS` is absent or unparseable.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Reads `DASHBOARD_BASE_URL` and `DASHBOARD_POLL_MS`; anything absent
    /// or unparseable falls back to the defaults.
    pub fn from_env() -> Self {
        let mut client = ClientSettings::default();
        if let Ok(base_url) = std::env::var("DASHBOARD_BASE_URL") {
            if !base_url.is_empty() {
                client.base_url = base_url.trim_end_matches('/').to_string();
            }
        }

        let poll_interval = std::env::var("DASHBOARD_POLL_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        Self {
            client,
            poll_interval,
        }
    }
}
