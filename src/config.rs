use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://10.0.2.2:3000";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const KEYRING_SERVICE: &str = "dev.parlo.client";

/// Runtime configuration for the client core.
///
/// The defaults target a local development backend reached from the Android
/// emulator loopback. Release builds override `api_url` at wiring time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    /// Whole-request deadline for every backend call. There are no automatic
    /// retries; one attempt per call.
    pub request_timeout: Duration,
    pub keyring_service: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            keyring_service: KEYRING_SERVICE.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides (`PARLO_API_URL`,
    /// `PARLO_REQUEST_TIMEOUT_SECS`), for development builds.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PARLO_API_URL") {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.api_url = trimmed.to_string();
            }
        }

        if let Ok(value) = std::env::var("PARLO_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = value.trim().parse::<u64>() {
                config.request_timeout = Duration::from_secs(secs.max(1));
            }
        }

        config
    }
}
