use std::env;
use std::time::Duration;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TERM: &str = "1403-1";

#[derive(Clone, Debug)]
pub struct PanelConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub current_term: String,
}

impl PanelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            current_term: DEFAULT_TERM.to_string(),
        }
    }

    pub fn new_from_env() -> Result<Self, ApiError> {
        let base_url =
            env::var("PANEL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let current_term =
            env::var("PANEL_CURRENT_TERM").unwrap_or_else(|_| DEFAULT_TERM.to_string());
        let timeout_secs = match env::var("PANEL_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ApiError::Config(format!("PANEL_TIMEOUT_SECS is not a number: {raw}")))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            current_term,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
