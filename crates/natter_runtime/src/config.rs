//! Runtime configuration for natter.

use std::time::Duration;

/// Where the reply service listens by default (the upstream chat endpoint).
pub const DEFAULT_REPLY_URL: &str = "http://127.0.0.1:5000/chat";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Reply service endpoint receiving `POST {"message": ...}`.
    pub reply_url: String,
    /// Deadline for one round-trip; expiry resolves to the failure path.
    pub request_timeout: Duration,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            reply_url: DEFAULT_REPLY_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_reply_url(mut self, url: impl Into<String>) -> Self {
        self.reply_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    /// (`NATTER_REPLY_URL`, `NATTER_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("NATTER_REPLY_URL") {
            if !url.trim().is_empty() {
                config.reply_url = url;
            }
        }

        if let Ok(secs) = std::env::var("NATTER_TIMEOUT_SECS") {
            if let Ok(val) = secs.parse::<u64>() {
                config.request_timeout = Duration::from_secs(val);
            }
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
