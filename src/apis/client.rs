/// Base HTTP client shared by the API wrappers
use crate::errors::BoostBotError;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("boostbot/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with a request timeout
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, BoostBotError> {
        if timeout_secs == 0 {
            return Err(BoostBotError::Config(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BoostBotError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
