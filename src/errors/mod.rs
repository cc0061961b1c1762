/// Error handling for BoostBot
///
/// One error type crosses module boundaries. Upstream failures are split into
/// `Network` (the request never produced a usable HTTP response) and `Data`
/// (the response arrived but could not be understood) because the user sees
/// different replies for each.
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BoostBotError {
    #[error("Network error: {message}")]
    Network { endpoint: String, message: String },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reply shown when the boosts feed cannot be reached
pub const NETWORK_ERROR_REPLY: &str =
    "❌ Network error: Could not fetch boost data. Please try again later.";

impl BoostBotError {
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        BoostBotError::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Transport failures and non-success HTTP statuses
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BoostBotError::Network { .. } | BoostBotError::HttpStatus { .. }
        )
    }

    /// Text shown to the chat when a workflow aborts with this error
    pub fn user_message(&self) -> String {
        if self.is_network() {
            NETWORK_ERROR_REPLY.to_string()
        } else {
            format!("❌ Error: {}", self)
        }
    }

    /// Classify a reqwest failure for the given endpoint
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            return BoostBotError::Data(format!(
                "Failed to parse response from {}: {}",
                endpoint, err
            ));
        }
        if let Some(status) = err.status() {
            return BoostBotError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            };
        }
        if err.is_timeout() {
            return BoostBotError::network(endpoint, format!("Request to {} timed out", endpoint));
        }
        BoostBotError::network(endpoint, format!("Request to {} failed: {}", endpoint, err))
    }
}

impl From<std::io::Error> for BoostBotError {
    fn from(err: std::io::Error) -> Self {
        BoostBotError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BoostBotError {
    fn from(err: serde_json::Error) -> Self {
        BoostBotError::Data(err.to_string())
    }
}

#[cfg(feature = "telegram")]
impl From<teloxide::RequestError> for BoostBotError {
    fn from(err: teloxide::RequestError) -> Self {
        BoostBotError::Telegram(err.to_string())
    }
}
