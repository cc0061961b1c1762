/// Shared types and seams for the boost pipeline
///
/// The workflow only talks to these traits; production wires them to
/// DexScreener and Telegram, tests wire them to in-memory fakes.
use crate::apis::dexscreener::BoostPayload;
use crate::errors::BoostBotError;
use async_trait::async_trait;

/// Market data for one token, computed fresh per boost
///
/// `None` means unavailable: the field was missing, unparsable or zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDetails {
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    pub price: Option<f64>,
    pub liquidity: Option<f64>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl TokenDetails {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}

/// Identifies a message sent through a [`ChatSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle(pub i32);

#[async_trait]
pub trait BoostSource: Send + Sync {
    async fn fetch_boosts(&self, url: &str) -> Result<BoostPayload, BoostBotError>;
}

#[async_trait]
pub trait TokenEnricher: Send + Sync {
    /// Never fails; errors degrade to [`TokenDetails::unavailable`]
    async fn fetch_token_details(&self, token_address: &str) -> TokenDetails;
}

/// Where replies for one chat go
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send_plain(&self, text: &str) -> Result<MessageHandle, BoostBotError>;

    async fn send_html(
        &self,
        text: &str,
        disable_preview: bool,
    ) -> Result<MessageHandle, BoostBotError>;

    async fn edit_plain(&self, handle: MessageHandle, text: &str) -> Result<(), BoostBotError>;

    async fn delete(&self, handle: MessageHandle) -> Result<(), BoostBotError>;
}
