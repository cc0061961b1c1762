/// DexScreener API client for the endpoints the bot uses
///
/// API Documentation: https://docs.dexscreener.com/api/reference
///
/// Endpoints:
/// 1. /token-boosts/latest/v1 - Latest boosted tokens
/// 2. /token-boosts/top/v1 - Tokens with the most active boosts
/// 3. /latest/dex/tokens/{tokenAddress} - All pairs for a token
pub mod types;

pub use self::types::{
    BoostLink, BoostPayload, BoostRecord, DexBaseToken, DexLiquidity, DexPair, PairsResponse,
};

use crate::apis::client::HttpClient;
use crate::config::DexScreenerConfig;
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub struct DexScreenerClient {
    http: HttpClient,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self, BoostBotError> {
        let http = HttpClient::new(config.timeout_secs)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DexScreenerConfig {
        &self.config
    }

    /// Pause applied before every pairs request
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config.request_delay_ms)
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, BoostBotError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let response = self
            .http
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| BoostBotError::from_reqwest(url, e))?
            .error_for_status()
            .map_err(|e| BoostBotError::from_reqwest(url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| BoostBotError::from_reqwest(url, e))?;

        logger::debug(
            LogTag::Api,
            &format!(
                "[DEXSCREENER] GET {} -> {} bytes in {}ms",
                url,
                body.len(),
                start.elapsed().as_millis()
            ),
        );

        // A body that is not JSON at all (maintenance or proxy pages) is an upstream failure;
        // JSON of the wrong shape is a data error
        serde_json::from_str::<T>(&body).map_err(|e| {
            if e.is_syntax() || e.is_eof() {
                BoostBotError::network(url, format!("response is not JSON: {}", e))
            } else {
                BoostBotError::Data(format!("Unexpected response from {}: {}", url, e))
            }
        })
    }

    /// Fetch a boosts feed (latest or top); the body is one record or an array
    pub async fn fetch_boosts(&self, url: &str) -> Result<BoostPayload, BoostBotError> {
        logger::debug(LogTag::Api, &format!("[DEXSCREENER] Fetching boosts: {}", url));

        let payload: BoostPayload = self.get_json(url).await?;

        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] Received {} boost record(s)", payload.len()),
        );
        Ok(payload)
    }

    /// All pairs DexScreener knows for a token; `null` pairs is an empty list
    pub async fn fetch_token_pairs(
        &self,
        token_address: &str,
    ) -> Result<Vec<DexPair>, BoostBotError> {
        let url = self.config.token_pairs_url(token_address);

        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] Fetching token pairs: token={}", token_address),
        );

        let response: PairsResponse = self.get_json(&url).await?;
        Ok(response.pairs.unwrap_or_default())
    }
}
