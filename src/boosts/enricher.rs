/// Token enrichment from the DexScreener pairs endpoint
///
/// The most liquid pair stands in for the token. Anything that goes wrong
/// (network, HTTP status, payload shape) is logged and degrades to
/// unavailable details so one bad token never blocks the batch.
use super::types::{BoostSource, TokenDetails, TokenEnricher};
use crate::apis::dexscreener::{BoostPayload, DexPair, DexScreenerClient};
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;

/// Pick the pair with the highest USD liquidity
///
/// Missing liquidity counts as zero. On ties the earlier pair wins.
pub fn select_best_pair(pairs: &[DexPair]) -> Option<&DexPair> {
    let mut best: Option<&DexPair> = None;
    for pair in pairs {
        match best {
            Some(current) if pair.liquidity_usd() <= current.liquidity_usd() => {}
            _ => best = Some(pair),
        }
    }
    best
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).cloned()
}

/// Reduce a pairs list to [`TokenDetails`]
pub fn details_from_pairs(pairs: &[DexPair]) -> TokenDetails {
    let Some(pair) = select_best_pair(pairs) else {
        return TokenDetails::unavailable();
    };

    let base = pair.base_token.as_ref();
    TokenDetails {
        market_cap: non_zero(pair.market_cap),
        fdv: non_zero(pair.fdv),
        price: non_zero(pair.price_usd),
        liquidity: non_zero(pair.liquidity.as_ref().and_then(|l| l.usd)),
        symbol: non_empty(base.and_then(|b| b.symbol.as_ref())),
        name: non_empty(base.and_then(|b| b.name.as_ref())),
    }
}

#[async_trait]
impl TokenEnricher for DexScreenerClient {
    async fn fetch_token_details(&self, token_address: &str) -> TokenDetails {
        if token_address.trim().is_empty() {
            logger::debug(LogTag::Boosts, "Boost without token address, skipping enrichment");
            return TokenDetails::unavailable();
        }

        tokio::time::sleep(self.request_delay()).await;

        match self.fetch_token_pairs(token_address).await {
            Ok(pairs) => {
                let details = details_from_pairs(&pairs);
                logger::debug(
                    LogTag::Boosts,
                    &format!(
                        "Enriched {} from {} pair(s): symbol={:?} liquidity={:?}",
                        token_address,
                        pairs.len(),
                        details.symbol,
                        details.liquidity
                    ),
                );
                details
            }
            Err(e) => {
                logger::error(
                    LogTag::Boosts,
                    &format!("Error fetching token details for {}: {}", token_address, e),
                );
                TokenDetails::unavailable()
            }
        }
    }
}

#[async_trait]
impl BoostSource for DexScreenerClient {
    async fn fetch_boosts(&self, url: &str) -> Result<BoostPayload, BoostBotError> {
        DexScreenerClient::fetch_boosts(self, url).await
    }
}
