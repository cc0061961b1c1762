/// DexScreener API response types - raw JSON mappings
///
/// Everything is optional: the public API omits fields freely and the bot
/// renders whatever is present.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// TOKEN BOOSTS (/token-boosts/latest/v1, /token-boosts/top/v1)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostRecord {
    pub chain_id: Option<String>,
    pub token_address: Option<String>,
    /// Kept as raw JSON so it can be shown exactly as received
    pub amount: Option<Value>,
    pub total_amount: Option<Value>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<BoostLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostLink {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub url: Option<String>,
}

/// The boosts endpoints return an array, but a single object is accepted too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoostPayload {
    Many(Vec<BoostRecord>),
    One(BoostRecord),
}

impl BoostPayload {
    pub fn len(&self) -> usize {
        match self {
            BoostPayload::Many(records) => records.len(),
            BoostPayload::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// PAIRS BY TOKEN (/latest/dex/tokens/{address})
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairsResponse {
    /// `null` when DexScreener knows no pairs for the token
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub base_token: Option<DexBaseToken>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<DexLiquidity>,
}

impl DexPair {
    /// USD liquidity, or 0 when the pair reports none
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexBaseToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexLiquidity {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd: Option<f64>,
}

/// Accept a JSON number or a numeric string; anything else is `None`
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_payload_array_and_object() {
        let many: BoostPayload = serde_json::from_str(
            r#"[{"chainId":"solana","tokenAddress":"A","amount":10,"totalAmount":50},
                {"chainId":"base","tokenAddress":"0xB"}]"#,
        )
        .unwrap();
        assert!(matches!(&many, BoostPayload::Many(r) if r.len() == 2));

        let one: BoostPayload = serde_json::from_str(
            r#"{"chainId":"solana","tokenAddress":"A","url":"https://dexscreener.com/solana/a",
                "links":[{"type":"twitter","url":"https://x.com/a"},{"label":"Website","url":"https://a.io"}]}"#,
        )
        .unwrap();
        match one {
            BoostPayload::One(record) => {
                assert_eq!(record.chain_id.as_deref(), Some("solana"));
                let links = record.links.unwrap();
                assert_eq!(links[0].link_type.as_deref(), Some("twitter"));
                assert_eq!(links[1].label.as_deref(), Some("Website"));
            }
            other => panic!("expected single record, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_array_is_many() {
        let payload: BoostPayload = serde_json::from_str("[]").unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(serde_json::from_str::<BoostPayload>("\"maintenance\"").is_err());
    }

    #[test]
    fn test_pair_numeric_fields_are_lenient() {
        let response: PairsResponse = serde_json::from_str(
            r#"{"schemaVersion":"1.0.0","pairs":[
                {"priceUsd":"0.00001234","marketCap":1500000,"fdv":null,
                 "liquidity":{"usd":"2500.5"},"baseToken":{"name":"Cat","symbol":"CAT"}},
                {"priceUsd":"n/a","liquidity":{}}
            ]}"#,
        )
        .unwrap();
        let pairs = response.pairs.unwrap();

        assert_eq!(pairs[0].price_usd, Some(0.00001234));
        assert_eq!(pairs[0].market_cap, Some(1_500_000.0));
        assert_eq!(pairs[0].fdv, None);
        assert_eq!(pairs[0].liquidity_usd(), 2500.5);
        assert_eq!(pairs[1].price_usd, None);
        assert_eq!(pairs[1].liquidity_usd(), 0.0);
    }

    #[test]
    fn test_null_pairs() {
        let response: PairsResponse =
            serde_json::from_str(r#"{"schemaVersion":"1.0.0","pairs":null}"#).unwrap();
        assert!(response.pairs.is_none());
    }
}
