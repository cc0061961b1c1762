/// First-seen tracking for boosted tokens
///
/// Each `(chain, address)` pair gets a timestamp the first time it is
/// tracked. That timestamp is never overwritten; later calls report the
/// stored value with `is_new = false`.
use super::backend::{SeenTokenBackend, SeenTokenMap};
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use crate::utils::format_utc_timestamp;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Result of [`SeenTokenStore::track`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub is_new: bool,
    pub first_seen: String,
}

/// Build the persisted key for a token
///
/// Format is `{chain}_{address}`. `%` and `_` inside the chain id are
/// percent-encoded so the first `_` always ends the chain part, which keeps
/// keys unique while staying identical to plain `chain_address` for normal
/// chain ids.
pub fn seen_token_key(chain_id: &str, token_address: &str) -> String {
    let mut key = String::with_capacity(chain_id.len() + token_address.len() + 1);
    for ch in chain_id.chars() {
        match ch {
            '%' => key.push_str("%25"),
            '_' => key.push_str("%5F"),
            _ => key.push(ch),
        }
    }
    key.push('_');
    key.push_str(token_address);
    key
}

pub struct SeenTokenStore {
    entries: Mutex<SeenTokenMap>,
    backend: Box<dyn SeenTokenBackend>,
}

impl SeenTokenStore {
    /// Load persisted state from `backend`; never fails
    pub fn new(backend: impl SeenTokenBackend + 'static) -> Self {
        let entries = backend.load();
        logger::info(
            LogTag::Storage,
            &format!(
                "Seen-token store ready: {} entries ({})",
                entries.len(),
                backend.describe()
            ),
        );

        Self {
            entries: Mutex::new(entries),
            backend: Box::new(backend),
        }
    }

    /// Record a sighting at the current time
    pub fn track(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<TrackOutcome, BoostBotError> {
        self.track_at(chain_id, token_address, Utc::now())
    }

    /// Record a sighting, using `now` as the first-seen time if the token is new
    pub fn track_at(
        &self,
        chain_id: &str,
        token_address: &str,
        now: DateTime<Utc>,
    ) -> Result<TrackOutcome, BoostBotError> {
        let key = seen_token_key(chain_id, token_address);
        let mut entries = self.entries.lock();

        if let Some(first_seen) = entries.get(&key) {
            return Ok(TrackOutcome {
                is_new: false,
                first_seen: first_seen.clone(),
            });
        }

        let first_seen = format_utc_timestamp(now);
        entries.insert(key.clone(), first_seen.clone());

        if let Err(e) = self.backend.save(&entries) {
            // Keep memory and disk in agreement so the next sighting retries
            entries.remove(&key);
            logger::error(
                LogTag::Storage,
                &format!("Failed to persist seen token {}: {}", key, e),
            );
            return Err(e);
        }

        logger::debug(
            LogTag::Storage,
            &format!("New token {} first seen {}", key, first_seen),
        );

        Ok(TrackOutcome {
            is_new: true,
            first_seen,
        })
    }

    /// Stored first-seen timestamp, without recording anything
    pub fn first_seen(&self, chain_id: &str, token_address: &str) -> Option<String> {
        self.entries
            .lock()
            .get(&seen_token_key(chain_id, token_address))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::{JsonFileBackend, MemoryBackend};
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, s).unwrap()
    }

    #[test]
    fn test_same_token_tracked_twice() {
        let store = SeenTokenStore::new(MemoryBackend::new());

        let first = store.track_at("solana", "Mint111", at(9, 0, 0)).unwrap();
        let second = store.track_at("solana", "Mint111", at(9, 30, 0)).unwrap();

        assert!(first.is_new);
        assert!(!second.is_new);
        assert_eq!(first.first_seen, "2025-03-14 09:00:00 UTC");
        assert_eq!(second.first_seen, first.first_seen);
    }

    #[test]
    fn test_distinct_tokens_are_independent() {
        let backend = MemoryBackend::new();
        let store = SeenTokenStore::new(backend.clone());

        let a = store.track_at("solana", "MintA", at(1, 0, 0)).unwrap();
        let b = store.track_at("ethereum", "0xB", at(2, 0, 0)).unwrap();

        assert!(a.is_new && b.is_new);
        assert_eq!(store.first_seen("solana", "MintA"), Some(a.first_seen.clone()));
        assert_eq!(store.first_seen("ethereum", "0xB"), Some(b.first_seen));
        assert_eq!(store.len(), 2);
        assert_eq!(backend.snapshot().len(), 2);
        assert_eq!(
            backend.snapshot().get("solana_MintA"),
            Some(&"2025-03-14 01:00:00 UTC".to_string())
        );
    }

    #[test]
    fn test_same_address_on_different_chains() {
        let store = SeenTokenStore::new(MemoryBackend::new());
        assert!(store.track_at("base", "0xabc", at(1, 0, 0)).unwrap().is_new);
        assert!(store.track_at("ethereum", "0xabc", at(1, 0, 0)).unwrap().is_new);
    }

    #[test]
    fn test_key_encoding_is_collision_free() {
        assert_eq!(seen_token_key("solana", "Mint"), "solana_Mint");
        assert_ne!(seen_token_key("a_b", "c"), seen_token_key("a", "b_c"));
        assert_eq!(seen_token_key("a_b", "c"), "a%5Fb_c");
        assert_ne!(seen_token_key("a%5Fb", "c"), seen_token_key("a_b", "c"));

        // Sui-style addresses carry separators of their own
        assert_eq!(
            seen_token_key("sui", "0x2::sui_coin::SUI"),
            "sui_0x2::sui_coin::SUI"
        );
    }

    #[test]
    fn test_existing_entries_are_not_new() {
        let mut seeded = SeenTokenMap::new();
        seeded.insert("solana_Mint".to_string(), "2024-01-01 00:00:00 UTC".to_string());
        let store = SeenTokenStore::new(MemoryBackend::with_entries(seeded));

        let outcome = store.track("solana", "Mint").unwrap();
        assert!(!outcome.is_new);
        assert_eq!(outcome.first_seen, "2024-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let backend = MemoryBackend::new();
        let store = SeenTokenStore::new(backend.clone());

        backend.set_fail_saves(true);
        assert!(store.track_at("solana", "Mint", at(1, 0, 0)).is_err());
        assert!(store.is_empty());

        backend.set_fail_saves(false);
        let outcome = store.track_at("solana", "Mint", at(2, 0, 0)).unwrap();
        assert!(outcome.is_new);
        assert_eq!(outcome.first_seen, "2025-03-14 02:00:00 UTC");
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen_tokens.json");

        let first_seen = {
            let store = SeenTokenStore::new(JsonFileBackend::new(&path));
            store.track_at("solana", "Mint", at(5, 6, 7)).unwrap().first_seen
        };

        let reopened = SeenTokenStore::new(JsonFileBackend::new(&path));
        let outcome = reopened.track("solana", "Mint").unwrap();
        assert!(!outcome.is_new);
        assert_eq!(outcome.first_seen, first_seen);
    }

    #[test]
    fn test_corrupted_file_gives_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen_tokens.json");
        std::fs::write(&path, "\u{0}\u{1}garbage").unwrap();

        let store = SeenTokenStore::new(JsonFileBackend::new(&path));
        assert!(store.is_empty());
        assert!(store.track("solana", "Mint").unwrap().is_new);
    }
}
