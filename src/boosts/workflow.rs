/// Boost fetch workflow: one command in, a batch of boost messages out
///
/// Sequence per invocation:
/// 1. status message
/// 2. boosts request
/// 3. status edit (best-effort)
/// 4. per boost in order: track, enrich, render, send
/// 5. status delete (best-effort)
///
/// A failure in steps 1, 2 or 4 stops the batch and produces exactly one
/// error reply. Messages already delivered stay in the chat.
use super::formatters;
use super::types::{BoostSource, ChatSink, MessageHandle, TokenEnricher};
use crate::apis::dexscreener::{BoostPayload, BoostRecord};
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use crate::storage::SeenTokenStore;
use crate::utils::utc_timestamp_now;

pub const FOUND_BOOSTS_STATUS: &str = "⚡️ Found boosts! Fetching detailed token information...";

/// Identity used for tracking when the boost omits it
const UNKNOWN_IDENTITY: &str = "unknown";

/// What a single run produced
#[derive(Debug)]
pub struct WorkflowOutcome {
    /// Boost messages sent successfully
    pub delivered: usize,
    /// Error that aborted the batch, already reported to the chat
    pub failure: Option<BoostBotError>,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

pub fn fetching_status(label_prefix: &str) -> String {
    format!("🔍 Fetching {} token boosts...", label_prefix.to_lowercase())
}

/// Labelled boosts in delivery order
pub fn label_boosts(payload: BoostPayload, label_prefix: &str) -> Vec<(String, BoostRecord)> {
    match payload {
        BoostPayload::One(record) => vec![(label_prefix.to_string(), record)],
        BoostPayload::Many(records) => records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| (format!("{} #{}", label_prefix, idx + 1), record))
            .collect(),
    }
}

pub struct BoostFetchWorkflow<'a> {
    source: &'a dyn BoostSource,
    enricher: &'a dyn TokenEnricher,
    store: &'a SeenTokenStore,
}

impl<'a> BoostFetchWorkflow<'a> {
    pub fn new(
        source: &'a dyn BoostSource,
        enricher: &'a dyn TokenEnricher,
        store: &'a SeenTokenStore,
    ) -> Self {
        Self {
            source,
            enricher,
            store,
        }
    }

    /// Run the workflow against one chat
    pub async fn run(
        &self,
        sink: &dyn ChatSink,
        source_url: &str,
        label_prefix: &str,
    ) -> WorkflowOutcome {
        let mut delivered = 0;

        match self.deliver(sink, source_url, label_prefix, &mut delivered).await {
            Ok(()) => {
                logger::info(
                    LogTag::Boosts,
                    &format!("{} boosts: delivered {} message(s)", label_prefix, delivered),
                );
                WorkflowOutcome {
                    delivered,
                    failure: None,
                }
            }
            Err(e) => {
                logger::error(
                    LogTag::Boosts,
                    &format!(
                        "{} boosts failed after {} message(s): {}",
                        label_prefix, delivered, e
                    ),
                );
                if let Err(reply_err) = sink.send_plain(&e.user_message()).await {
                    logger::error(
                        LogTag::Boosts,
                        &format!("Failed to send error reply: {}", reply_err),
                    );
                }
                WorkflowOutcome {
                    delivered,
                    failure: Some(e),
                }
            }
        }
    }

    async fn deliver(
        &self,
        sink: &dyn ChatSink,
        source_url: &str,
        label_prefix: &str,
        delivered: &mut usize,
    ) -> Result<(), BoostBotError> {
        let status = sink.send_plain(&fetching_status(label_prefix)).await?;

        let payload = self.source.fetch_boosts(source_url).await?;
        let fetch_time = utc_timestamp_now();

        if let Err(e) = sink.edit_plain(status, FOUND_BOOSTS_STATUS).await {
            logger::warning(LogTag::Boosts, &format!("Failed to update status message: {}", e));
        }

        for (label, boost) in label_boosts(payload, label_prefix) {
            self.deliver_one(sink, &boost, &fetch_time, &label).await?;
            *delivered += 1;
        }

        self.clear_status(sink, status).await;
        Ok(())
    }

    async fn deliver_one(
        &self,
        sink: &dyn ChatSink,
        boost: &BoostRecord,
        fetch_time: &str,
        label: &str,
    ) -> Result<(), BoostBotError> {
        let chain_id = boost.chain_id.as_deref().unwrap_or(UNKNOWN_IDENTITY);
        let token_address = boost.token_address.as_deref().unwrap_or(UNKNOWN_IDENTITY);

        let tracking = self.store.track(chain_id, token_address)?;
        let details = self
            .enricher
            .fetch_token_details(boost.token_address.as_deref().unwrap_or(""))
            .await;

        let text = formatters::render(boost, &details, &tracking, fetch_time, label);
        sink.send_html(&text, true).await?;

        logger::debug(
            LogTag::Boosts,
            &format!(
                "Sent {} for {}:{} (new={})",
                label, chain_id, token_address, tracking.is_new
            ),
        );
        Ok(())
    }

    async fn clear_status(&self, sink: &dyn ChatSink, status: MessageHandle) {
        if let Err(e) = sink.delete(status).await {
            logger::warning(LogTag::Boosts, &format!("Failed to delete status message: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosts::types::TokenDetails;
    use crate::errors::NETWORK_ERROR_REPLY;
    use crate::storage::MemoryBackend;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Plain(String),
        Html(String, bool),
        Edit(i32, String),
        Delete(i32),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<Sent>>,
        fail_html_after: Option<usize>,
        fail_delete: bool,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<Sent> {
            self.events.lock().clone()
        }

        fn html(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Sent::Html(text, _) => Some(text),
                    _ => None,
                })
                .collect()
        }

        fn plain(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Sent::Plain(text) => Some(text),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl ChatSink for RecordingSink {
        async fn send_plain(&self, text: &str) -> Result<MessageHandle, BoostBotError> {
            let mut events = self.events.lock();
            events.push(Sent::Plain(text.to_string()));
            Ok(MessageHandle(events.len() as i32))
        }

        async fn send_html(
            &self,
            text: &str,
            disable_preview: bool,
        ) -> Result<MessageHandle, BoostBotError> {
            let mut events = self.events.lock();
            let sent_html = events.iter().filter(|e| matches!(e, Sent::Html(..))).count();
            if self.fail_html_after == Some(sent_html) {
                return Err(BoostBotError::Telegram("message is too long".to_string()));
            }
            events.push(Sent::Html(text.to_string(), disable_preview));
            Ok(MessageHandle(events.len() as i32))
        }

        async fn edit_plain(&self, handle: MessageHandle, text: &str) -> Result<(), BoostBotError> {
            self.events.lock().push(Sent::Edit(handle.0, text.to_string()));
            Ok(())
        }

        async fn delete(&self, handle: MessageHandle) -> Result<(), BoostBotError> {
            if self.fail_delete {
                return Err(BoostBotError::Telegram("message can't be deleted".to_string()));
            }
            self.events.lock().push(Sent::Delete(handle.0));
            Ok(())
        }
    }

    struct StaticSource {
        response: Result<BoostPayload, BoostBotError>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticSource {
        fn new(response: Result<BoostPayload, BoostBotError>) -> Self {
            Self {
                response,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BoostSource for StaticSource {
        async fn fetch_boosts(&self, url: &str) -> Result<BoostPayload, BoostBotError> {
            self.requested.lock().push(url.to_string());
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct CountingEnricher {
        lookups: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TokenEnricher for CountingEnricher {
        async fn fetch_token_details(&self, token_address: &str) -> TokenDetails {
            self.lookups.lock().push(token_address.to_string());
            TokenDetails {
                symbol: Some(format!("SYM{}", token_address)),
                ..TokenDetails::unavailable()
            }
        }
    }

    fn boost(chain: &str, address: &str) -> BoostRecord {
        BoostRecord {
            chain_id: Some(chain.to_string()),
            token_address: Some(address.to_string()),
            ..BoostRecord::default()
        }
    }

    #[tokio::test]
    async fn test_array_produces_labelled_messages_in_order() {
        let source = StaticSource::new(Ok(BoostPayload::Many(vec![
            boost("solana", "A"),
            boost("base", "B"),
            boost("solana", "C"),
        ])));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "https://api.test/token-boosts/latest/v1", "Latest")
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.delivered, 3);

        let html = sink.html();
        assert_eq!(html.len(), 3);
        assert!(html[0].starts_with("🚀 <b>Latest #1 Token Boost</b> 🆕 NEW!"));
        assert!(html[1].starts_with("🚀 <b>Latest #2 Token Boost</b>"));
        assert!(html[2].starts_with("🚀 <b>Latest #3 Token Boost</b>"));
        assert!(html[0].contains("SYMA") && html[1].contains("SYMB") && html[2].contains("SYMC"));

        let events = sink.events();
        assert_eq!(events[0], Sent::Plain("🔍 Fetching latest token boosts...".to_string()));
        assert_eq!(events[1], Sent::Edit(1, FOUND_BOOSTS_STATUS.to_string()));
        assert!(matches!(events[2], Sent::Html(_, true)));
        assert_eq!(events.last(), Some(&Sent::Delete(1)));

        assert_eq!(*enricher.lookups.lock(), vec!["A", "B", "C"]);
        assert_eq!(
            *source.requested.lock(),
            vec!["https://api.test/token-boosts/latest/v1"]
        );
    }

    #[tokio::test]
    async fn test_single_object_uses_plain_prefix() {
        let source = StaticSource::new(Ok(BoostPayload::One(boost("solana", "A"))));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Top")
            .await;

        assert_eq!(outcome.delivered, 1);
        assert!(sink.html()[0].starts_with("🚀 <b>Top Token Boost</b>"));
        assert_eq!(sink.plain(), vec!["🔍 Fetching top token boosts...".to_string()]);
    }

    #[tokio::test]
    async fn test_repeat_token_in_batch_is_updated_and_reenriched() {
        let source = StaticSource::new(Ok(BoostPayload::Many(vec![
            boost("solana", "A"),
            boost("solana", "A"),
        ])));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        let html = sink.html();
        assert!(html[0].contains("🆕 NEW!"));
        assert!(html[1].contains("📊 Updated"));
        assert_eq!(enricher.lookups.lock().len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_sends_single_error_reply() {
        let source = StaticSource::new(Err(BoostBotError::network("url", "connection refused")));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        assert_eq!(outcome.delivered, 0);
        assert!(outcome.failure.as_ref().is_some_and(|e| e.is_network()));
        assert!(sink.html().is_empty());
        assert_eq!(
            sink.plain(),
            vec![
                "🔍 Fetching latest token boosts...".to_string(),
                NETWORK_ERROR_REPLY.to_string()
            ]
        );
        // Status message stays in place on failure
        assert!(!sink.events().iter().any(|e| matches!(e, Sent::Delete(_))));
    }

    #[tokio::test]
    async fn test_data_error_sends_generic_reply() {
        let source = StaticSource::new(Err(BoostBotError::Data("unexpected payload".to_string())));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Top")
            .await;

        assert_eq!(
            sink.plain().last().map(String::as_str),
            Some("❌ Error: Data error: unexpected payload")
        );
    }

    #[tokio::test]
    async fn test_send_failure_aborts_rest_of_batch() {
        let source = StaticSource::new(Ok(BoostPayload::Many(vec![
            boost("solana", "A"),
            boost("solana", "B"),
            boost("solana", "C"),
        ])));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink {
            fail_html_after: Some(1),
            ..RecordingSink::default()
        };

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        assert_eq!(outcome.delivered, 1);
        assert_eq!(sink.html().len(), 1);
        assert_eq!(
            sink.plain().last().map(String::as_str),
            Some("❌ Error: Telegram error: message is too long")
        );
        assert_eq!(enricher.lookups.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_aborts_batch() {
        let backend = MemoryBackend::new();
        backend.set_fail_saves(true);
        let source = StaticSource::new(Ok(BoostPayload::Many(vec![boost("solana", "A")])));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(backend);
        let sink = RecordingSink::default();

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        assert!(matches!(outcome.failure, Some(BoostBotError::Storage(_))));
        assert!(sink.html().is_empty());
        assert!(enricher.lookups.lock().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_is_not_an_error() {
        let source = StaticSource::new(Ok(BoostPayload::Many(vec![boost("solana", "A")])));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink {
            fail_delete: true,
            ..RecordingSink::default()
        };

        let outcome = BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.delivered, 1);
    }

    #[tokio::test]
    async fn test_missing_identity_tracks_as_unknown() {
        let source = StaticSource::new(Ok(BoostPayload::One(BoostRecord::default())));
        let enricher = CountingEnricher::default();
        let store = SeenTokenStore::new(MemoryBackend::new());
        let sink = RecordingSink::default();

        BoostFetchWorkflow::new(&source, &enricher, &store)
            .run(&sink, "url", "Latest")
            .await;

        assert!(store.first_seen("unknown", "unknown").is_some());
        assert_eq!(*enricher.lookups.lock(), vec![String::new()]);
    }

    #[test]
    fn test_labels() {
        let labelled = label_boosts(
            BoostPayload::Many(vec![boost("a", "1"), boost("b", "2")]),
            "Top",
        );
        let labels: Vec<&str> = labelled.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Top #1", "Top #2"]);
        assert_eq!(fetching_status("Latest"), "🔍 Fetching latest token boosts...");
    }
}
