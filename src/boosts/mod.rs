//! Boost pipeline: fetch a boosts feed, enrich each token, render and deliver
//!
//! [`BoostFetchWorkflow`] drives one command invocation. It depends on the
//! [`BoostSource`], [`TokenEnricher`] and [`ChatSink`] traits, implemented by
//! the DexScreener client and the Telegram sink in production.

pub mod enricher;
pub mod formatters;
pub mod types;
pub mod workflow;

pub use enricher::{details_from_pairs, select_best_pair};
pub use formatters::{format_number, format_price, render};
pub use types::{BoostSource, ChatSink, MessageHandle, TokenDetails, TokenEnricher};
pub use workflow::{BoostFetchWorkflow, WorkflowOutcome};
