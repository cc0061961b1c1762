//! Seen-token persistence
//!
//! [`SeenTokenStore`] owns the in-memory map and writes it through a
//! [`SeenTokenBackend`] whenever a new token appears.

pub mod backend;
pub mod seen_tokens;

pub use backend::{JsonFileBackend, MemoryBackend, SeenTokenBackend, SeenTokenMap};
pub use seen_tokens::{seen_token_key, SeenTokenStore, TrackOutcome};
