/// External API clients
pub mod client;
pub mod dexscreener;

pub use client::HttpClient;
pub use dexscreener::DexScreenerClient;
