pub mod apis;
pub mod arguments;
pub mod boosts;
pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod storage;
#[cfg(feature = "telegram")]
pub mod telegram;
pub mod utils;
