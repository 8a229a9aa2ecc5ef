#![deny(missing_docs)]
//! Instagram Info Bot core library.
//!
//! Profile lookup, the Instagram scraping client and reply formatting.
//! Nothing in here knows about Telegram.

/// Configuration management.
pub mod config;
/// Reply templates and number formatting.
pub mod format;
/// Profile value types.
pub mod profile;
/// Username normalization and lookup result mapping.
pub mod resolver;
/// Scraping collaborator trait and the Instagram HTTP client.
pub mod scraper;
/// Utility functions.
pub mod utils;

#[cfg(test)]
pub mod testing;
