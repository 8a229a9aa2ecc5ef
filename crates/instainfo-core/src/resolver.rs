//! Profile resolver
//!
//! Turns raw message text into a [`ProfileLookupResult`]. Every collaborator
//! error is converted here; nothing propagates past the resolver.

use crate::profile::{LookupFailure, ProfileLookupResult};
use crate::scraper::{ProfileScraper, ScrapeError};
use std::sync::Arc;
use tracing::{info, warn};

/// Strips surrounding whitespace and leading `@` from user input.
///
/// No other validation happens; whatever remains is sent to the scraper.
///
/// # Examples
///
/// ```
/// use instainfo_core::resolver::normalize_username;
/// assert_eq!(normalize_username(" @jack "), "jack");
/// assert_eq!(normalize_username("nasa"), "nasa");
/// ```
#[must_use]
pub fn normalize_username(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
}

/// Resolves usernames through an injected [`ProfileScraper`].
#[derive(Clone)]
pub struct ProfileResolver {
    scraper: Arc<dyn ProfileScraper>,
}

impl ProfileResolver {
    /// Create a resolver around a scraper handle
    #[must_use]
    pub fn new(scraper: Arc<dyn ProfileScraper>) -> Self {
        Self { scraper }
    }

    /// Look up the profile named by `raw_text`.
    pub async fn resolve(&self, raw_text: &str) -> ProfileLookupResult {
        let username = normalize_username(raw_text);

        match self.scraper.fetch_profile(username).await {
            Ok(profile) => {
                info!(
                    "Resolved @{} (id {}, {} followers)",
                    profile.username, profile.user_id, profile.followers
                );
                ProfileLookupResult::Success(profile)
            }
            Err(e) => {
                warn!("Lookup for {username:?} failed: {e}");
                ProfileLookupResult::Failure(map_scrape_error(e))
            }
        }
    }
}

fn map_scrape_error(error: ScrapeError) -> LookupFailure {
    match error {
        ScrapeError::NotExists(_) => LookupFailure::NotFound,
        ScrapeError::PrivateNotFollowed(_) => LookupFailure::PrivateInaccessible,
        other => LookupFailure::Other(other.to_string()),
    }
}
