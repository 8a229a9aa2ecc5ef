//! Scraping collaborator
//!
//! `ProfileScraper` is the seam between the resolver and whatever fetches
//! Instagram profile data. `InstagramClient` is the production implementation.

mod instagram;

pub use instagram::InstagramClient;

use crate::profile::ProfileFields;
use thiserror::Error;

/// Errors that can occur while fetching a profile
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No profile with that username
    #[error("Profile {0} does not exist")]
    NotExists(String),
    /// Private profile whose data is hidden from anonymous viewers
    #[error("Profile {0} is private and not followed")]
    PrivateNotFollowed(String),
    /// Username rejected before any request was made
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),
    /// Error during network communication
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Non-success status returned by Instagram
    #[error("API error: {status} {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or a short description of it
        message: String,
    },
    /// Payload did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Fetches public profile metadata for a username.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileScraper: Send + Sync {
    /// Look up a single profile.
    async fn fetch_profile(&self, username: &str) -> Result<ProfileFields, ScrapeError>;
}
