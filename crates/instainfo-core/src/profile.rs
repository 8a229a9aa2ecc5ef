//! Profile value types
//!
//! `ProfileFields` is what the scraping collaborator returns,
//! `ProfileLookupResult` is what the resolver hands to the formatter.

use thiserror::Error;

/// Public metadata of an Instagram profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    /// Canonical username, without `@`
    pub username: String,
    /// Numeric Instagram user id
    pub user_id: u64,
    /// Display name
    pub full_name: Option<String>,
    /// Follower count
    pub followers: u64,
    /// Following count
    pub following: u64,
    /// Number of posts
    pub post_count: u64,
    /// Biography text
    pub bio: Option<String>,
    /// Whether the account is private
    pub is_private: bool,
    /// Whether the account carries the verified badge
    pub is_verified: bool,
    /// URL of the profile picture
    pub profile_pic_url: Option<String>,
    /// Link shown on the profile
    pub external_url: Option<String>,
}

/// Why a lookup did not produce a profile.
///
/// The `Display` text is the human-readable reason embedded in the error reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    /// No profile with that username
    #[error("Profile does not exist")]
    NotFound,
    /// The profile is private and its data is not visible
    #[error("Private profile - cannot access")]
    PrivateInaccessible,
    /// Any other collaborator failure, with its description
    #[error("{0}")]
    Other(String),
}

/// Outcome of resolving one incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookupResult {
    /// Profile was fetched
    Success(ProfileFields),
    /// Profile could not be fetched
    Failure(LookupFailure),
}

impl ProfileLookupResult {
    /// Returns the profile picture URL of a successful lookup.
    #[must_use]
    pub fn profile_pic_url(&self) -> Option<&str> {
        match self {
            Self::Success(profile) => profile.profile_pic_url.as_deref(),
            Self::Failure(_) => None,
        }
    }

    /// Returns `true` for the `Success` variant.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
