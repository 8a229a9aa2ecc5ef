//! Testing helpers and fixtures.

use crate::profile::ProfileFields;

/// A fully populated public, verified profile.
#[must_use]
pub fn sample_profile() -> ProfileFields {
    ProfileFields {
        username: "jack".to_string(),
        user_id: 12,
        full_name: Some("Jack Dorsey".to_string()),
        followers: 1_234_567,
        following: 42,
        post_count: 3021,
        bio: Some("just setting up my insta".to_string()),
        is_private: false,
        is_verified: true,
        profile_pic_url: Some("https://cdn.example/jack.jpg".to_string()),
        external_url: Some("https://example.com".to_string()),
    }
}
