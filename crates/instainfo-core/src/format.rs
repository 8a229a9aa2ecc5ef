//! Reply templates
//!
//! All rendering is pure: the same input always produces the same bytes.
//! Replies are sent without a parse mode, so nothing here is escaped.

use crate::profile::{LookupFailure, ProfileFields, ProfileLookupResult};

/// Placeholder for a missing full name or external URL.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a missing biography.
pub const NO_BIO: &str = "No bio";

const HELP_TEXT: &str = "🤖 Instagram Info Bot Help\n\n\
     📝 Usage:\n\
     बस किसी भी Instagram username को मुझे भेजें (बिना @ के)\n\n\
     📊 मैं क्या जानकारी दूंगा:\n\
     ✅ Profile information\n\
     ✅ Followers count\n\
     ✅ Following count\n\
     ✅ Posts count\n\
     ✅ Bio\n\
     ✅ Profile picture\n\
     ✅ Private/Public status\n\n\
     ⚠️ Note: यह बॉट सिर्फ public accounts की जानकारी दे सकता है।";

/// Greeting sent in reply to `/start`.
#[must_use]
pub fn render_start(first_name: &str) -> String {
    format!(
        "नमस्ते {first_name}! 👋\n\n\
         मैं Instagram Info Bot हूँ!\n\n\
         बस मुझे Instagram username भेजें और मैं उसकी पूरी जानकारी दूंगा।\n\n\
         Commands:\n\
         /start - बॉट शुरू करें\n\
         /help - मदद प्राप्त करें"
    )
}

/// Help text sent in reply to `/help`.
#[must_use]
pub const fn render_help() -> &'static str {
    HELP_TEXT
}

/// Render either the profile card or the error message.
#[must_use]
pub fn render_result(result: &ProfileLookupResult) -> String {
    match result {
        ProfileLookupResult::Success(profile) => render_profile(profile),
        ProfileLookupResult::Failure(reason) => render_failure(reason),
    }
}

/// Bilingual error message naming the failure reason.
#[must_use]
pub fn render_failure(reason: &LookupFailure) -> String {
    format!(
        "❌ Error: {reason}\n\n\
         कृपया सही username दें और सुनिश्चित करें कि account public है।"
    )
}

/// Profile card with grouped counters and placeholders for missing fields.
#[must_use]
pub fn render_profile(profile: &ProfileFields) -> String {
    let full_name = present(profile.full_name.as_deref()).unwrap_or(NOT_AVAILABLE);
    let bio = present(profile.bio.as_deref()).unwrap_or(NO_BIO);
    let external_url = present(profile.external_url.as_deref()).unwrap_or(NOT_AVAILABLE);
    let account_type = if profile.is_private {
        "Private 🔐"
    } else {
        "Public 🌐"
    };
    let verified = if profile.is_verified { "Yes ✅" } else { "No ❌" };

    format!(
        "📱 Instagram Profile Info\n\n\
         👤 Username: @{username}\n\
         🆔 User ID: {user_id}\n\
         👨‍💼 Full Name: {full_name}\n\n\
         📊 Statistics:\n\
         👥 Followers: {followers}\n\
         👥 Following: {following}\n\
         📸 Posts: {posts}\n\n\
         📝 Bio:\n\
         {bio}\n\n\
         🔗 External URL: {external_url}\n\n\
         🔒 Account Type: {account_type}\n\
         ✅ Verified: {verified}",
        username = profile.username,
        user_id = profile.user_id,
        followers = group_thousands(profile.followers),
        following = group_thousands(profile.following),
        posts = group_thousands(profile.post_count),
    )
}

/// Formats an integer with `,` between groups of three digits.
///
/// # Examples
///
/// ```
/// use instainfo_core::format::group_thousands;
/// assert_eq!(group_thousands(1_234_567), "1,234,567");
/// assert_eq!(group_thousands(999), "999");
/// ```
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_profile;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_profile_counts_are_grouped() {
        let text = render_profile(&sample_profile());
        assert!(text.contains("👥 Followers: 1,234,567"));
        assert!(text.contains("👥 Following: 42"));
        assert!(text.contains("📸 Posts: 3,021"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let profile = ProfileFields {
            full_name: None,
            bio: Some("   ".to_string()),
            external_url: Some(String::new()),
            ..sample_profile()
        };
        let text = render_profile(&profile);
        assert!(text.contains("👨‍💼 Full Name: N/A"));
        assert!(text.contains("📝 Bio:\nNo bio"));
        assert!(text.contains("🔗 External URL: N/A"));
    }

    #[test]
    fn test_flag_labels() {
        let public = render_profile(&sample_profile());
        assert!(public.contains("Account Type: Public 🌐"));
        assert!(public.contains("Verified: Yes ✅"));

        let private = render_profile(&ProfileFields {
            is_private: true,
            is_verified: false,
            ..sample_profile()
        });
        assert!(private.contains("Account Type: Private 🔐"));
        assert!(private.contains("Verified: No ❌"));
    }

    #[test]
    fn test_failure_template() {
        let text = render_result(&ProfileLookupResult::Failure(LookupFailure::NotFound));
        assert!(text.starts_with("❌ Error: Profile does not exist"));
        assert!(text.contains("account public है"));

        let text = render_failure(&LookupFailure::Other("API error: 429 slow down".to_string()));
        assert!(text.contains("❌ Error: API error: 429 slow down"));
    }

    #[test]
    fn test_rendering_is_pure() {
        let result = ProfileLookupResult::Success(sample_profile());
        assert_eq!(render_result(&result), render_result(&result));
        assert_eq!(render_start("Asha"), render_start("Asha"));
    }

    #[test]
    fn test_start_uses_first_name() {
        assert!(render_start("Asha").starts_with("नमस्ते Asha! 👋"));
    }
}
