use instainfo_core::format::group_thousands;
use instainfo_core::resolver::normalize_username;
use proptest::prelude::*;

proptest! {
    /// Removing the separators gives back the plain decimal number.
    #[test]
    fn grouping_preserves_digits(n in any::<u64>()) {
        let grouped = group_thousands(n);
        prop_assert_eq!(grouped.replace(',', ""), n.to_string());
    }

    /// Every group after the first has exactly three digits.
    #[test]
    fn groups_are_three_wide(n in any::<u64>()) {
        let grouped = group_thousands(n);
        let groups: Vec<&str> = grouped.split(',').collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// Decorated input normalizes to the bare username.
    #[test]
    fn strips_decorations(
        name in "[a-z0-9._]{1,30}",
        at in "@{0,2}",
        left in "[ \t]{0,3}",
        right in "[ \t\n]{0,3}"
    ) {
        let raw = format!("{left}{at}{name}{right}");
        prop_assert_eq!(normalize_username(&raw), name.as_str());
    }

    /// Normalized output never starts with `@` or carries outer whitespace.
    #[test]
    fn normalized_is_clean(s in "\\PC*") {
        let out = normalize_username(&s);
        prop_assert!(!out.starts_with('@'));
        prop_assert_eq!(out, out.trim());
    }
}
