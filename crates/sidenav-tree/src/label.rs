//! Label derivation for page references without an explicit label.

use sidenav_content::normalize_slug;

/// Derive a display label from a slug.
///
/// Takes the final path segment, splits it on `-`, `_` and spaces, and
/// capitalizes the first letter of each word. The rest of each word is kept
/// as written, so acronyms written in capitals survive.
///
/// # Examples
///
/// ```
/// use sidenav_tree::derive_label;
///
/// assert_eq!(derive_label("course/worlds-best-intro-to-tdd"), "Worlds Best Intro To Tdd");
/// assert_eq!(derive_label("working-sessions"), "Working Sessions");
/// ```
#[must_use]
pub fn derive_label(slug: &str) -> String {
    let slug = normalize_slug(slug);
    let last = slug.rsplit_once('/').map_or(slug, |(_, last)| last);
    titlecase_from_slug(last)
}

/// Convert a kebab-case or `snake_case` word list to title case.
pub(crate) fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_label_uses_last_segment() {
        assert_eq!(
            derive_label("course/worlds-best-intro-to-tdd"),
            "Worlds Best Intro To Tdd"
        );
        assert_eq!(derive_label("a/b/c"), "C");
    }

    #[test]
    fn test_derive_label_single_segment() {
        assert_eq!(derive_label("welcome"), "Welcome");
        assert_eq!(derive_label("ensemble-programming"), "Ensemble Programming");
    }

    #[test]
    fn test_derive_label_ignores_trailing_slash() {
        assert_eq!(derive_label("/guides/setup-guide/"), "Setup Guide");
    }

    #[test]
    fn test_titlecase_collapses_repeated_separators() {
        assert_eq!(titlecase_from_slug("my__page--two"), "My Page Two");
        assert_eq!(titlecase_from_slug("-leading"), "Leading");
    }

    #[test]
    fn test_titlecase_keeps_existing_capitals() {
        assert_eq!(titlecase_from_slug("intro-to-TDD"), "Intro To TDD");
    }

    #[test]
    fn test_titlecase_unicode_first_letter() {
        assert_eq!(titlecase_from_slug("été-notes"), "Été Notes");
    }
}
