//! Content provider trait and error types.

use std::path::PathBuf;

/// A page known to the content provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPage {
    /// Normalized slug (e.g., "guides/setup").
    pub slug: String,
    /// Display title (sidebar label override > frontmatter title > H1).
    ///
    /// `None` when the page declares no title; consumers derive one from the slug.
    pub title: Option<String>,
    /// Explicit sort position within a directory listing.
    pub order: Option<i64>,
}

impl ContentPage {
    /// Create a page with only a slug.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: None,
            order: None,
        }
    }

    /// Attach a display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach an explicit sort position.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Content provider error.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Content root does not exist.
    #[error("Content directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Directory is not part of the content tree.
    #[error("Unknown content directory: {0}")]
    UnknownDirectory(String),
    /// I/O error while scanning.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Two files resolve to the same slug.
    #[error(
        "Duplicate page '{slug}': {} and {} resolve to the same slug",
        first.display(),
        second.display()
    )]
    DuplicatePage {
        /// Shared slug.
        slug: String,
        /// Earlier file in path order.
        first: PathBuf,
        /// Later file in path order.
        second: PathBuf,
    },
    /// Frontmatter could not be parsed.
    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Frontmatter {
        /// Markdown file with the invalid block.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Source of truth for which pages exist.
///
/// Implementations must be cheap to query repeatedly: the navigation builder
/// calls `has_page` once per declared page reference.
pub trait ContentProvider: Send + Sync {
    /// Check whether a page exists for the slug.
    ///
    /// The slug is normalized before lookup, so `"/guide/"` and `"guide"` are equivalent.
    fn has_page(&self, slug: &str) -> bool;

    /// List the pages under a directory, recursively, in display order.
    ///
    /// Pages marked hidden are excluded. An existing directory without visible
    /// pages yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownDirectory`] if the directory is not part of
    /// the content tree.
    fn directory_pages(&self, directory: &str) -> Result<Vec<ContentPage>, ContentError>;
}

/// Strip leading and trailing slashes from a slug.
///
/// # Examples
///
/// ```
/// use sidenav_content::normalize_slug;
///
/// assert_eq!(normalize_slug("/training/"), "training");
/// assert_eq!(normalize_slug("guides/setup"), "guides/setup");
/// ```
#[must_use]
pub fn normalize_slug(slug: &str) -> &str {
    slug.trim_matches('/')
}

/// Sort pages for a directory listing: explicitly ordered pages first
/// (ascending), then the rest by slug.
pub(crate) fn sort_listing(pages: &mut [ContentPage]) {
    pages.sort_by(|a, b| match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

/// Check whether `slug` lies inside `directory` (or is its index page).
pub(crate) fn is_within(slug: &str, directory: &str) -> bool {
    directory.is_empty()
        || slug == directory
        || slug
            .strip_prefix(directory)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug_strips_slashes() {
        assert_eq!(normalize_slug("/training/"), "training");
        assert_eq!(normalize_slug("//a/b//"), "a/b");
        assert_eq!(normalize_slug("welcome"), "welcome");
        assert_eq!(normalize_slug("/"), "");
    }

    #[test]
    fn test_is_within_matches_directory_prefix() {
        assert!(is_within("guides/setup", "guides"));
        assert!(is_within("guides", "guides"));
        assert!(is_within("guides/a/b", "guides"));
        assert!(!is_within("guidestone", "guides"));
        assert!(!is_within("other/setup", "guides"));
        assert!(is_within("anything", ""));
    }

    #[test]
    fn test_sort_listing_orders_explicit_first() {
        let mut pages = vec![
            ContentPage::new("g/c"),
            ContentPage::new("g/b").with_order(2),
            ContentPage::new("g/a"),
            ContentPage::new("g/d").with_order(1),
        ];

        sort_listing(&mut pages);

        let slugs: Vec<_> = pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["g/d", "g/b", "g/a", "g/c"]);
    }

    #[test]
    fn test_content_error_display() {
        let err = ContentError::UnknownDirectory("guides".to_owned());
        assert_eq!(err.to_string(), "Unknown content directory: guides");

        let err = ContentError::NotFound(PathBuf::from("/docs"));
        assert_eq!(err.to_string(), "Content directory not found: /docs");
    }
}
