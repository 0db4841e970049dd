//! Mock content provider for testing.
//!
//! Provides [`MockContent`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::provider::{
    ContentError, ContentPage, ContentProvider, is_within, normalize_slug, sort_listing,
};

/// In-memory content provider.
///
/// Directories are registered implicitly from page slugs: adding
/// `"guides/setup"` makes `"guides"` a known directory. Use
/// [`MockContent::with_directory`] for an empty directory.
///
/// # Example
///
/// ```
/// use sidenav_content::{ContentProvider, MockContent};
///
/// let content = MockContent::new()
///     .with_page("welcome")
///     .with_titled_page("guides/setup", "Setup");
///
/// assert!(content.has_page("welcome"));
/// assert_eq!(content.directory_pages("guides").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockContent {
    pages: BTreeMap<String, ContentPage>,
    directories: BTreeSet<String>,
}

impl MockContent {
    /// Create an empty mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untitled page.
    #[must_use]
    pub fn with_page(self, slug: impl Into<String>) -> Self {
        self.with_content_page(ContentPage::new(slug))
    }

    /// Add a page with a title.
    #[must_use]
    pub fn with_titled_page(self, slug: impl Into<String>, title: impl Into<String>) -> Self {
        self.with_content_page(ContentPage::new(slug).with_title(title))
    }

    /// Add a fully specified page.
    #[must_use]
    pub fn with_content_page(mut self, mut page: ContentPage) -> Self {
        page.slug = normalize_slug(&page.slug).to_owned();
        let mut dir = page.slug.as_str();
        while let Some((parent, _)) = dir.rsplit_once('/') {
            self.directories.insert(parent.to_owned());
            dir = parent;
        }
        self.pages.insert(page.slug.clone(), page);
        self
    }

    /// Register a directory, possibly without pages.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        let directory: String = directory.into();
        self.directories.insert(normalize_slug(&directory).to_owned());
        self
    }
}

impl ContentProvider for MockContent {
    fn has_page(&self, slug: &str) -> bool {
        self.pages.contains_key(normalize_slug(slug))
    }

    fn directory_pages(&self, directory: &str) -> Result<Vec<ContentPage>, ContentError> {
        let directory = normalize_slug(directory);
        if !directory.is_empty() && !self.directories.contains(directory) {
            return Err(ContentError::UnknownDirectory(directory.to_owned()));
        }
        let mut pages: Vec<_> = self
            .pages
            .values()
            .filter(|page| is_within(&page.slug, directory))
            .cloned()
            .collect();
        sort_listing(&mut pages);
        Ok(pages)
    }
}
