//! Slug index over a navigation tree.

use std::collections::HashMap;

use sidenav_content::normalize_slug;

use crate::flatten::Flatten;
use crate::model::NavEntry;

/// Where a page sits in the navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// Labels of enclosing groups, outermost first.
    pub breadcrumb: Vec<String>,
    /// Position in reading (flatten) order.
    pub position: usize,
}

/// Pages immediately before and after a page in reading order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Previous page slug.
    pub prev: Option<&'a str>,
    /// Next page slug.
    pub next: Option<&'a str>,
}

/// Mapping from slug to breadcrumb and reading position.
///
/// Built once alongside the tree. Lookups normalize the slug, so `"/guide/"`
/// finds `"guide"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavIndex {
    pages: HashMap<String, PageInfo>,
    order: Vec<String>,
}

impl NavIndex {
    pub(crate) fn from_entries(entries: &[NavEntry]) -> Self {
        let mut pages = HashMap::new();
        let mut order = Vec::new();
        for (position, flat) in Flatten::new(entries).enumerate() {
            order.push(flat.page.slug.clone());
            pages.insert(
                flat.page.slug.clone(),
                PageInfo {
                    breadcrumb: flat.breadcrumb.into_iter().map(str::to_owned).collect(),
                    position,
                },
            );
        }
        Self { pages, order }
    }

    /// Look up a page.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&PageInfo> {
        self.pages.get(normalize_slug(slug))
    }

    /// Ancestor labels of a page.
    #[must_use]
    pub fn breadcrumb(&self, slug: &str) -> Option<&[String]> {
        self.get(slug).map(|info| info.breadcrumb.as_slice())
    }

    /// Whether the navigation links to the page.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Slugs in reading order.
    #[must_use]
    pub fn slugs(&self) -> &[String] {
        &self.order
    }

    /// Previous and next pages for "previous/next page" links.
    #[must_use]
    pub fn neighbors(&self, slug: &str) -> Option<Neighbors<'_>> {
        let position = self.get(slug)?.position;
        Some(Neighbors {
            prev: position
                .checked_sub(1)
                .and_then(|i| self.order.get(i))
                .map(String::as_str),
            next: self.order.get(position + 1).map(String::as_str),
        })
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no pages are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use crate::decl::{EntryDecl, SidebarEntry};

    fn tree() -> crate::NavTree {
        let sidebar: Vec<SidebarEntry> = vec![
            "welcome".into(),
            EntryDecl::group(
                "Course",
                vec![
                    "course/intro".into(),
                    EntryDecl::group("Advanced", vec!["course/advanced/mocks".into()]).into(),
                ],
            )
            .into(),
            "contact".into(),
        ];
        build(&sidebar).unwrap()
    }

    #[test]
    fn test_breadcrumb_lookup() {
        let tree = tree();
        let index = tree.index();

        assert_eq!(index.breadcrumb("welcome"), Some(&[] as &[String]));
        assert_eq!(
            index.breadcrumb("course/advanced/mocks").unwrap(),
            ["Course", "Advanced"]
        );
        assert_eq!(index.breadcrumb("missing"), None);
    }

    #[test]
    fn test_lookup_normalizes_slug() {
        let tree = tree();

        assert!(tree.index().contains("/course/intro/"));
    }

    #[test]
    fn test_positions_follow_reading_order() {
        let tree = tree();
        let index = tree.index();

        assert_eq!(index.len(), 4);
        assert_eq!(
            index.slugs(),
            ["welcome", "course/intro", "course/advanced/mocks", "contact"]
        );
        assert_eq!(index.get("contact").unwrap().position, 3);
    }

    #[test]
    fn test_neighbors() {
        let tree = tree();

        assert_eq!(
            tree.neighbors("welcome"),
            Some(Neighbors {
                prev: None,
                next: Some("course/intro")
            })
        );
        assert_eq!(
            tree.neighbors("course/advanced/mocks"),
            Some(Neighbors {
                prev: Some("course/intro"),
                next: Some("contact")
            })
        );
        assert_eq!(
            tree.neighbors("contact"),
            Some(Neighbors {
                prev: Some("course/advanced/mocks"),
                next: None
            })
        );
        assert_eq!(tree.neighbors("missing"), None);
    }
}
