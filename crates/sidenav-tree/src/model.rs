//! Validated navigation model.
//!
//! A [`NavTree`] only exists after a successful build: every group has
//! children, every slug is unique, and every page has a label. It is never
//! mutated afterwards; operations that change shape, like
//! [`NavTree::expand`](crate::NavTree::expand), return a new tree.

use serde::Serialize;

use crate::flatten::Flatten;
use crate::index::{NavIndex, Neighbors, PageInfo};
use crate::location::EntryPath;

/// Reference to a single content page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRef {
    /// Normalized slug.
    pub slug: String,
    /// Display label (declared or derived from the slug).
    pub label: String,
    /// Declaration location.
    #[serde(skip)]
    pub location: EntryPath,
}

/// Labeled group of inline children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Display label.
    pub label: String,
    /// Whether the group starts collapsed.
    pub collapsed: bool,
    /// Children in display order. Never empty.
    pub items: Vec<NavEntry>,
    /// Declaration location.
    #[serde(skip)]
    pub location: EntryPath,
}

/// Group whose children come from a content directory.
///
/// Passed through untouched by the builder; see
/// [`NavTree::expand`](crate::NavTree::expand) for resolving it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AutoGroup {
    /// Display label.
    pub label: String,
    /// Content directory.
    pub directory: String,
    /// Whether the group starts collapsed.
    pub collapsed: bool,
    /// Declaration location.
    #[serde(skip)]
    pub location: EntryPath,
}

/// Navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEntry {
    /// Leaf page.
    Page(PageRef),
    /// Inline group.
    Group(Group),
    /// Autogenerated group.
    AutoGroup(AutoGroup),
}

impl NavEntry {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Page(page) => &page.label,
            Self::Group(group) => &group.label,
            Self::AutoGroup(auto) => &auto.label,
        }
    }

    /// Declaration location.
    #[must_use]
    pub fn location(&self) -> &EntryPath {
        match self {
            Self::Page(page) => &page.location,
            Self::Group(group) => &group.location,
            Self::AutoGroup(auto) => &auto.location,
        }
    }

    /// Levels spanned by this entry, 1 for leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Page(_) | Self::AutoGroup(_) => 1,
            Self::Group(group) => 1 + group.items.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

/// Validated sidebar navigation.
///
/// Serializes as the plain list of top-level entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    entries: Vec<NavEntry>,
    #[serde(skip)]
    index: NavIndex,
}

impl NavTree {
    pub(crate) fn new(entries: Vec<NavEntry>) -> Self {
        let index = NavIndex::from_entries(&entries);
        Self { entries, index }
    }

    /// Top-level entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Whether the sidebar declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slug index for breadcrumbs and current-page highlighting.
    #[must_use]
    pub fn index(&self) -> &NavIndex {
        &self.index
    }

    /// Look up a page by slug.
    #[must_use]
    pub fn page_info(&self, slug: &str) -> Option<&PageInfo> {
        self.index.get(slug)
    }

    /// Previous and next pages around `slug` in reading order.
    #[must_use]
    pub fn neighbors(&self, slug: &str) -> Option<Neighbors<'_>> {
        self.index.neighbors(slug)
    }

    /// Leaf pages in depth-first declared order with their ancestor labels.
    ///
    /// Each call starts a fresh traversal; autogenerated groups contribute no
    /// pages until expanded.
    #[must_use]
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(&self.entries)
    }

    /// Maximum nesting depth, 1 for a flat sidebar and 0 for an empty one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.iter().map(NavEntry::depth).max().unwrap_or(0)
    }

    /// Locations of entries nested deeper than `limit` levels.
    ///
    /// The tree is never truncated; callers decide whether to warn or fail.
    #[must_use]
    pub fn entries_deeper_than(&self, limit: usize) -> Vec<&EntryPath> {
        fn visit<'a>(entries: &'a [NavEntry], limit: usize, out: &mut Vec<&'a EntryPath>) {
            for entry in entries {
                if entry.location().level() > limit {
                    out.push(entry.location());
                }
                if let NavEntry::Group(group) = entry {
                    visit(&group.items, limit, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.entries, limit, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use crate::decl::{EntryDecl, SidebarEntry};

    static_assertions::assert_impl_all!(NavTree: Send, Sync);

    fn nested_tree() -> NavTree {
        let sidebar: Vec<SidebarEntry> = vec![
            "a".into(),
            EntryDecl::group(
                "B",
                vec![
                    "b1".into(),
                    EntryDecl::group("Deep", vec!["b2".into()]).into(),
                ],
            )
            .into(),
            EntryDecl::autogenerate("Guides", "guides").into(),
        ];
        build(&sidebar).unwrap()
    }

    #[test]
    fn test_depth_counts_nested_groups() {
        assert_eq!(nested_tree().depth(), 3);
    }

    #[test]
    fn test_depth_of_empty_tree_is_zero() {
        assert_eq!(build(&[]).unwrap().depth(), 0);
    }

    #[test]
    fn test_entries_deeper_than_reports_locations() {
        let tree = nested_tree();

        let deep: Vec<String> = tree
            .entries_deeper_than(2)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(deep, vec!["sidebar[1].items[1].items[0]"]);
        assert!(tree.entries_deeper_than(3).is_empty());
    }

    #[test]
    fn test_entry_accessors() {
        let tree = nested_tree();
        let group = &tree.entries()[1];

        assert_eq!(group.label(), "B");
        assert_eq!(group.location().to_string(), "sidebar[1]");
        assert_eq!(group.depth(), 3);
    }

    #[test]
    fn test_serialize_tagged_without_locations() {
        let tree = nested_tree();

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            json[0],
            serde_json::json!({"type": "page", "slug": "a", "label": "A"})
        );
        assert_eq!(json[1]["type"], "group");
        assert_eq!(json[1]["collapsed"], false);
        assert_eq!(json[1]["items"][1]["items"][0]["slug"], "b2");
        assert_eq!(
            json[2],
            serde_json::json!({
                "type": "auto_group",
                "label": "Guides",
                "directory": "guides",
                "collapsed": false
            })
        );
    }
}
