//! Depth-first page traversal.

use std::iter::FusedIterator;
use std::slice;

use crate::model::{NavEntry, PageRef};

/// Leaf page with its ancestor group labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatPage<'a> {
    /// Labels of enclosing groups, outermost first.
    pub breadcrumb: Vec<&'a str>,
    /// The page itself.
    pub page: &'a PageRef,
}

/// Lazy depth-first iterator over the pages of a [`NavTree`](crate::NavTree).
///
/// Uses an explicit stack, so arbitrarily deep trees do not recurse.
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    /// Open groups: label (`None` for the top level) and remaining children.
    stack: Vec<(Option<&'a str>, slice::Iter<'a, NavEntry>)>,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(entries: &'a [NavEntry]) -> Self {
        Self {
            stack: vec![(None, entries.iter())],
        }
    }

    fn breadcrumb(&self) -> Vec<&'a str> {
        self.stack.iter().filter_map(|(label, _)| *label).collect()
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatPage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (_, children) = self.stack.last_mut()?;
            match children.next() {
                None => {
                    self.stack.pop();
                }
                Some(NavEntry::Page(page)) => {
                    return Some(FlatPage {
                        breadcrumb: self.breadcrumb(),
                        page,
                    });
                }
                Some(NavEntry::Group(group)) => {
                    self.stack.push((Some(&group.label), group.items.iter()));
                }
                Some(NavEntry::AutoGroup(_)) => {}
            }
        }
    }
}

impl FusedIterator for Flatten<'_> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::build;
    use crate::decl::{EntryDecl, SidebarEntry};

    fn slugs(tree: &crate::NavTree) -> Vec<&str> {
        tree.flatten().map(|p| p.page.slug.as_str()).collect()
    }

    #[test]
    fn test_flatten_preserves_declared_order() {
        let sidebar: Vec<SidebarEntry> = vec![
            "a".into(),
            EntryDecl::group("B", vec!["b1".into(), "b2".into()]).into(),
            "c".into(),
        ];
        let tree = build(&sidebar).unwrap();

        assert_eq!(slugs(&tree), vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_flatten_breadcrumbs_are_ancestor_labels() {
        let sidebar: Vec<SidebarEntry> = vec![
            "top".into(),
            EntryDecl::group(
                "Outer",
                vec![EntryDecl::group("Inner", vec!["deep".into()]).into()],
            )
            .into(),
        ];
        let tree = build(&sidebar).unwrap();

        let pages: Vec<_> = tree
            .flatten()
            .map(|p| (p.page.slug.as_str(), p.breadcrumb))
            .collect();

        assert_eq!(
            pages,
            vec![("top", vec![]), ("deep", vec!["Outer", "Inner"])]
        );
    }

    #[test]
    fn test_flatten_skips_autogenerated_groups() {
        let sidebar: Vec<SidebarEntry> = vec![
            "a".into(),
            EntryDecl::autogenerate("Guides", "guides").into(),
            "b".into(),
        ];
        let tree = build(&sidebar).unwrap();

        assert_eq!(slugs(&tree), vec!["a", "b"]);
    }

    #[test]
    fn test_flatten_is_restartable() {
        let sidebar: Vec<SidebarEntry> = vec![
            EntryDecl::group("G", vec!["x".into(), "y".into()]).into(),
            "z".into(),
        ];
        let tree = build(&sidebar).unwrap();

        let first: Vec<_> = tree.flatten().collect();
        let second: Vec<_> = tree.flatten().collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_flatten_is_fused() {
        let tree = build(&[SidebarEntry::from("only")]).unwrap();
        let mut pages = tree.flatten();

        assert!(pages.next().is_some());
        assert!(pages.next().is_none());
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_flatten_handles_deep_nesting() {
        let mut entry: SidebarEntry = "leaf".into();
        for level in 0..500 {
            entry = EntryDecl::group(format!("Level {level}"), vec![entry]).into();
        }
        let tree = build(&[entry]).unwrap();

        let pages: Vec<_> = tree.flatten().collect();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].breadcrumb.len(), 500);
        assert_eq!(pages[0].breadcrumb[0], "Level 499");
    }
}
