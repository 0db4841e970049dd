//! Cross-checking and expanding a tree against a [`ContentProvider`].

use sidenav_content::{ContentError, ContentPage, ContentProvider};

use crate::builder::build_located;
use crate::decl::{EntryDecl, SidebarEntry};
use crate::error::{BuildErrors, NavError};
use crate::label::titlecase_from_slug;
use crate::location::{EntryPath, SIDEBAR_ROOT};
use crate::model::{AutoGroup, NavEntry, NavTree};

impl NavTree {
    /// Check every declared page reference and autogenerate directory against
    /// the content.
    ///
    /// Entries spliced in by a plugin are skipped: the plugin serves those
    /// pages itself, so they never exist as content files.
    ///
    /// # Errors
    ///
    /// Returns every [`NavError::UnresolvedSlug`], [`NavError::UnknownDirectory`]
    /// and [`NavError::Content`] found.
    pub fn validate_against(&self, content: &dyn ContentProvider) -> Result<(), BuildErrors> {
        let mut errors = Vec::new();
        check_entries(self.entries(), content, &mut errors);
        BuildErrors::from_vec(errors).map_or(Ok(()), Err)
    }

    /// Replace every autogenerated group with the pages of its directory.
    ///
    /// Subdirectories become nested groups labeled after the directory name.
    /// The result goes through the same validation as [`build`](crate::build),
    /// so a generated page that duplicates a declared slug is reported, as is
    /// a directory with no visible pages (an empty group). `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns expansion errors ([`NavError::UnknownDirectory`],
    /// [`NavError::Content`]) together with validation errors of the expanded tree.
    pub fn expand(&self, content: &dyn ContentProvider) -> Result<NavTree, BuildErrors> {
        let mut errors = Vec::new();
        let decls: Vec<SidebarEntry> = self
            .entries()
            .iter()
            .map(|entry| expand_entry(entry, content, &mut errors))
            .collect();
        let locations = self.entries().iter().map(|entry| entry.location().clone());

        build_located(decls.iter().zip(locations), errors)
    }
}

fn check_entries(entries: &[NavEntry], content: &dyn ContentProvider, errors: &mut Vec<NavError>) {
    for entry in entries {
        if entry.location().root() != SIDEBAR_ROOT {
            continue;
        }
        match entry {
            NavEntry::Page(page) => {
                if !content.has_page(&page.slug) {
                    errors.push(NavError::UnresolvedSlug {
                        slug: page.slug.clone(),
                        location: page.location.clone(),
                    });
                }
            }
            NavEntry::Group(group) => check_entries(&group.items, content, errors),
            NavEntry::AutoGroup(auto) => {
                if let Err(err) = content.directory_pages(&auto.directory) {
                    errors.push(lookup_error(auto, err));
                }
            }
        }
    }
}

fn expand_entry(
    entry: &NavEntry,
    content: &dyn ContentProvider,
    errors: &mut Vec<NavError>,
) -> SidebarEntry {
    match entry {
        NavEntry::Page(_) => SidebarEntry::from(entry),
        NavEntry::Group(group) => EntryDecl::group(
            &group.label,
            group
                .items
                .iter()
                .map(|item| expand_entry(item, content, errors))
                .collect(),
        )
        .with_collapsed(group.collapsed)
        .into(),
        NavEntry::AutoGroup(auto) => match content.directory_pages(&auto.directory) {
            Ok(pages) => EntryDecl::group(&auto.label, generated_items(&auto.directory, &pages))
                .with_collapsed(auto.collapsed)
                .into(),
            Err(err) => {
                errors.push(lookup_error(auto, err));
                SidebarEntry::from(entry)
            }
        },
    }
}

fn lookup_error(auto: &AutoGroup, err: ContentError) -> NavError {
    let location: EntryPath = auto.location.clone();
    match err {
        ContentError::UnknownDirectory(_) => NavError::UnknownDirectory {
            directory: auto.directory.clone(),
            location,
        },
        other => NavError::Content {
            location,
            message: other.to_string(),
        },
    }
}

/// Intermediate directory tree of generated pages.
enum Generated<'p> {
    Page(&'p ContentPage),
    Dir {
        name: &'p str,
        children: Vec<Generated<'p>>,
    },
}

/// Declarations for the pages of `directory`, nested by subdirectory.
///
/// Pages and subdirectories keep the provider's listing order (a
/// subdirectory sits where its first page appears).
fn generated_items(directory: &str, pages: &[ContentPage]) -> Vec<SidebarEntry> {
    let mut nodes = Vec::new();
    for page in pages {
        let relative = page
            .slug
            .strip_prefix(directory)
            .unwrap_or(&page.slug)
            .trim_start_matches('/');
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        insert(&mut nodes, &segments, page);
    }
    nodes.into_iter().map(to_decl).collect()
}

fn insert<'p>(nodes: &mut Vec<Generated<'p>>, segments: &[&'p str], page: &'p ContentPage) {
    let [dir, rest @ ..] = segments else {
        nodes.push(Generated::Page(page));
        return;
    };
    if rest.is_empty() {
        nodes.push(Generated::Page(page));
        return;
    }

    let existing = nodes
        .iter()
        .position(|node| matches!(node, Generated::Dir { name, .. } if name == dir));
    if let Some(i) = existing {
        if let Generated::Dir { children, .. } = &mut nodes[i] {
            insert(children, rest, page);
        }
    } else {
        let mut children = Vec::new();
        insert(&mut children, rest, page);
        nodes.push(Generated::Dir {
            name: *dir,
            children,
        });
    }
}

fn to_decl(node: Generated<'_>) -> SidebarEntry {
    match node {
        Generated::Page(page) => {
            let decl = EntryDecl::page(&page.slug);
            let decl = match &page.title {
                Some(title) => decl.with_label(title),
                None => decl,
            };
            decl.into()
        }
        Generated::Dir { name, children } => EntryDecl::group(
            titlecase_from_slug(name),
            children.into_iter().map(to_decl).collect(),
        )
        .into(),
    }
}
