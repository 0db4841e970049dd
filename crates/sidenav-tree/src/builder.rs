//! Declaration → validated [`NavTree`].
//!
//! The builder walks the declaration depth-first in declared order,
//! classifies each node, derives missing page labels, and checks slug
//! uniqueness. Every problem is collected; a tree is returned only when
//! there are none.
//!
//! # Plugin contributions
//!
//! Plugins (the blog integration, for instance) add their own top-level
//! entries through [`Contribution`]s. These are spliced into the declared
//! sidebar before validation, so their slugs take part in duplicate
//! detection and their locations are reported under the plugin's name.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use sidenav_content::normalize_slug;

use crate::decl::{Autogenerate, EntryDecl, SidebarEntry};
use crate::error::{BuildErrors, NavError};
use crate::label::derive_label;
use crate::location::{EntryPath, SIDEBAR_ROOT};
use crate::model::{AutoGroup, Group, NavEntry, NavTree, PageRef};

/// Where a contribution goes among the declared top-level entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InsertAt {
    /// Before every declared entry.
    Start,
    /// After every declared entry.
    #[default]
    End,
    /// Before the declared entry at this index (`len` means the end).
    Index(usize),
}

/// Top-level entries contributed by a plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    /// Plugin name, used as the location root in diagnostics.
    pub plugin: String,
    /// Insertion point.
    pub position: InsertAt,
    /// Entries to insert, in order.
    pub entries: Vec<SidebarEntry>,
}

impl Contribution {
    /// Create a contribution.
    #[must_use]
    pub fn new(plugin: impl Into<String>, position: InsertAt, entries: Vec<SidebarEntry>) -> Self {
        Self {
            plugin: plugin.into(),
            position,
            entries,
        }
    }
}

/// Build and validate a navigation tree from a sidebar declaration.
///
/// # Errors
///
/// Returns every [`NavError`] found; no tree is produced if there is any.
///
/// # Example
///
/// ```
/// use sidenav_tree::{EntryDecl, SidebarEntry, build};
///
/// let sidebar: Vec<SidebarEntry> = vec![
///     "welcome".into(),
///     EntryDecl::group("Course", vec!["course/worlds-best-intro-to-tdd".into()]).into(),
/// ];
/// let tree = build(&sidebar)?;
///
/// let labels: Vec<_> = tree.flatten().map(|p| p.page.label.as_str()).collect();
/// assert_eq!(labels, ["Welcome", "Worlds Best Intro To Tdd"]);
/// # Ok::<(), sidenav_tree::BuildErrors>(())
/// ```
pub fn build(sidebar: &[SidebarEntry]) -> Result<NavTree, BuildErrors> {
    NavBuilder::new(sidebar).build()
}

/// Navigation builder with plugin contributions.
#[derive(Clone, Debug)]
pub struct NavBuilder<'a> {
    sidebar: &'a [SidebarEntry],
    contributions: Vec<Contribution>,
}

impl<'a> NavBuilder<'a> {
    /// Start from the declared sidebar.
    #[must_use]
    pub fn new(sidebar: &'a [SidebarEntry]) -> Self {
        Self {
            sidebar,
            contributions: Vec::new(),
        }
    }

    /// Splice a plugin's entries into the sidebar.
    ///
    /// Contributions at the same position keep the order they were added in.
    #[must_use]
    pub fn contribute(mut self, contribution: Contribution) -> Self {
        self.contributions.push(contribution);
        self
    }

    /// Build and validate the navigation tree.
    ///
    /// # Errors
    ///
    /// Returns every [`NavError`] found, including out-of-range contribution
    /// positions.
    pub fn build(&self) -> Result<NavTree, BuildErrors> {
        let len = self.sidebar.len();
        let mut errors = Vec::new();

        // Contributions grouped by the declared index they precede.
        let mut inserts: Vec<Vec<&Contribution>> = vec![Vec::new(); len + 1];
        for contribution in &self.contributions {
            let at = match contribution.position {
                InsertAt::Start => 0,
                InsertAt::End => len,
                InsertAt::Index(position) if position <= len => position,
                InsertAt::Index(position) => {
                    errors.push(NavError::InvalidSplice {
                        plugin: contribution.plugin.clone(),
                        position,
                        len,
                    });
                    continue;
                }
            };
            inserts[at].push(contribution);
        }

        let mut top = Vec::with_capacity(len);
        for (at, contributions) in inserts.iter().enumerate() {
            for contribution in contributions {
                top.extend(
                    contribution
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| (entry, EntryPath::top(&contribution.plugin, i))),
                );
            }
            if let Some(entry) = self.sidebar.get(at) {
                top.push((entry, EntryPath::top(SIDEBAR_ROOT, at)));
            }
        }

        build_located(top, errors)
    }
}

/// Validate top-level entries that already carry their locations.
pub(crate) fn build_located<'d>(
    top: impl IntoIterator<Item = (&'d SidebarEntry, EntryPath)>,
    errors: Vec<NavError>,
) -> Result<NavTree, BuildErrors> {
    let mut walker = Walker {
        errors,
        seen: HashMap::new(),
    };
    let entries: Vec<_> = top
        .into_iter()
        .filter_map(|(entry, location)| walker.entry(entry, location))
        .collect();

    if let Some(errors) = BuildErrors::from_vec(walker.errors) {
        tracing::debug!(error_count = errors.len(), "Navigation tree rejected");
        return Err(errors);
    }

    let tree = NavTree::new(entries);
    tracing::debug!(
        entry_count = tree.entries().len(),
        page_count = tree.index().len(),
        depth = tree.depth(),
        "Navigation tree built"
    );
    Ok(tree)
}

/// Single validation pass state.
struct Walker {
    errors: Vec<NavError>,
    /// First location of every page slug.
    seen: HashMap<String, EntryPath>,
}

impl Walker {
    /// Classify and validate one node. `None` means an error was recorded.
    fn entry(&mut self, entry: &SidebarEntry, location: EntryPath) -> Option<NavEntry> {
        match entry {
            SidebarEntry::Slug(slug) => self.page(slug, None, location),
            SidebarEntry::Table(decl) => self.table(decl, location),
        }
    }

    fn table(&mut self, decl: &EntryDecl, location: EntryPath) -> Option<NavEntry> {
        match (&decl.items, &decl.autogenerate) {
            (Some(items), Some(_)) => {
                self.errors.push(NavError::malformed(
                    &location,
                    "entry has both `items` and `autogenerate`",
                ));
                // Still report problems inside the children.
                self.children(items, &location);
                None
            }
            (Some(items), None) => self.group(decl, items, location),
            (None, Some(autogenerate)) => self.auto_group(decl, autogenerate, location),
            (None, None) => match &decl.slug {
                Some(slug) if decl.collapsed.is_some() => {
                    self.errors.push(NavError::malformed(
                        &location,
                        format!("`collapsed` only applies to groups, found on page '{slug}'"),
                    ));
                    None
                }
                Some(slug) => self.page(slug, decl.label.as_deref(), location),
                None => {
                    self.errors.push(NavError::malformed(
                        &location,
                        "entry needs one of `slug`, `items` or `autogenerate`",
                    ));
                    None
                }
            },
        }
    }

    fn page(&mut self, slug: &str, label: Option<&str>, location: EntryPath) -> Option<NavEntry> {
        let slug = normalize_slug(slug);
        if slug.is_empty() {
            self.errors.push(NavError::malformed(&location, "page slug is empty"));
            return None;
        }
        let label = match label {
            Some(label) if label.trim().is_empty() => {
                self.errors.push(NavError::malformed(
                    &location,
                    format!("label of page '{slug}' is empty"),
                ));
                return None;
            }
            Some(label) => label.to_owned(),
            None => derive_label(slug),
        };

        match self.seen.entry(slug.to_owned()) {
            Entry::Occupied(first) => {
                self.errors.push(NavError::DuplicateSlug {
                    slug: slug.to_owned(),
                    first: first.get().clone(),
                    second: location,
                });
                None
            }
            Entry::Vacant(vacant) => {
                vacant.insert(location.clone());
                Some(NavEntry::Page(PageRef {
                    slug: slug.to_owned(),
                    label,
                    location,
                }))
            }
        }
    }

    fn group(
        &mut self,
        decl: &EntryDecl,
        items: &[SidebarEntry],
        location: EntryPath,
    ) -> Option<NavEntry> {
        let mut valid = self.forbid_slug(decl, &location, "group");
        let label = self.require_label(decl, &location, "group");
        let children = self.children(items, &location);

        if items.is_empty() {
            self.errors.push(NavError::EmptyGroup {
                label: label.clone(),
                location: location.clone(),
            });
            valid = false;
        }

        let label = label?;
        valid.then(|| {
            NavEntry::Group(Group {
                label,
                collapsed: decl.collapsed.unwrap_or(false),
                items: children,
                location,
            })
        })
    }

    fn auto_group(
        &mut self,
        decl: &EntryDecl,
        autogenerate: &Autogenerate,
        location: EntryPath,
    ) -> Option<NavEntry> {
        let mut valid = self.forbid_slug(decl, &location, "autogenerated group");
        let label = self.require_label(decl, &location, "autogenerated group");
        let directory = normalize_slug(&autogenerate.directory);
        if directory.is_empty() {
            self.errors.push(NavError::malformed(
                &location,
                "autogenerate directory is empty",
            ));
            valid = false;
        }

        let label = label?;
        valid.then(|| {
            NavEntry::AutoGroup(AutoGroup {
                label,
                directory: directory.to_owned(),
                collapsed: decl.collapsed.unwrap_or(false),
                location,
            })
        })
    }

    fn children(&mut self, items: &[SidebarEntry], parent: &EntryPath) -> Vec<NavEntry> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.entry(item, parent.child(i)))
            .collect()
    }

    fn forbid_slug(&mut self, decl: &EntryDecl, location: &EntryPath, kind: &str) -> bool {
        if let Some(slug) = &decl.slug {
            self.errors.push(NavError::malformed(
                location,
                format!("{kind} cannot have a `slug` (found '{slug}')"),
            ));
            return false;
        }
        true
    }

    fn require_label(
        &mut self,
        decl: &EntryDecl,
        location: &EntryPath,
        kind: &str,
    ) -> Option<String> {
        match decl.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => decl.label.clone(),
            Some(_) => {
                self.errors.push(NavError::malformed(
                    location,
                    format!("{kind} label is empty"),
                ));
                None
            }
            None => {
                self.errors.push(NavError::malformed(
                    location,
                    format!("{kind} requires a `label`"),
                ));
                None
            }
        }
    }
}
