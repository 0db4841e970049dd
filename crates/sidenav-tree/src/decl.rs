//! Declarative sidebar input.
//!
//! [`SidebarEntry`] mirrors what a site author writes in a configuration
//! file. It is deliberately loose: every field is optional, and deciding
//! whether a node is a page, a group or an autogenerated group is the
//! builder's job, so that shape mistakes are reported with a location
//! instead of failing deserialization on the first bad node.
//!
//! ```toml
//! [[sidebar]]
//! slug = "welcome"
//!
//! [[sidebar]]
//! label = "Course"
//! items = ["course/intro", { slug = "course/advanced", label = "Going Further" }]
//!
//! [[sidebar]]
//! label = "Guides"
//! autogenerate = { directory = "guides" }
//! ```

use serde::{Deserialize, Serialize};

use crate::model::NavEntry;

/// One declared sidebar node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Bare string shorthand for a page reference.
    Slug(String),
    /// Table form; classified by the builder.
    Table(EntryDecl),
}

/// Table form of a sidebar node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDecl {
    /// Page slug (page references only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display label. Required for groups, optional for pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Inline children (groups only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SidebarEntry>>,
    /// Content directory whose pages become the children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autogenerate: Option<Autogenerate>,
    /// Initial expand state (groups only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// Autogenerate settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Autogenerate {
    /// Content directory, relative to the content root.
    pub directory: String,
}

impl EntryDecl {
    /// Page reference without a label.
    #[must_use]
    pub fn page(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Group with inline children.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<SidebarEntry>) -> Self {
        Self {
            label: Some(label.into()),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Group filled from a content directory.
    #[must_use]
    pub fn autogenerate(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            autogenerate: Some(Autogenerate {
                directory: directory.into(),
            }),
            ..Self::default()
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the collapsed flag.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

impl From<EntryDecl> for SidebarEntry {
    fn from(decl: EntryDecl) -> Self {
        Self::Table(decl)
    }
}

impl From<&str> for SidebarEntry {
    fn from(slug: &str) -> Self {
        Self::Slug(slug.to_owned())
    }
}

impl From<&NavEntry> for SidebarEntry {
    /// Declaration that rebuilds to an equal entry.
    fn from(entry: &NavEntry) -> Self {
        let decl = match entry {
            NavEntry::Page(page) => EntryDecl::page(&page.slug).with_label(&page.label),
            NavEntry::Group(group) => EntryDecl::group(
                &group.label,
                group.items.iter().map(SidebarEntry::from).collect(),
            )
            .with_collapsed(group.collapsed),
            NavEntry::AutoGroup(auto) => {
                EntryDecl::autogenerate(&auto.label, &auto.directory).with_collapsed(auto.collapsed)
            }
        };
        Self::Table(decl)
    }
}
