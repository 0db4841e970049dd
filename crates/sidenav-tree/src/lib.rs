//! Sidebar navigation tree builder for sidenav.
//!
//! This crate turns a declarative sidebar (pages, labeled groups and
//! autogenerated directory groups, nested arbitrarily) into a validated,
//! immutable [`NavTree`] for a rendering layer.
//!
//! - [`build`] / [`NavBuilder`]: parse → validate, reporting every error at once
//! - [`NavTree::flatten`]: pages in reading order with their breadcrumbs
//! - [`NavTree::index`]: slug → breadcrumb and position, previous/next links
//! - [`NavTree::validate_against`] / [`NavTree::expand`]: consult a
//!   [`ContentProvider`](sidenav_content::ContentProvider)
//!
//! # Quick Start
//!
//! ```
//! use sidenav_tree::{EntryDecl, SidebarEntry, build};
//!
//! let sidebar: Vec<SidebarEntry> = vec![
//!     "welcome".into(),
//!     EntryDecl::group("Offerings", vec!["training".into(), "mentoring".into()]).into(),
//!     EntryDecl::autogenerate("Guides", "guides").into(),
//! ];
//!
//! let tree = build(&sidebar).unwrap();
//! assert_eq!(tree.index().breadcrumb("training").unwrap(), ["Offerings"]);
//! assert_eq!(tree.neighbors("training").unwrap().next, Some("mentoring"));
//! ```

mod builder;
mod content;
mod decl;
mod error;
mod flatten;
mod index;
mod label;
mod location;
mod model;

pub use builder::{Contribution, InsertAt, NavBuilder, build};
pub use decl::{Autogenerate, EntryDecl, SidebarEntry};
pub use error::{BuildErrors, NavError};
pub use flatten::{FlatPage, Flatten};
pub use index::{NavIndex, Neighbors, PageInfo};
pub use label::derive_label;
pub use location::{EntryPath, SIDEBAR_ROOT};
pub use model::{AutoGroup, Group, NavEntry, NavTree, PageRef};
