//! Navigation validation errors.
//!
//! Validation never stops at the first problem: every error found in a pass
//! is collected into [`BuildErrors`] so a site author can fix them all at once.

use std::fmt;

use crate::location::EntryPath;

/// A single structural problem in a sidebar declaration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Two page references resolve to the same slug.
    #[error("{second}: duplicate slug '{slug}' (first declared at {first})")]
    DuplicateSlug {
        /// Normalized slug.
        slug: String,
        /// Earlier occurrence.
        first: EntryPath,
        /// Later occurrence.
        second: EntryPath,
    },
    /// A group has no children.
    #[error("{location}: {} has no items", group_name(.label.as_deref()))]
    EmptyGroup {
        /// Group label, `None` when the declaration has no usable label.
        label: Option<String>,
        /// Group location.
        location: EntryPath,
    },
    /// A node matches none of the page, group or autogenerated group shapes.
    #[error("{location}: malformed entry: {reason}")]
    MalformedEntry {
        /// Entry location.
        location: EntryPath,
        /// What is wrong with the shape.
        reason: String,
    },
    /// A page reference has no matching page in the content.
    #[error("{location}: slug '{slug}' does not match any page")]
    UnresolvedSlug {
        /// Normalized slug.
        slug: String,
        /// Page reference location.
        location: EntryPath,
    },
    /// An autogenerated group points at a directory the content does not have.
    #[error("{location}: autogenerate directory '{directory}' does not exist")]
    UnknownDirectory {
        /// Declared directory.
        directory: String,
        /// Group location.
        location: EntryPath,
    },
    /// The content provider failed while answering for an entry.
    #[error("{location}: content lookup failed: {message}")]
    Content {
        /// Entry location.
        location: EntryPath,
        /// Provider error message.
        message: String,
    },
    /// A plugin asked to be inserted past the end of the sidebar.
    #[error(
        "plugin '{plugin}': cannot insert at position {position}, sidebar has {len} top-level entries"
    )]
    InvalidSplice {
        /// Contributing plugin.
        plugin: String,
        /// Requested top-level position.
        position: usize,
        /// Number of declared top-level entries.
        len: usize,
    },
}

impl NavError {
    /// Location of the offending entry, if the error is tied to one.
    #[must_use]
    pub fn location(&self) -> Option<&EntryPath> {
        match self {
            Self::DuplicateSlug { second, .. } => Some(second),
            Self::EmptyGroup { location, .. }
            | Self::MalformedEntry { location, .. }
            | Self::UnresolvedSlug { location, .. }
            | Self::UnknownDirectory { location, .. }
            | Self::Content { location, .. } => Some(location),
            Self::InvalidSplice { .. } => None,
        }
    }

    pub(crate) fn malformed(location: &EntryPath, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            location: location.clone(),
            reason: reason.into(),
        }
    }
}

fn group_name(label: Option<&str>) -> String {
    label.map_or_else(|| "group".to_owned(), |label| format!("group '{label}'"))
}

/// Every error found while building or checking a navigation tree.
///
/// Never empty: a successful pass returns the tree instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildErrors(Vec<NavError>);

impl BuildErrors {
    /// Wrap a list of errors, or `None` if the list is empty.
    pub(crate) fn from_vec(errors: Vec<NavError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Errors in detection order.
    #[must_use]
    pub fn errors(&self) -> &[NavError] {
        &self.0
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, NavError> {
        self.0.iter()
    }

    /// Consume into the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<NavError> {
        self.0
    }
}

impl fmt::Display for BuildErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        write!(
            f,
            "{count} navigation error{}",
            if count == 1 { "" } else { "s" }
        )?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildErrors {}

impl IntoIterator for BuildErrors {
    type Item = NavError;
    type IntoIter = std::vec::IntoIter<NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BuildErrors {
    type Item = &'a NavError;
    type IntoIter = std::slice::Iter<'a, NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
