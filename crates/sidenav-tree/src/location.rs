//! Diagnostic locations of sidebar entries.

use std::fmt;

/// Root name for entries declared in the site configuration.
pub const SIDEBAR_ROOT: &str = "sidebar";

/// Position of an entry in its declaration, e.g. `sidebar[2].items[1]`.
///
/// The root is `sidebar` for declared entries and the contributing plugin's
/// name for spliced entries (`blog[0]`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath {
    root: String,
    indices: Vec<usize>,
}

impl EntryPath {
    /// Location of a top-level entry.
    #[must_use]
    pub fn top(root: impl Into<String>, index: usize) -> Self {
        Self {
            root: root.into(),
            indices: vec![index],
        }
    }

    /// Location of the `index`-th child of this entry.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self {
            root: self.root.clone(),
            indices,
        }
    }

    /// Declaration root (`sidebar` or a plugin name).
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Nesting level, 1 for top-level entries.
    #[must_use]
    pub fn level(&self) -> usize {
        self.indices.len()
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for (depth, index) in self.indices.iter().enumerate() {
            if depth == 0 {
                write!(f, "[{index}]")?;
            } else {
                write!(f, ".items[{index}]")?;
            }
        }
        Ok(())
    }
}
