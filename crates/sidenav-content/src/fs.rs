//! Filesystem content provider.
//!
//! Walks a content directory once and records every markdown page it finds.
//! Titles and sidebar hints come from the YAML frontmatter block at the top of
//! each file:
//!
//! ```text
//! ---
//! title: Setup Guide
//! sidebar:
//!   order: 2
//!   label: Setup
//!   hidden: false
//! ---
//! ```

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::provider::{
    ContentError, ContentPage, ContentProvider, is_within, normalize_slug, sort_listing,
};

/// First H1 heading, used when frontmatter has no title.
static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("H1 regex is valid"));

/// Markdown extensions recognized as pages.
const PAGE_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Frontmatter {
    title: Option<String>,
    sidebar: SidebarFrontmatter,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SidebarFrontmatter {
    order: Option<i64>,
    label: Option<String>,
    hidden: bool,
}

#[derive(Debug)]
struct ScannedPage {
    page: ContentPage,
    hidden: bool,
    path: PathBuf,
}

/// Filesystem content provider.
///
/// Slugs are relative paths without extension, lowercased. `index.md` maps to
/// its directory (`guides/index.md` is `"guides"`). Hidden files and
/// directories (leading `.`) are skipped.
///
/// The scan happens once in [`FsContent::scan`]; later queries never touch
/// the filesystem.
#[derive(Debug)]
pub struct FsContent {
    root: PathBuf,
    pages: BTreeMap<String, ScannedPage>,
    directories: BTreeSet<String>,
}

impl FsContent {
    /// Scan a content directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] if `root` is not a directory,
    /// [`ContentError::Io`] if a file cannot be read, and
    /// [`ContentError::Frontmatter`] if a frontmatter block is not valid YAML, and
    /// [`ContentError::DuplicatePage`] if two files resolve to the same slug
    /// (`guides.md` and `guides/index.md`, `setup.md` and `setup.mdx`, or
    /// names differing only in case).
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ContentError::NotFound(root));
        }

        let mut content = Self {
            root,
            pages: BTreeMap::new(),
            directories: BTreeSet::new(),
        };
        let root = content.root.clone();
        content.scan_directory(&root, "")?;

        tracing::info!(
            root = %content.root.display(),
            page_count = content.pages.len(),
            directory_count = content.directories.len(),
            "Content scan completed"
        );

        Ok(content)
    }

    /// Root directory that was scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of pages found, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the scan found no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn scan_directory(&mut self, dir: &Path, prefix: &str) -> Result<(), ContentError> {
        if !prefix.is_empty() {
            self.directories.insert(prefix.to_owned());
        }

        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let entry = entry.map_err(io_err(dir))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().map_err(io_err(&path))?.is_dir() {
                let child_prefix = join_slug(prefix, &name.to_lowercase());
                self.scan_directory(&path, &child_prefix)?;
                continue;
            }

            let Some(stem) = page_stem(&name) else {
                continue;
            };
            let slug = if stem.eq_ignore_ascii_case("index") {
                prefix.to_owned()
            } else {
                join_slug(prefix, &stem.to_lowercase())
            };

            let text = fs::read_to_string(&path).map_err(io_err(&path))?;
            let (frontmatter, body) = parse_frontmatter(&text, &path)?;
            let title = frontmatter
                .sidebar
                .label
                .or(frontmatter.title)
                .or_else(|| extract_h1(body));

            let scanned = ScannedPage {
                page: ContentPage {
                    slug: slug.clone(),
                    title,
                    order: frontmatter.sidebar.order,
                },
                hidden: frontmatter.sidebar.hidden,
                path,
            };
            match self.pages.entry(slug) {
                Entry::Vacant(vacant) => {
                    vacant.insert(scanned);
                }
                Entry::Occupied(occupied) => {
                    let earlier = occupied.get().path.clone();
                    // Directory listing order is unspecified; report in path order.
                    let (first, second) = if earlier <= scanned.path {
                        (earlier, scanned.path)
                    } else {
                        (scanned.path, earlier)
                    };
                    return Err(ContentError::DuplicatePage {
                        slug: occupied.key().clone(),
                        first,
                        second,
                    });
                }
            }
        }

        Ok(())
    }
}

impl ContentProvider for FsContent {
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
            .filter(|scanned| !scanned.hidden && is_within(&scanned.page.slug, directory))
            .map(|scanned| scanned.page.clone())
            .collect();
        sort_listing(&mut pages);
        Ok(pages)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ContentError + use<> {
    let path = path.to_path_buf();
    move |source| ContentError::Io { path, source }
}

fn join_slug(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// File name without a markdown extension, or `None` for other files.
fn page_stem(name: &str) -> Option<&str> {
    PAGE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
}

/// Split a leading `---` fenced YAML block from the markdown body.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_frontmatter<'a>(
    text: &'a str,
    path: &Path,
) -> Result<(Frontmatter, &'a str), ContentError> {
    let Some((yaml, body)) = split_frontmatter(text) else {
        return Ok((Frontmatter::default(), text));
    };
    if yaml.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }
    let frontmatter = serde_yaml::from_str(yaml).map_err(|source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((frontmatter, body))
}

fn extract_h1(body: &str) -> Option<String> {
    let caps = H1_REGEX.captures(body)?;
    Some(caps[1].trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(FsContent: Send, Sync);

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn slugs(pages: &[ContentPage]) -> Vec<&str> {
        pages.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let err = FsContent::scan("/nonexistent/content").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_scan_index_and_sibling_file_collide() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "guides.md", "# From guides.md\n");
        write(temp_dir.path(), "guides/index.md", "# From index\n");

        let err = FsContent::scan(temp_dir.path()).unwrap_err();

        let ContentError::DuplicatePage {
            slug,
            first,
            second,
        } = &err
        else {
            panic!("expected DuplicatePage, got {err:?}");
        };
        assert_eq!(slug, "guides");
        assert_eq!(*first, temp_dir.path().join("guides/index.md"));
        assert_eq!(*second, temp_dir.path().join("guides.md"));
    }

    #[test]
    fn test_scan_md_and_mdx_with_same_stem_collide() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "setup.md", "# Setup\n");
        write(temp_dir.path(), "setup.mdx", "# Setup (MDX)\n");

        let err = FsContent::scan(temp_dir.path()).unwrap_err();

        assert!(matches!(
            &err,
            ContentError::DuplicatePage { slug, .. } if slug == "setup"
        ));
        assert!(err.to_string().contains("setup.md and"));
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = create_test_dir();

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert!(content.is_empty());
        assert!(!content.has_page("welcome"));
    }

    #[test]
    fn test_scan_flat_and_nested_pages() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "welcome.md", "# Welcome\n");
        write(temp_dir.path(), "contact.mdx", "Say hi.");
        write(temp_dir.path(), "course/worlds-best-intro-to-tdd.md", "");
        write(temp_dir.path(), "notes.txt", "not a page");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert_eq!(content.len(), 3);
        assert!(content.has_page("welcome"));
        assert!(content.has_page("contact"));
        assert!(content.has_page("course/worlds-best-intro-to-tdd"));
        assert!(!content.has_page("notes"));
    }

    #[test]
    fn test_has_page_normalizes_slashes() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "training.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert!(content.has_page("/training/"));
    }

    #[test]
    fn test_index_maps_to_directory_slug() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "index.md", "# Home\n");
        write(temp_dir.path(), "guides/index.md", "# Guides\n");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert!(content.has_page(""));
        assert!(content.has_page("guides"));
        assert!(!content.has_page("guides/index"));
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), ".draft.md", "");
        write(temp_dir.path(), ".git/HEAD.md", "");
        write(temp_dir.path(), "visible.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert_eq!(content.len(), 1);
        assert!(content.has_page("visible"));
    }

    #[test]
    fn test_slugs_are_lowercased() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "Guides/Setup-Guide.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert!(content.has_page("guides/setup-guide"));
    }

    #[test]
    fn test_title_precedence() {
        let temp_dir = create_test_dir();
        write(
            temp_dir.path(),
            "g/label.md",
            "---\ntitle: Frontmatter\nsidebar:\n  label: Sidebar\n---\n# Heading\n",
        );
        write(
            temp_dir.path(),
            "g/title.md",
            "---\ntitle: Frontmatter\n---\n# Heading\n",
        );
        write(temp_dir.path(), "g/heading.md", "Intro\n\n# Heading\n");
        write(temp_dir.path(), "g/none.md", "No heading here.");

        let content = FsContent::scan(temp_dir.path()).unwrap();
        let pages = content.directory_pages("g").unwrap();
        let titles: Vec<_> = pages
            .iter()
            .map(|p| (p.slug.as_str(), p.title.as_deref()))
            .collect();

        assert_eq!(
            titles,
            vec![
                ("g/heading", Some("Heading")),
                ("g/label", Some("Sidebar")),
                ("g/none", None),
                ("g/title", Some("Frontmatter")),
            ]
        );
    }

    #[test]
    fn test_directory_pages_sorted_by_order_then_slug() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "guides/zeta.md", "---\nsidebar:\n  order: 1\n---\n");
        write(temp_dir.path(), "guides/alpha.md", "");
        write(temp_dir.path(), "guides/beta.md", "---\nsidebar:\n  order: 0\n---\n");
        write(temp_dir.path(), "guides/deep/page.md", "");
        write(temp_dir.path(), "other.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();
        let pages = content.directory_pages("guides").unwrap();

        assert_eq!(
            slugs(&pages),
            vec!["guides/beta", "guides/zeta", "guides/alpha", "guides/deep/page"]
        );
    }

    #[test]
    fn test_directory_pages_excludes_hidden_but_page_still_exists() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "guides/secret.md", "---\nsidebar:\n  hidden: true\n---\n");
        write(temp_dir.path(), "guides/public.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert_eq!(
            slugs(&content.directory_pages("guides").unwrap()),
            vec!["guides/public"]
        );
        assert!(content.has_page("guides/secret"));
    }

    #[test]
    fn test_directory_pages_unknown_directory() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "welcome.md", "");

        let content = FsContent::scan(temp_dir.path()).unwrap();
        let err = content.directory_pages("guides").unwrap_err();

        assert!(matches!(err, ContentError::UnknownDirectory(dir) if dir == "guides"));
    }

    #[test]
    fn test_directory_pages_empty_directory() {
        let temp_dir = create_test_dir();
        fs::create_dir_all(temp_dir.path().join("guides")).unwrap();

        let content = FsContent::scan(temp_dir.path()).unwrap();

        assert!(content.directory_pages("/guides/").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_frontmatter_is_error() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "bad.md", "---\ntitle: [unclosed\n---\n");

        let err = FsContent::scan(temp_dir.path()).unwrap_err();

        assert!(matches!(err, ContentError::Frontmatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_split_frontmatter() {
        assert_eq!(
            split_frontmatter("---\ntitle: A\n---\nBody"),
            Some(("title: A\n", "Body"))
        );
        assert_eq!(split_frontmatter("---\r\ntitle: A\r\n---\r\n"), Some(("title: A\r\n", "")));
        assert_eq!(split_frontmatter("# No frontmatter"), None);
        assert_eq!(split_frontmatter("---\nunterminated"), None);
    }

    #[test]
    fn test_page_stem() {
        assert_eq!(page_stem("guide.md"), Some("guide"));
        assert_eq!(page_stem("guide.mdx"), Some("guide"));
        assert_eq!(page_stem("guide.txt"), None);
        assert_eq!(page_stem(".md"), None);
    }
}
