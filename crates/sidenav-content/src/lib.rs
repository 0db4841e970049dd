//! Content provider abstraction for sidenav.
//!
//! The navigation builder never reads content itself. It asks a
//! [`ContentProvider`] two questions:
//!
//! - does a page exist for a slug (cross-checking declared page references)
//! - which pages live under a directory (expanding autogenerated groups)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentProvider`] trait with `has_page()` and `directory_pages()` methods
//! - [`FsContent`] implementation backed by a content directory of markdown files
//! - [`MockContent`] for testing (behind `mock` feature flag)
//!
//! # Slug Convention
//!
//! Slugs are content-relative paths without extension and without leading or
//! trailing slashes:
//! - `"welcome"` - `welcome.md`
//! - `"guides"` - `guides/index.md`
//! - `"course/worlds-best-intro-to-tdd"` - nested page
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sidenav_content::{ContentProvider, FsContent};
//!
//! let content = FsContent::scan("src/content/docs")?;
//! assert!(content.has_page("welcome"));
//! for page in content.directory_pages("guides")? {
//!     println!("{}", page.slug);
//! }
//! # Ok(())
//! # }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod provider;

pub use fs::FsContent;
#[cfg(feature = "mock")]
pub use mock::MockContent;
pub use provider::{ContentError, ContentPage, ContentProvider, normalize_slug};
