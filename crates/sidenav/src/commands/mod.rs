//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod pages;
pub(crate) mod tree;

pub(crate) use check::CheckArgs;
pub(crate) use pages::PagesArgs;
pub(crate) use tree::TreeArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use sidenav_config::{CliSettings, Config};
use sidenav_content::FsContent;
use sidenav_tree::{BuildErrors, NavTree};

use crate::error::CliError;
use crate::output::Output;

/// Options shared by commands that print the tree.
#[derive(Args, Default)]
pub(crate) struct SourceArgs {
    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Replace autogenerated groups with the pages of their directories.
    #[arg(short, long)]
    expand: bool,
}

impl SourceArgs {
    /// Load config, build the navigation and optionally expand it.
    pub(crate) fn load_tree(
        self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<NavTree, CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            max_depth: None,
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let tree = config
            .build_navigation()
            .map_err(|errors| report(output, &errors))?;

        if !self.expand {
            return Ok(tree);
        }
        let content = FsContent::scan(&config.paths.content_dir)?;
        tree.expand(&content).map_err(|errors| report(output, &errors))
    }
}

/// Print every navigation error and collapse them into a [`CliError`].
pub(crate) fn report(output: &Output, errors: &BuildErrors) -> CliError {
    for error in errors {
        output.error(&error.to_string());
    }
    CliError::Navigation(errors.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
content_dir = "docs"

[[sidebar]]
slug = "welcome"

[[sidebar]]
label = "Guides"
autogenerate = { directory = "guides" }
"#;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sidenav.toml"), CONFIG).unwrap();
        std::fs::create_dir_all(dir.path().join("docs/guides")).unwrap();
        std::fs::write(dir.path().join("docs/welcome.md"), "# Welcome\n").unwrap();
        std::fs::write(dir.path().join("docs/guides/setup.md"), "# Setup\n").unwrap();
        dir
    }

    #[test]
    fn test_load_tree_keeps_autogenerated_groups() {
        let dir = project();
        let args = SourceArgs::default();

        let tree = args
            .load_tree(Some(&dir.path().join("sidenav.toml")), &Output::new())
            .unwrap();

        assert_eq!(tree.index().slugs(), ["welcome"]);
    }

    #[test]
    fn test_load_tree_expands_from_content_dir() {
        let dir = project();
        let args = SourceArgs {
            expand: true,
            ..SourceArgs::default()
        };

        let tree = args
            .load_tree(Some(&dir.path().join("sidenav.toml")), &Output::new())
            .unwrap();

        assert_eq!(tree.index().slugs(), ["welcome", "guides/setup"]);
    }

    #[test]
    fn test_load_tree_content_dir_override() {
        let dir = project();
        let args = SourceArgs {
            content_dir: Some(dir.path().join("missing")),
            expand: true,
        };

        let err = args
            .load_tree(Some(&dir.path().join("sidenav.toml")), &Output::new())
            .unwrap_err();

        assert!(matches!(err, CliError::Content(_)));
    }

    #[test]
    fn test_load_tree_reports_navigation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidenav.toml");
        std::fs::write(&path, "sidebar = [\"a\", \"a\", { label = \"Empty\", items = [] }]\n")
            .unwrap();

        let err = SourceArgs::default()
            .load_tree(Some(&path), &Output::new())
            .unwrap_err();

        assert_eq!(err.to_string(), "2 navigation error(s)");
    }
}
