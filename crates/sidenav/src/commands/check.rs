//! `sidenav check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sidenav_config::{CliSettings, Config};
use sidenav_content::FsContent;
use sidenav_tree::NavTree;

use super::report;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Default)]
pub(crate) struct CheckArgs {
    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Navigation depth the theme can display (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Only validate the declaration, do not read content files.
    #[arg(long)]
    skip_content: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, content cannot be scanned,
    /// or the navigation has errors.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            max_depth: self.max_depth,
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let mut tree = config
            .build_navigation()
            .map_err(|errors| report(&output, &errors))?;

        if !self.skip_content {
            let content = FsContent::scan(&config.paths.content_dir)?;
            tree.validate_against(&content)
                .map_err(|errors| report(&output, &errors))?;
            // Generated pages can still clash with declared ones or leave a
            // group empty.
            tree = tree
                .expand(&content)
                .map_err(|errors| report(&output, &errors))?;
        }

        if let Some(limit) = config.max_depth {
            for warning in depth_warnings(&tree, limit) {
                output.warning(&warning);
            }
        }

        output.success(&format!(
            "Navigation OK: {} page(s), depth {}",
            tree.index().len(),
            tree.depth()
        ));
        Ok(())
    }
}

/// Warnings for entries the theme cannot display at `limit` levels.
fn depth_warnings(tree: &NavTree, limit: usize) -> Vec<String> {
    tree.entries_deeper_than(limit)
        .into_iter()
        .map(|location| {
            tracing::warn!(%location, limit, "Entry nested deeper than max_depth");
            format!("{location}: nested deeper than max_depth ({limit})")
        })
        .collect()
}
