//! `sidenav tree` command implementation.

use std::path::Path;

use clap::Args;
use sidenav_tree::NavTree;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation cannot be built or serialized.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let tree = self.source.load_tree(config_path, &output)?;
        output.print(&to_json(&tree, self.compact)?);
        Ok(())
    }
}

fn to_json(tree: &NavTree, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(tree)
    } else {
        serde_json::to_string_pretty(tree)
    }
}
