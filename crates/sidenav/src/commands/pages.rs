//! `sidenav pages` command implementation.

use std::path::Path;

use clap::Args;
use sidenav_tree::FlatPage;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation cannot be built.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let tree = self.source.load_tree(config_path, &output)?;
        for page in tree.flatten() {
            output.print_with_note(&page.page.slug, &trail(&page));
        }
        Ok(())
    }
}

/// Breadcrumb trail ending at the page label, e.g. `Guides > Setup`.
fn trail(page: &FlatPage<'_>) -> String {
    let mut parts = page.breadcrumb.clone();
    parts.push(&page.page.label);
    parts.join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sidenav_tree::{EntryDecl, SidebarEntry, build};

    #[test]
    fn test_trail_includes_enclosing_groups() {
        let sidebar = vec![
            SidebarEntry::from("welcome"),
            EntryDecl::group(
                "Guides",
                vec![EntryDecl::page("guides/setup").with_label("Setup").into()],
            )
            .into(),
        ];
        let tree = build(&sidebar).unwrap();

        let trails: Vec<String> = tree.flatten().map(|page| trail(&page)).collect();

        assert_eq!(trails, vec!["Welcome", "Guides > Setup"]);
    }
}
