//! CLI error types.

use sidenav_config::ConfigError;
use sidenav_content::ContentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Navigation errors, already printed one per line.
    #[error("{0} navigation error(s)")]
    Navigation(usize),
}
