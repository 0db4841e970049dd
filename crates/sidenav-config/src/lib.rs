//! Site configuration for sidenav.
//!
//! Parses `sidenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! title = "jbrains"
//! custom_css = ["./src/styles/custom.css"]
//! content_dir = "src/content/docs"
//! max_depth = 3
//!
//! [logo]
//! src = "./src/assets/logo.png"
//!
//! [social]
//! github = "https://github.com/jbrains"
//!
//! [blog]
//! label = "Blog"
//! position = "end"
//!
//! [[sidebar]]
//! slug = "welcome"
//!
//! [[sidebar]]
//! label = "Guides"
//! autogenerate = { directory = "guides" }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `title` and every `social` link support `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sidenav_tree::{
    BuildErrors, Contribution, EntryDecl, InsertAt, NavBuilder, NavTree, SidebarEntry,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override navigation display depth limit.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sidenav.toml";

/// Default content directory, relative to the config file.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site title shown in the header.
    pub title: String,
    /// Site logo.
    pub logo: Option<LogoConfig>,
    /// Favicon URL path.
    pub favicon: Option<String>,
    /// Social links keyed by platform name.
    pub social: BTreeMap<String, String>,
    /// Custom stylesheets (paths are relative strings from TOML).
    custom_css: Vec<String>,
    /// Content directory (relative string from TOML).
    content_dir: Option<String>,
    /// Navigation depth the theme can display. Deeper entries are reported, never cut.
    pub max_depth: Option<usize>,
    /// Blog plugin settings (plugin enabled when the section is present).
    pub blog: Option<BlogConfig>,
    /// Declared sidebar.
    pub sidebar: Vec<SidebarEntry>,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: ResolvedPaths,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Logo configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoConfig {
    /// Image path relative to the config file.
    pub src: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: Option<String>,
}

/// Paths resolved against the config file directory.
#[derive(Debug, Default)]
pub struct ResolvedPaths {
    /// Content root handed to the content provider.
    pub content_dir: PathBuf,
    /// Custom stylesheets.
    pub custom_css: Vec<PathBuf>,
    /// Logo image.
    pub logo: Option<PathBuf>,
}

/// Blog plugin configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Whether the blog contributes to the sidebar.
    pub enabled: bool,
    /// Label of the contributed sidebar group.
    pub label: String,
    /// Slug of the blog index page.
    pub prefix: String,
    /// Where the group goes among the declared top-level entries.
    pub position: BlogPosition,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            label: "Blog".to_owned(),
            prefix: "blog".to_owned(),
            position: BlogPosition::default(),
        }
    }
}

/// Plugin name used for blog entries in diagnostics.
const BLOG_PLUGIN: &str = "blog";

impl BlogConfig {
    /// Sidebar entries contributed by the blog, if enabled.
    #[must_use]
    pub fn contribution(&self) -> Option<Contribution> {
        if !self.enabled {
            return None;
        }
        let group = EntryDecl::group(
            &self.label,
            vec![EntryDecl::page(&self.prefix).with_label("All posts").into()],
        );
        Some(Contribution::new(
            BLOG_PLUGIN,
            self.position.into(),
            vec![group.into()],
        ))
    }
}

/// Blog group position: `"start"`, `"end"` or a top-level index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BlogPosition {
    /// Before the declared entry at this index.
    Index(usize),
    /// Named position.
    Named(NamedPosition),
}

impl Default for BlogPosition {
    fn default() -> Self {
        Self::Named(NamedPosition::End)
    }
}

/// Named insertion point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedPosition {
    /// Before all declared entries.
    Start,
    /// After all declared entries.
    End,
}

impl From<BlogPosition> for InsertAt {
    fn from(position: BlogPosition) -> Self {
        match position {
            BlogPosition::Index(index) => Self::Index(index),
            BlogPosition::Named(NamedPosition::Start) => Self::Start,
            BlogPosition::Named(NamedPosition::End) => Self::End,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`social.github`").
        field: String,
        /// Error message (e.g., "${`GITHUB_USER`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sidenav.toml` in current directory and parents,
    /// falling back to defaults (empty sidebar) when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build the navigation tree: declared sidebar plus plugin contributions.
    ///
    /// # Errors
    ///
    /// Returns every navigation error found.
    pub fn build_navigation(&self) -> Result<NavTree, BuildErrors> {
        let mut builder = NavBuilder::new(&self.sidebar);
        if let Some(contribution) = self.blog.as_ref().and_then(BlogConfig::contribution) {
            builder = builder.contribute(contribution);
        }
        builder.build()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.paths.content_dir.clone_from(content_dir);
        }
        if let Some(max_depth) = settings.max_depth {
            self.max_depth = Some(max_depth);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: String::new(),
            logo: None,
            favicon: None,
            social: BTreeMap::new(),
            custom_css: Vec::new(),
            content_dir: None,
            max_depth: None,
            blog: None,
            sidebar: Vec::new(),
            paths: ResolvedPaths {
                content_dir: base.join(DEFAULT_CONTENT_DIR),
                custom_css: Vec::new(),
                logo: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks field values only; the sidebar is validated by
    /// [`build_navigation`](Self::build_navigation), which reports every
    /// problem at once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_branding()?;
        self.validate_social()?;
        self.validate_navigation()?;
        Ok(())
    }

    fn validate_branding(&self) -> Result<(), ConfigError> {
        if let Some(logo) = &self.logo {
            require_non_empty(&logo.src, "logo.src")?;
        }
        if let Some(favicon) = &self.favicon {
            require_non_empty(favicon, "favicon")?;
        }
        for (i, css) in self.custom_css.iter().enumerate() {
            require_non_empty(css, &format!("custom_css[{i}]"))?;
        }
        Ok(())
    }

    fn validate_social(&self) -> Result<(), ConfigError> {
        for (name, url) in &self.social {
            let field = format!("social.{name}");
            require_non_empty(url, &field)?;
            require_http_url(url, &field)?;
        }
        Ok(())
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "max_depth must be greater than 0".to_owned(),
            ));
        }
        if let Some(blog) = &self.blog {
            require_non_empty(&blog.label, "blog.label")?;
            require_non_empty(&blog.prefix, "blog.prefix")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.title, "title")?;
        for (name, url) in &mut self.social {
            expand::expand_in_place(url, &format!("social.{name}"))?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths = ResolvedPaths {
            content_dir: config_dir.join(
                self.content_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_DIR),
            ),
            custom_css: self.custom_css.iter().map(|css| config_dir.join(css)).collect(),
            logo: self.logo.as_ref().map(|logo| config_dir.join(&logo.src)),
        };
    }
}
