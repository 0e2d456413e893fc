//! Configuration management for `inline.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                           |
//! |------------|---------------------------------------------------|
//! | `[static]` | Static URL prefix, optional CDN base, search dirs |
//! | `[css]`    | Stylesheet rewriting toggles                      |
//!
//! # Example
//!
//! ```toml
//! [static]
//! url = "/static/"
//! base_url = "https://cdn.example.com/static/"
//! dirs = ["static", "vendor/static"]
//!
//! [css]
//! rewrite_urls = true
//! ```

mod error;
mod handle;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use handle::{cfg, init_config};

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "inline.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing inline.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Static file settings
    #[serde(rename = "static")]
    pub static_files: StaticConfig,

    /// Stylesheet settings
    pub css: CssConfig,
}

/// `[static]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// URL prefix static files are served under.
    /// Stripped from resolved `@import` targets to get a logical name.
    pub url: String,

    /// Base URL written into rewritten stylesheets. Defaults to `url`.
    pub base_url: Option<String>,

    /// Directories searched, in order, for a logical asset name.
    pub dirs: Vec<PathBuf>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            url: "/static/".into(),
            base_url: None,
            dirs: vec![PathBuf::from("static")],
        }
    }
}

/// `[css]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Rewrite `url()` and expand `@import` when inlining stylesheets.
    pub rewrite_urls: bool,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self { rewrite_urls: true }
    }
}

impl InlineConfig {
    /// Load configuration for the given config file name or path.
    ///
    /// Relative names are searched upward from the current directory. A
    /// missing file yields the defaults, rooted at the current directory.
    pub fn load(config: &Path) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;

        let mut loaded = match find_config_file(config, &cwd) {
            Some(path) => {
                let mut loaded = Self::from_path(&path)?;
                loaded.config_path = path;
                loaded
            }
            None => Self {
                config_path: cwd.join(config),
                ..Self::default()
            },
        };

        let root = loaded
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        loaded.set_root(&root);
        loaded.validate()?;

        Ok(loaded)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Set the root directory and resolve relative search dirs against it.
    pub fn set_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        for dir in &mut self.static_files.dirs {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
    }

    /// Base URL written into rewritten stylesheets.
    pub fn base_url(&self) -> &str {
        self.static_files
            .base_url
            .as_deref()
            .unwrap_or(&self.static_files.url)
    }

    /// Static URL prefix.
    pub fn static_url(&self) -> &str {
        &self.static_files.url
    }

    /// Validate the loaded configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.static_files.url.is_empty() {
            diag.error_with_hint(
                "static.url",
                "must not be empty",
                "use the prefix static files are served under, e.g. \"/static/\"",
            );
        }

        if self.static_files.dirs.is_empty() {
            diag.error("static.dirs", "at least one search directory is required");
        }

        for dir in &self.static_files.dirs {
            if !dir.is_dir() {
                diag.error_with_hint(
                    "static.dirs",
                    format!("directory not found: {}", dir.display()),
                    "paths are relative to the directory containing inline.toml",
                );
            }
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Find config file by searching upward from `start`.
///
/// Absolute paths are only checked for existence.
fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================
