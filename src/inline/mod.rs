//! Static asset inlining.
//!
//! [`StaticInliner`] turns a logical asset name into the text that belongs
//! inside a `<style>` or `<script>` tag. Stylesheets are run through
//! [`CssUrlTransformer`], and every `@import` they contain is inlined by
//! calling back into the same inliner.
//!
//! # Example
//!
//! ```ignore
//! let inliner = StaticInliner::new(config);
//! let css = inliner.inline_style("css/app.css")?;
//! println!("{}", wrap_style(&css));
//! ```

mod error;
mod finder;

pub use error::InlineError;
pub use finder::{StaticFinder, logical_key};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::{InlineConfig, cfg};
use crate::css::CssUrlTransformer;
use crate::debug;

/// Inlines static assets found under the configured static dirs.
#[derive(Debug, Clone)]
pub struct StaticInliner {
    config: Arc<InlineConfig>,
    finder: StaticFinder,
}

impl StaticInliner {
    pub fn new(config: Arc<InlineConfig>) -> Self {
        let finder = StaticFinder::new(config.static_files.dirs.iter().cloned());
        Self { config, finder }
    }

    /// Create an inliner for the globally installed config.
    pub fn from_global() -> Self {
        Self::new(cfg())
    }

    #[inline]
    pub fn finder(&self) -> &StaticFinder {
        &self.finder
    }

    /// Inline a stylesheet by logical name, expanding `@import`s.
    pub fn inline_style(&self, name: &str) -> Result<String, InlineError> {
        let mut chain = Vec::new();
        self.inline_style_in(name, &mut chain)
    }

    /// Inline a script by logical name. Scripts are not transformed.
    pub fn inline_javascript(&self, name: &str) -> Result<String, InlineError> {
        let path = self.locate(name)?;
        read(&path)
    }

    /// Rewrite stylesheet text that was loaded by the caller.
    ///
    /// `name` is the logical name the stylesheet is addressed by; its
    /// `@import`s are resolved through the static dirs.
    pub fn rewrite_stylesheet(
        &self,
        name: &str,
        path: &Path,
        content: &str,
    ) -> Result<String, InlineError> {
        let mut chain = vec![logical_key(name).to_string()];
        self.rewrite_in(name, path, content, &mut chain)
    }

    fn inline_style_in(&self, name: &str, chain: &mut Vec<String>) -> Result<String, InlineError> {
        let key = logical_key(name);
        if chain.iter().any(|seen| seen == key) {
            chain.push(key.to_string());
            return Err(InlineError::ImportCycle {
                chain: std::mem::take(chain),
            });
        }

        let path = self.locate(name)?;
        let content = read(&path)?;
        if !self.config.css.rewrite_urls {
            return Ok(content);
        }

        chain.push(key.to_string());
        let inlined = self.rewrite_in(key, &path, &content, chain);
        chain.pop();
        inlined
    }

    fn rewrite_in(
        &self,
        name: &str,
        path: &Path,
        content: &str,
        chain: &mut Vec<String>,
    ) -> Result<String, InlineError> {
        CssUrlTransformer::new(name, path, content, self.config.base_url())
            .with_static_url(self.config.static_url())
            .transform(|import| self.inline_style_in(import, chain))
    }

    fn locate(&self, name: &str) -> Result<std::path::PathBuf, InlineError> {
        let path = self.finder.find(name).ok_or_else(|| InlineError::NotFound {
            name: name.to_string(),
        })?;
        debug!("inline"; "{} -> {}", name, path.display());
        Ok(path)
    }
}

fn read(path: &Path) -> Result<String, InlineError> {
    fs::read_to_string(path).map_err(|err| InlineError::Io(path.to_path_buf(), err))
}

/// Wrap stylesheet text in a `<style>` tag.
pub fn wrap_style(css: &str) -> String {
    format!("<style>{css}</style>")
}

/// Wrap script text in a `<script>` tag.
pub fn wrap_script(js: &str) -> String {
    format!("<script>{js}</script>")
}
