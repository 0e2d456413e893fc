//! Inline static stylesheets and scripts into HTML.
//!
//! Stylesheets moved into a page lose the directory their relative URLs were
//! written against. [`css::CssUrlTransformer`] rewrites `url()` references for
//! the new location and expands `@import` statements in place;
//! [`inline::StaticInliner`] finds assets on disk and drives the rewrite.

pub mod cli;
pub mod config;
pub mod css;
pub mod inline;
pub mod logger;

pub use css::{CssUrlTransformer, transform_css_urls};
pub use inline::{InlineError, StaticInliner};
