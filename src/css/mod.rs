//! Stylesheet URL rewriting.

mod path;
mod transform;

pub use path::{dirname, normalize, split_base_url};
pub use transform::{CssUrlTransformer, transform_css_urls};
