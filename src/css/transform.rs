//! Relative URL rewriting for stylesheets that move to a new base path.
//!
//! Two passes run over the stylesheet text:
//!
//! 1. `@import "x.css";` statements are replaced by the inlined text of the
//!    imported stylesheet, supplied by a caller-provided callback.
//! 2. `url(...)` references are resolved against the stylesheet's directory
//!    under the static base URL.
//!
//! | Reference            | Result                                  |
//! |----------------------|-----------------------------------------|
//! | `#frag`, `data:...`  | Preserved as-is                         |
//! | `https://...`, `/x`  | Preserved as-is                         |
//! | `img/a.png`          | `{base}/{dir of name}/img/a.png`        |

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::path::{dirname, normalize, split_base_url};
use crate::debug;

/// `url( <quote?> <url> <quote?> )` with an optional matching quote.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*(?:"(?P<dq>.*?)"|'(?P<sq>.*?)'|(?P<bare>.*?))\s*\)"#).unwrap()
});

/// `@import <quote> <url> <quote> ;` with a required matching quote.
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s*(?:"(?P<dq>.*?)"|'(?P<sq>.*?)')\s*;"#).unwrap()
});

/// URLs that cannot be relocated (fragments and inline data).
const SPECIAL_PREFIXES: [&str; 2] = ["#", "data:"];

/// URLs that are already absolute (external or site-root-relative).
const ABSOLUTE_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Rewrites the URLs of one stylesheet.
///
/// Addressing state is derived once in [`CssUrlTransformer::new`], so every
/// URL in the same document resolves against the same directory.
#[derive(Debug, Clone)]
pub struct CssUrlTransformer<'a> {
    /// Logical asset name (e.g. `css/app.css`)
    name: &'a str,
    /// On-disk location of the asset
    path: &'a Path,
    /// Raw stylesheet text
    content: &'a str,
    /// Static URL prefix, stripped from resolved imports before `base_url`
    static_url: Option<&'a str>,
    /// Base URL the stylesheet is served under
    base_url: &'a str,
    /// `scheme://host` of an absolute base URL
    scheme_host: Option<String>,
    /// Resolution root for relative URLs
    directory_url: String,
}

impl<'a> CssUrlTransformer<'a> {
    /// Create a transformer for `content`, served under `base_url`.
    ///
    /// Resolved `@import` targets have `base_url` stripped to recover a
    /// logical name; see [`with_static_url`](Self::with_static_url).
    pub fn new(name: &'a str, path: &'a Path, content: &'a str, base_url: &'a str) -> Self {
        let (scheme_host, base_path) = split_base_url(base_url);
        let directory_url = format!("{base_path}/{}", dirname(name));

        Self {
            name,
            path,
            content,
            static_url: None,
            base_url,
            scheme_host,
            directory_url,
        }
    }

    /// Strip `static_url` from resolved `@import` targets, trying it
    /// before `base_url`.
    pub fn with_static_url(mut self, static_url: &'a str) -> Self {
        self.static_url = Some(static_url);
        self
    }

    /// Run the import pass, then the url pass.
    ///
    /// `inline` receives the logical name of each imported stylesheet and
    /// returns its fully inlined text. Its first error aborts the transform
    /// and is returned unchanged.
    pub fn transform<F, E>(&self, mut inline: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        debug!(
            "css";
            "rewriting {} ({}) against {}",
            self.name,
            self.path.display(),
            self.directory_url
        );

        let expanded = try_replace_all(&IMPORT_PATTERN, self.content, |caps| {
            let (_, url) = quoted(caps);
            let resolved = self.resolve_url(url);
            let logical = self.logical_name(&resolved);
            debug!("css"; "{}: inlining @import {} as {}", self.name, url, logical);
            inline(logical)
        })?;

        let rewritten = URL_PATTERN.replace_all(&expanded, |caps: &Captures<'_>| {
            let (quote, url) = quoted(caps);
            format!("url({quote}{}{quote})", self.resolve_url(url))
        });

        Ok(rewritten.into_owned())
    }

    /// Resolve a URL found in this stylesheet to its deploy-correct form.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.is_empty()
            || SPECIAL_PREFIXES.iter().any(|p| url.starts_with(p))
            || ABSOLUTE_PREFIXES.iter().any(|p| url.starts_with(p))
        {
            return url.to_string();
        }

        let resolved = normalize(&format!("{}/{url}", self.directory_url));
        match &self.scheme_host {
            Some(scheme_host) => format!("{scheme_host}/{}", resolved.trim_start_matches('/')),
            None => resolved,
        }
    }

    /// Strip the static prefix, else the base URL, from a resolved import.
    fn logical_name<'u>(&self, resolved: &'u str) -> &'u str {
        self.static_url
            .into_iter()
            .chain([self.base_url])
            .find_map(|prefix| strip_url_prefix(resolved, prefix))
            .unwrap_or(resolved)
    }
}

/// Strip `prefix` only where it ends on a path segment boundary.
fn strip_url_prefix<'u>(url: &'u str, prefix: &str) -> Option<&'u str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = url.strip_prefix(prefix)?;
    (prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

/// Rewrite `content` in one call. See [`CssUrlTransformer::transform`].
pub fn transform_css_urls<F, E>(
    name: &str,
    path: &Path,
    content: &str,
    base_url: &str,
    inline: F,
) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    CssUrlTransformer::new(name, path, content, base_url).transform(inline)
}

/// Quote character (possibly empty) and inner URL of a match.
fn quoted<'h>(caps: &Captures<'h>) -> (&'static str, &'h str) {
    if let Some(m) = caps.name("dq") {
        ("\"", m.as_str())
    } else if let Some(m) = caps.name("sq") {
        ("'", m.as_str())
    } else {
        ("", caps.name("bare").map_or("", |m| m.as_str()))
    }
}

/// `Regex::replace_all` with a fallible replacement.
fn try_replace_all<E>(
    re: &Regex,
    haystack: &str,
    mut replace: impl FnMut(&Captures<'_>) -> Result<String, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;

    for caps in re.captures_iter(haystack) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&haystack[last..m.start()]);
        out.push_str(&replace(&caps)?);
        last = m.end();
    }
    out.push_str(&haystack[last..]);

    Ok(out)
}
