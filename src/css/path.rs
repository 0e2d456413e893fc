//! URL path helpers for the CSS rewriter.
//!
//! These operate on `/`-separated URL paths, never on filesystem paths,
//! so they behave identically on every platform.

/// Prefixes that mark a base URL as carrying its own scheme and host.
const ABSOLUTE_BASE_PREFIXES: [&str; 3] = ["http://", "https://", "//"];

/// Split a static base URL into `(scheme_host, base_path)`.
///
/// `scheme_host` is only present for absolute bases. `base_path` never
/// ends with `/`.
///
/// ```ignore
/// split_base_url("https://cdn.example.com/static/") -> (Some("https://cdn.example.com"), "static")
/// split_base_url("//cdn.example.com/static")        -> (Some("//cdn.example.com"), "static")
/// split_base_url("/static/")                        -> (None, "/static")
/// ```
pub fn split_base_url(base_url: &str) -> (Option<String>, String) {
    if !ABSOLUTE_BASE_PREFIXES
        .iter()
        .any(|prefix| base_url.starts_with(prefix))
    {
        return (None, base_url.trim_end_matches('/').to_string());
    }

    let parts: Vec<&str> = base_url.split('/').collect();
    let split_at = parts.len().min(3);
    let scheme_host = parts[..split_at].join("/");
    let path = parts[split_at..].join("/");

    (Some(scheme_host), path.trim_end_matches('/').to_string())
}

/// Directory component of a `/`-separated name (`""` when there is none).
///
/// Trailing slashes of the directory are dropped unless it is the root.
pub fn dirname(name: &str) -> &str {
    let Some(idx) = name.rfind('/') else {
        return "";
    };
    let head = &name[..=idx];
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() { head } else { trimmed }
}

/// Normalize a `/`-separated path.
///
/// Drops `.` and empty segments, lets `..` consume the previous segment,
/// and keeps leading `..` segments of relative paths. Any run of leading
/// slashes collapses to one. An empty result becomes `.`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".into();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&"..") => segments.push(".."),
                Some(_) => {
                    segments.pop();
                }
                // `..` above the root is the root itself
                None if rooted => {}
                None => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".into(),
        (false, false) => joined,
    }
}
