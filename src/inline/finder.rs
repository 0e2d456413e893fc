//! Logical name → on-disk path lookup.

use std::path::{Path, PathBuf};

/// Searches static directories, in order, for a logical asset name.
#[derive(Debug, Clone, Default)]
pub struct StaticFinder {
    dirs: Vec<PathBuf>,
}

impl StaticFinder {
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Find the first existing file for `name`.
    ///
    /// Names that escape their directory with `..` never match.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let rel = logical_key(name);
        if rel.is_empty() || rel.split('/').any(|segment| segment == "..") {
            return None;
        }

        self.dirs
            .iter()
            .map(|dir| dir.join(rel))
            .find(|candidate| candidate.is_file())
    }

    /// Logical name of a file inside one of the search dirs.
    pub fn name_for(&self, path: &Path) -> Option<String> {
        self.dirs.iter().find_map(|dir| {
            let rel = path.strip_prefix(dir).ok()?;
            let parts: Vec<_> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            Some(parts.join("/"))
        })
    }
}

/// Normalized lookup key: no leading slash, no query string or fragment.
pub fn logical_key(name: &str) -> &str {
    let name = name.trim_start_matches('/');
    name.split(['?', '#']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StaticFinder) {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("static");
        let second = temp.path().join("vendor");
        fs::create_dir_all(first.join("css")).unwrap();
        fs::create_dir_all(second.join("css")).unwrap();
        fs::write(first.join("css/app.css"), "first").unwrap();
        fs::write(second.join("css/app.css"), "second").unwrap();
        fs::write(second.join("css/lib.css"), "lib").unwrap();

        let finder = StaticFinder::new([first, second]);
        (temp, finder)
    }

    #[test]
    fn test_find_prefers_first_dir() {
        let (temp, finder) = setup();
        assert_eq!(
            finder.find("css/app.css"),
            Some(temp.path().join("static/css/app.css"))
        );
        assert_eq!(
            finder.find("css/lib.css"),
            Some(temp.path().join("vendor/css/lib.css"))
        );
    }

    #[test]
    fn test_find_trims_leading_slash_and_query() {
        let (temp, finder) = setup();
        let expected = Some(temp.path().join("static/css/app.css"));
        assert_eq!(finder.find("/css/app.css"), expected);
        assert_eq!(finder.find("css/app.css?v=3"), expected);
        assert_eq!(finder.find("css/app.css#x"), expected);
    }

    #[test]
    fn test_find_rejects_escape_and_directories() {
        let (_temp, finder) = setup();
        assert_eq!(finder.find("../static/css/app.css"), None);
        assert_eq!(finder.find("css"), None);
        assert_eq!(finder.find(""), None);
        assert_eq!(finder.find("css/missing.css"), None);
    }

    #[test]
    fn test_name_for() {
        let (temp, finder) = setup();
        assert_eq!(
            finder.name_for(&temp.path().join("vendor/css/lib.css")),
            Some("css/lib.css".to_string())
        );
        assert_eq!(finder.name_for(Path::new("/elsewhere/x.css")), None);
    }

    #[test]
    fn test_logical_key() {
        assert_eq!(logical_key("/css/a.css?v=1"), "css/a.css");
        assert_eq!(logical_key("a.css"), "a.css");
    }
}
