//! File discovery with glob pattern support.
//!
//! Finds the JavaScript-family sources a check run should cover. Discovery
//! is the caller-side edge of the system: the scanner core itself never
//! touches the filesystem.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::SrclintError;
use crate::Result;

/// File extensions treated as JavaScript sources.
const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all JavaScript files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all JavaScript files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(parse_pattern(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(parse_pattern(pattern)?);
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it has a JavaScript extension, matches at least one
    /// include pattern (or include is empty), and matches no exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let is_js = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| JS_EXTENSIONS.contains(&ext));
        if !is_js {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn parse_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| SrclintError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules" || name == "dist"
}

/// Discover JavaScript source files under a root.
///
/// Walks the tree, skipping hidden directories, `node_modules` and `dist`,
/// and returns all matching files sorted for deterministic output. A file
/// root returns itself when it matches.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(SrclintError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !should_skip_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();
        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_site_files(dir: &Path) {
        fs::create_dir_all(dir.join("lib")).unwrap();
        fs::create_dir_all(dir.join("lib/filters")).unwrap();
        fs::create_dir_all(dir.join("node_modules/dep")).unwrap();
        fs::create_dir_all(dir.join("dist")).unwrap();
        fs::create_dir_all(dir.join(".cache")).unwrap();

        fs::write(dir.join("index.js"), "run();").unwrap();
        fs::write(dir.join("config.mjs"), "export default {};").unwrap();
        fs::write(dir.join("lib/util.js"), "module.exports = {};").unwrap();
        fs::write(dir.join("lib/filters/date.js"), "module.exports = {};").unwrap();
        fs::write(dir.join("node_modules/dep/index.js"), "ignored").unwrap();
        fs::write(dir.join("dist/bundle.js"), "ignored").unwrap();
        fs::write(dir.join(".cache/tmp.js"), "ignored").unwrap();
        fs::write(dir.join("README.md"), "# Readme").unwrap();
    }

    #[test]
    fn matches_javascript_extensions() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("index.js")));
        assert!(filter.matches(Path::new("config.mjs")));
        assert!(filter.matches(Path::new("legacy.cjs")));
        assert!(filter.matches(Path::new("app.jsx")));
        assert!(!filter.matches(Path::new("README.md")));
        assert!(!filter.matches(Path::new("styles.css")));
        assert!(!filter.matches(Path::new("nodotjs")));
    }

    #[test]
    fn include_pattern_narrows() {
        let filter = FilterConfig::new().include("**/filters/*.js").unwrap();

        assert!(filter.matches(Path::new("lib/filters/date.js")));
        assert!(!filter.matches(Path::new("lib/util.js")));
    }

    #[test]
    fn exclude_pattern_wins() {
        let filter = FilterConfig::new().exclude("**/legacy/**").unwrap();

        assert!(filter.matches(Path::new("lib/util.js")));
        assert!(!filter.matches(Path::new("lib/legacy/old.js")));
    }

    #[test]
    fn discover_skips_vendored_and_hidden() {
        let temp = tempdir().unwrap();
        create_site_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert!(files.iter().any(|p| p.ends_with("index.js")));
        assert!(files.iter().any(|p| p.ends_with("config.mjs")));
        assert!(files.iter().any(|p| p.ends_with("lib/filters/date.js")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains("node_modules")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains("dist")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains(".cache")));
    }

    #[test]
    fn discover_is_sorted() {
        let temp = tempdir().unwrap();
        create_site_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn discover_single_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("only.js");
        fs::write(&file, "x();").unwrap();

        let files = discover_files(&file, &FilterConfig::new()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn discover_nonexistent_path_errors() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());
        assert!(matches!(result, Err(SrclintError::PathNotFound(_))));
    }

    #[test]
    fn invalid_glob_pattern_errors() {
        let result = FilterConfig::new().include("[invalid");
        assert!(matches!(result, Err(SrclintError::InvalidGlob { .. })));
    }
}
