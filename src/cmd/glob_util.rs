//! Glob pattern expansion for the `--input` option.
//!
//! Expands patterns like `*.yml` or `config/doctrine/**/*.orm.yml` into the
//! list of mapping files to load.

use ahash::AHashSet;
use std::path::{Path, PathBuf};

/// Check if a path string contains glob pattern characters.
pub fn is_glob_pattern(path: &str) -> bool {
    path.contains('*') || path.contains('?') || path.contains('[')
}

/// Expand a file path or glob pattern into a sorted list of matching files.
///
/// A literal path (no glob characters) must exist and is returned as is.
///
/// # Errors
///
/// Returns an error if:
/// - The glob pattern is invalid
/// - No files match the pattern
/// - A literal path doesn't exist
pub fn expand_file_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !is_glob_pattern(pattern) {
        let path = Path::new(pattern);
        if !path.exists() {
            anyhow::bail!("file does not exist: {}", path.display());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = glob::glob(pattern)
        .map_err(|e| anyhow::anyhow!("invalid glob pattern '{}': {}", pattern, e))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                anyhow::bail!("error reading path for pattern '{}': {}", pattern, e);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("no files match pattern: {}", pattern);
    }

    files.sort();
    Ok(files)
}

/// Expand several patterns, keeping the first occurrence of each file.
///
/// Files keep the order of the patterns that matched them, which is also
/// the order in which later declarations override earlier ones.
pub fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = AHashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        for file in expand_file_pattern(pattern)? {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(dir: &TempDir, glob: &str) -> String {
        dir.path().join(glob).to_string_lossy().into_owned()
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(!is_glob_pattern("User.orm.yml"));
        assert!(!is_glob_pattern("/path/to/User.orm.yml"));
        assert!(is_glob_pattern("*.yml"));
        assert!(is_glob_pattern("dir/*.yml"));
        assert!(is_glob_pattern("**/*.yml"));
        assert!(is_glob_pattern("User?.yml"));
        assert!(is_glob_pattern("[abc].yml"));
    }

    #[test]
    fn test_expand_literal_path_exists() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("User.orm.yml");
        fs::write(&file, "{}").unwrap();

        let files = expand_file_pattern(&file.to_string_lossy()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_expand_literal_path_not_exists() {
        let result = expand_file_pattern("/nonexistent/User.orm.yml");
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_expand_glob_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.yml"), "{}").unwrap();
        fs::write(dir.path().join("a.yml"), "{}").unwrap();
        fs::write(dir.path().join("c.txt"), "not yaml").unwrap();

        let files = expand_file_pattern(&pattern(&dir, "*.yml")).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.yml"));
        assert!(files[1].ends_with("b.yml"));
    }

    #[test]
    fn test_expand_glob_no_matches() {
        let dir = TempDir::new().unwrap();
        let result = expand_file_pattern(&pattern(&dir, "*.yml"));
        assert!(result.unwrap_err().to_string().contains("no files match"));
    }

    #[test]
    fn test_expand_recursive_glob() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        fs::write(dir.path().join("a.yml"), "{}").unwrap();
        fs::write(subdir.join("b.yml"), "{}").unwrap();

        let files = expand_file_pattern(&pattern(&dir, "**/*.yml")).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_expand_patterns_deduplicates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yml"), "{}").unwrap();
        fs::write(dir.path().join("b.yml"), "{}").unwrap();

        let files = expand_patterns(&[
            pattern(&dir, "b.yml"),
            pattern(&dir, "*.yml"),
        ])
        .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.yml"));
        assert!(files[1].ends_with("a.yml"));
    }
}
