use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Appends `extension` when `path` has none.
pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn keeps_existing_extension() {
        assert_eq!(
            with_default_extension(Path::new("out/result.txt"), "md"),
            PathBuf::from("out/result.txt")
        );
        assert_eq!(
            with_default_extension(Path::new("out/result"), "md"),
            PathBuf::from("out/result.md")
        );
    }

    #[test]
    fn creates_missing_parents() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/result.md");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a/b").is_dir());

        ensure_parent_dir(Path::new("result.md")).unwrap();
    }
}
