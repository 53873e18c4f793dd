//! Candidate file set
//!
//! Lists one directory (non-recursive) and keeps the entries eligible for
//! random selection. Nothing is cached: every request sees the current
//! directory contents.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{ImageError, ImageResult};

/// A file eligible for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name as listed in the directory
    pub name: String,
    /// Effective directory joined with the file name
    pub path: PathBuf,
}

/// Extension policy applied to directory entries
#[derive(Debug, Clone, Copy)]
pub struct ExtensionFilter<'a> {
    allowed: &'a [String],
    bypass: bool,
}

impl<'a> ExtensionFilter<'a> {
    pub const fn new(allowed: &'a [String], bypass: bool) -> Self {
        Self { allowed, bypass }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        self.bypass || is_allowed_extension(file_name, self.allowed)
    }
}

/// Extension of a file name: everything from the last `.`, dot included.
/// Names without a dot have an empty extension.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rfind('.').map_or("", |idx| &file_name[idx..])
}

/// Case-sensitive match against the dot-prefixed allow-list
pub fn is_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    let ext = file_extension(file_name);
    allowed.iter().any(|a| a == ext)
}

/// List `dir` and return the eligible entries ordered by file name
///
/// Subdirectories are skipped. Entries are not followed, so a symlink counts
/// as a file even when it points at a directory.
pub async fn collect_candidates(
    dir: &Path,
    filter: ExtensionFilter<'_>,
) -> ImageResult<Vec<Candidate>> {
    let unreadable = |source| ImageError::DirectoryUnreadable {
        dir: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(unreadable)?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let file_type = entry.file_type().await.map_err(unreadable)?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if filter.accepts(&name) {
            candidates.push(Candidate {
                path: dir.join(entry.file_name()),
                name,
            });
        }
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("a.jpg"), b"jpg").unwrap();
        std_fs::write(dir.path().join("b.png"), b"png").unwrap();
        std_fs::write(dir.path().join("note.txt"), b"txt").unwrap();
        std_fs::write(dir.path().join("UPPER.JPG"), b"jpg").unwrap();
        std_fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        dir
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.jpg"), ".jpg");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".hidden"), ".hidden");
        assert_eq!(file_extension("trailing."), ".");
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let allowed = exts(&[".jpg", ".png"]);
        assert!(is_allowed_extension("a.jpg", &allowed));
        assert!(!is_allowed_extension("a.JPG", &allowed));
        assert!(!is_allowed_extension("a.jpeg", &allowed));
        assert!(!is_allowed_extension("jpg", &allowed));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let filter = ExtensionFilter::new(&[], false);
        assert!(!filter.accepts("a.jpg"));
        let bypass = ExtensionFilter::new(&[], true);
        assert!(bypass.accepts("a.jpg"));
        assert!(bypass.accepts("README"));
    }

    #[tokio::test]
    async fn test_collect_filters_by_extension() {
        let dir = sample_dir();
        let allowed = exts(&[".jpg", ".png"]);
        let candidates = collect_candidates(dir.path(), ExtensionFilter::new(&allowed, false))
            .await
            .unwrap();
        assert_eq!(names(&candidates), vec!["a.jpg", "b.png"]);
        assert_eq!(candidates[0].path, dir.path().join("a.jpg"));
    }

    #[tokio::test]
    async fn test_bypass_includes_all_files_but_no_dirs() {
        let dir = sample_dir();
        let allowed = exts(&[".jpg"]);
        let candidates = collect_candidates(dir.path(), ExtensionFilter::new(&allowed, true))
            .await
            .unwrap();
        assert_eq!(
            names(&candidates),
            vec!["UPPER.JPG", "a.jpg", "b.png", "note.txt"]
        );
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let allowed = exts(&[".jpg"]);
        let candidates = collect_candidates(dir.path(), ExtensionFilter::new(&allowed, false))
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = collect_candidates(&missing, ExtensionFilter::new(&[], true)).await;
        assert!(matches!(
            result,
            Err(ImageError::DirectoryUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_listing_reflects_changes_between_calls() {
        let dir = tempfile::tempdir().unwrap();
        let allowed = exts(&[".jpg"]);
        let filter = ExtensionFilter::new(&allowed, false);

        std_fs::write(dir.path().join("first.jpg"), b"1").unwrap();
        let before = collect_candidates(dir.path(), filter).await.unwrap();
        assert_eq!(names(&before), vec!["first.jpg"]);

        std_fs::write(dir.path().join("second.jpg"), b"2").unwrap();
        std_fs::remove_file(dir.path().join("first.jpg")).unwrap();
        let after = collect_candidates(dir.path(), filter).await.unwrap();
        assert_eq!(names(&after), vec!["second.jpg"]);
    }
}
