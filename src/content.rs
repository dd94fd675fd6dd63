//! Content discovery.
//!
//! Walks a content root and reports every file beneath it. Each directory's
//! own files are reported before its subdirectories are descended, in the
//! order the OS enumerates them, so a tree like
//!
//! ```text
//! codex/
//!   a.md
//!   sub/
//!     b.md
//!   c.md
//! ```
//!
//! yields `a.md` and `c.md` (in enumeration order), then `sub/b.md`. No
//! extension filtering is done: every non-directory entry becomes a page.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One markdown source discovered under the content root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFile(PathBuf);

impl ContentFile {
    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for ContentFile {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&str> for ContentFile {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

impl AsRef<Path> for ContentFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ContentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Collect every non-directory path under `root`.
///
/// Fails as a whole if the root cannot be listed (missing, not a directory,
/// or unreadable) or any entry below it cannot be read; callers never see a
/// partial listing.
pub fn collect_content_files(root: impl AsRef<Path>) -> Result<Vec<ContentFile>> {
    let root = root.as_ref();

    // Opening the root catches missing, non-directory and unreadable roots
    // alike; metadata alone succeeds on a root that cannot be listed.
    std::fs::read_dir(root).map_err(|source| Error::ContentRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by(files_before_dirs);

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        debug!("found content file {}", entry.path().display());
        files.push(ContentFile::from(entry.into_path()));
    }

    Ok(files)
}

/// Stable partition: files keep their enumeration order and move ahead of
/// directories, which also keep theirs.
fn files_before_dirs(a: &walkdir::DirEntry, b: &walkdir::DirEntry) -> Ordering {
    a.file_type().is_dir().cmp(&b.file_type().is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn relative(root: &Path, files: &[ContentFile]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|f| f.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn test_top_level_files_precede_subdirectory_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.md"), "World").unwrap();
        fs::write(dir.path().join("a.md"), "Hello").unwrap();

        let files = collect_content_files(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            vec![PathBuf::from("a.md"), PathBuf::from("sub/b.md")]
        );
    }

    #[test]
    fn test_nested_directories_are_walked_without_limit() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("one/two/three/four");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("deep.md"), "deep").unwrap();

        let files = collect_content_files(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            vec![PathBuf::from("one/two/three/four/deep.md")]
        );
    }

    #[test]
    fn test_directories_and_empty_dirs_are_excluded() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty/also-empty")).unwrap();

        let files = collect_content_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_non_markdown_files_are_included() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "plain").unwrap();
        fs::write(dir.path().join("cover.jpg"), [0xFF, 0xD8, 0xFF]).unwrap();

        let files = collect_content_files(dir.path()).unwrap();
        let names: HashSet<_> = relative(dir.path(), &files).into_iter().collect();
        assert_eq!(
            names,
            HashSet::from([PathBuf::from("notes.txt"), PathBuf::from("cover.jpg")])
        );
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let err = collect_content_files(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::ContentRoot { .. }));
    }

    #[test]
    fn test_file_as_root_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "x").unwrap();

        let err = collect_content_files(&file).unwrap_err();
        assert!(matches!(err, Error::ContentRoot { .. }));
    }

    /// Make `path` unreadable for the duration of `f`. Returns `None` when
    /// the permissions are not enforced (e.g. running as root).
    #[cfg(unix)]
    fn with_unreadable<T>(path: &Path, f: impl FnOnce() -> T) -> Option<T> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        let enforced = fs::read_dir(path).is_err();
        let result = enforced.then(f);
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        result
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_a_root_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("codex");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.md"), "x").unwrap();

        if let Some(result) = with_unreadable(&root, || collect_content_files(&root)) {
            let err = result.unwrap_err();
            assert!(matches!(err, Error::ContentRoot { .. }), "got {err:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_fails_whole_walk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b.md"), "y").unwrap();

        if let Some(result) = with_unreadable(&sub, || collect_content_files(dir.path())) {
            let err = result.unwrap_err();
            assert!(matches!(err, Error::Walk(_)), "got {err:?}");
        }
    }
}
