//! Deterministic tree traversal
//!
//! The walker yields root-relative paths of regular files in lexicographic
//! order, so regenerating a manifest for an unchanged tree is byte-identical
//! across runs and platforms.

use std::path::Path;
use treesum_errors::{Error, StorageError};
use walkdir::WalkDir;

/// Result of walking a directory tree.
#[derive(Debug, Clone, Default)]
pub struct WalkedTree {
    /// Relative paths of regular files, sorted lexicographically.
    pub files: Vec<String>,
    /// Entries that were skipped: symlinks, special files, and directory
    /// entries that could not be read.
    pub skipped: Vec<String>,
}

/// Enumerate regular files under `root`.
///
/// Symlinks are never followed; they and other non-regular entries land in
/// `skipped` rather than aborting the walk.
///
/// # Errors
/// Returns `StorageError::DirectoryNotFound` if `root` is not a directory.
pub fn collect_files(root: &Path) -> Result<WalkedTree, Error> {
    if !root.is_dir() {
        return Err(StorageError::DirectoryNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut tree = WalkedTree::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // Report unreadable entries root-relative, like everything else
                let path = e.path().map_or_else(
                    || root.display().to_string(),
                    |p| {
                        p.strip_prefix(root)
                            .unwrap_or(p)
                            .to_string_lossy()
                            .replace('\\', "/")
                    },
                );
                tree.skipped.push(path);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(root) {
            Ok(p) => p.to_string_lossy().replace('\\', "/"),
            Err(_) => continue,
        };

        if entry.file_type().is_file() {
            tree.files.push(rel_path);
        } else {
            tree.skipped.push(rel_path);
        }
    }

    tree.files.sort_unstable();
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_walk_is_sorted_and_recursive() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("z/deep")).unwrap();
        std::fs::write(temp.path().join("z/deep/3.txt"), b"3").unwrap();
        std::fs::write(temp.path().join("b.txt"), b"2").unwrap();
        std::fs::write(temp.path().join("a.txt"), b"1").unwrap();

        let tree = collect_files(temp.path()).unwrap();
        assert_eq!(tree.files, vec!["a.txt", "b.txt", "z/deep/3.txt"]);
        assert!(tree.skipped.is_empty());
    }

    #[test]
    fn test_walk_empty_tree() {
        let temp = TempDir::new().unwrap();
        let tree = collect_files(temp.path()).unwrap();
        assert!(tree.files.is_empty());
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let result = collect_files(&temp.path().join("absent"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_dir_reported_relative() {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::write(locked.join("hidden.txt"), b"x").unwrap();
        std::fs::set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();

        // A privileged user can list the directory anyway; nothing to observe
        if std::fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let tree = collect_files(temp.path()).unwrap();
        assert!(tree.skipped.iter().any(|p| p == "locked"));
        assert!(tree.skipped.iter().all(|p| !p.starts_with('/')));

        std::fs::set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("real.txt"), b"data").unwrap();
        std::os::unix::fs::symlink(temp.path().join("real.txt"), temp.path().join("link.txt"))
            .unwrap();

        let tree = collect_files(temp.path()).unwrap();
        assert_eq!(tree.files, vec!["real.txt"]);
        assert_eq!(tree.skipped, vec!["link.txt"]);
    }
}
