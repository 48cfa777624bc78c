//! Snapshots of icon directories the external generator overwrites.
//!
//! The generator rewrites every platform's icons on each invocation. A
//! [`ProtectedDir`] snapshots the files a platform owns into a
//! [`BackupStore`] before the generator runs and merges them back afterwards.
//! Restores never delete: files only present in the live directory stay.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Which files of a protected directory a platform owns.
///
/// Patterns are paths relative to the directory, compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Every file.
    All,
    /// Every file except the listed ones.
    AllExcept(&'static [&'static str]),
    /// Only the listed files.
    Only(&'static [&'static str]),
}

impl Ownership {
    pub fn owns(&self, relative: &Path) -> bool {
        match self {
            Self::All => true,
            Self::AllExcept(excluded) => !excluded.iter().any(|name| relative == Path::new(name)),
            Self::Only(included) => included.iter().any(|name| relative == Path::new(name)),
        }
    }
}

/// A directory of snapshots keyed by platform.
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the snapshot for `key`.
    pub fn slot(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slot(key).is_dir()
    }
}

/// A platform's icon directory together with the files it owns there.
#[derive(Debug, Clone)]
pub struct ProtectedDir {
    key: &'static str,
    dir: PathBuf,
    ownership: Ownership,
}

impl ProtectedDir {
    pub fn new(key: &'static str, dir: impl Into<PathBuf>, ownership: Ownership) -> Self {
        Self {
            key,
            dir: dir.into(),
            ownership,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies the owned files into `store`, replacing any earlier snapshot.
    ///
    /// Returns `false` without touching the store when the directory does
    /// not exist.
    pub fn backup(&self, store: &BackupStore) -> Result<bool> {
        if !self.dir.is_dir() {
            tracing::debug!(event = "backup_skipped", key = self.key, dir = %self.dir.display());
            return Ok(false);
        }
        let slot = store.slot(self.key);
        if slot.exists() {
            fs::remove_dir_all(&slot).map_err(|e| Error::io(&slot, e))?;
        }
        fs::create_dir_all(&slot).map_err(|e| Error::io(&slot, e))?;
        let ownership = self.ownership;
        let copied = copy_tree(&self.dir, &slot, |relative| ownership.owns(relative))?;
        tracing::debug!(
            event = "backup",
            key = self.key,
            from = %self.dir.display(),
            to = %slot.display(),
            files = copied
        );
        Ok(true)
    }

    /// Merges the snapshot in `store` back over the directory.
    ///
    /// Files in both places are overwritten by the snapshot; files only in
    /// the directory are left alone. Returns `false` when there is no
    /// snapshot to restore.
    pub fn restore(&self, store: &BackupStore) -> Result<bool> {
        let slot = store.slot(self.key);
        if !slot.is_dir() {
            tracing::debug!(event = "restore_skipped", key = self.key, slot = %slot.display());
            return Ok(false);
        }
        let copied = copy_tree(&slot, &self.dir, |_| true)?;
        tracing::debug!(
            event = "restore",
            key = self.key,
            from = %slot.display(),
            to = %self.dir.display(),
            files = copied
        );
        Ok(true)
    }
}

/// Recursively copies the files under `src` accepted by `filter` into `dst`.
///
/// `filter` receives paths relative to `src`. Directories are created as
/// needed; existing files in `dst` are overwritten. Returns the number of
/// files copied.
pub fn copy_tree(src: &Path, dst: &Path, filter: impl Fn(&Path) -> bool) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        if !filter(relative) {
            continue;
        }
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| Error::io(&target, e))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn ownership_filters() {
        let icns = Path::new("icon.icns");
        let png = Path::new("32x32.png");
        assert!(Ownership::All.owns(icns));
        assert!(!Ownership::AllExcept(&["icon.icns"]).owns(icns));
        assert!(Ownership::AllExcept(&["icon.icns"]).owns(png));
        assert!(Ownership::Only(&["icon.icns"]).owns(icns));
        assert!(!Ownership::Only(&["icon.icns"]).owns(png));
    }

    #[test]
    fn restore_overwrites_shared_and_keeps_extras() {
        let tmp = tempfile::tempdir().unwrap();
        let live = tmp.path().join("icons");
        let store = BackupStore::new(tmp.path().join("backup"));
        write(&live.join("a"), "a");
        write(&live.join("b"), "b");
        write(&live.join("nested/c"), "c");
        let guard = ProtectedDir::new("windows", &live, Ownership::All);

        assert!(guard.backup(&store).unwrap());

        // The generator rewrites one file and adds another.
        write(&live.join("a"), "a-modified");
        write(&live.join("d"), "d");

        assert!(guard.restore(&store).unwrap());
        assert_eq!(read(&live.join("a")), "a");
        assert_eq!(read(&live.join("b")), "b");
        assert_eq!(read(&live.join("nested/c")), "c");
        assert_eq!(read(&live.join("d")), "d");
    }

    #[test]
    fn excluded_file_is_not_restored() {
        let tmp = tempfile::tempdir().unwrap();
        let live = tmp.path().join("icons");
        let store = BackupStore::new(tmp.path().join("backup"));
        write(&live.join("icon.icns"), "old-icns");
        write(&live.join("icon.ico"), "old-ico");
        let guard = ProtectedDir::new("windows", &live, Ownership::AllExcept(&["icon.icns"]));

        guard.backup(&store).unwrap();
        assert!(!store.slot("windows").join("icon.icns").exists());

        write(&live.join("icon.icns"), "new-icns");
        write(&live.join("icon.ico"), "new-ico");
        guard.restore(&store).unwrap();

        assert_eq!(read(&live.join("icon.icns")), "new-icns");
        assert_eq!(read(&live.join("icon.ico")), "old-ico");
    }

    #[test]
    fn missing_directory_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path().join("backup"));
        let guard = ProtectedDir::new("ios", tmp.path().join("absent"), Ownership::All);

        assert!(!guard.backup(&store).unwrap());
        assert!(!store.contains("ios"));
        assert!(!guard.restore(&store).unwrap());
        assert!(!tmp.path().join("absent").exists());
    }

    #[test]
    fn backup_replaces_previous_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let live = tmp.path().join("res");
        let store = BackupStore::new(tmp.path().join("backup"));
        let guard = ProtectedDir::new("android", &live, Ownership::All);

        write(&live.join("stale"), "1");
        guard.backup(&store).unwrap();
        fs::remove_file(live.join("stale")).unwrap();
        write(&live.join("fresh"), "2");
        guard.backup(&store).unwrap();

        assert!(!store.slot("android").join("stale").exists());
        assert!(store.slot("android").join("fresh").exists());
    }
}
