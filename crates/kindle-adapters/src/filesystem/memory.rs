//! In-memory filesystem adapter for tests and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use kindle_core::{
    application::{ApplicationError, ports::Filesystem},
    error::KindleResult,
};

/// In-memory filesystem.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect another. Paths listed with [`MemoryFilesystem::fail_writes_to`]
/// refuse writes, which lets tests exercise abort paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
    refused: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write to a path ending in `suffix` fail.
    pub fn fail_writes_to(self, suffix: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.refused.insert(suffix.into());
        }
        self
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// Every file, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Files under `root`, relative to it.
    pub fn tree(&self, root: &Path) -> Vec<PathBuf> {
        self.list_files()
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    fn read(&self) -> KindleResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> KindleResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> KindleResult<()> {
        let mut inner = self.write()?;
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            inner.directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KindleResult<()> {
        let mut inner = self.write()?;

        let refused = inner.refused.iter().any(|suffix| path.ends_with(suffix));
        let orphan = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if refused || orphan {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: if refused {
                    "write refused".into()
                } else {
                    "parent directory does not exist".into()
                },
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> KindleResult<()> {
        let mut inner = self.write()?;
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> KindleResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/out/demo/scripts")).unwrap();
        fs.write_file(Path::new("/out/demo/scripts/dev.sh"), "echo").unwrap();
        fs.set_permissions(Path::new("/out/demo/scripts/dev.sh"), true).unwrap();

        assert!(view.exists(Path::new("/out/demo")));
        assert!(view.is_executable(Path::new("/out/demo/scripts/dev.sh")));
        assert_eq!(
            view.tree(Path::new("/out/demo")),
            vec![PathBuf::from("scripts/dev.sh")]
        );
    }

    #[test]
    fn writes_need_a_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/x.txt"), "x").is_err());
    }

    #[test]
    fn refused_paths_fail() {
        let fs = MemoryFilesystem::new().fail_writes_to("nx.json");
        fs.create_dir_all(Path::new("/out")).unwrap();
        assert!(fs.write_file(Path::new("/out/nx.json"), "{}").is_err());
        assert!(fs.write_file(Path::new("/out/package.json"), "{}").is_ok());
    }

    #[test]
    fn remove_dir_all_clears_the_subtree() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/out/demo")).unwrap();
        fs.write_file(Path::new("/out/demo/a"), "a").unwrap();
        fs.remove_dir_all(Path::new("/out/demo")).unwrap();
        assert!(!fs.exists(Path::new("/out/demo")));
        assert!(fs.exists(Path::new("/out")));
        assert!(fs.list_files().is_empty());
    }
}
