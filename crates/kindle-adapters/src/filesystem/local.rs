//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use kindle_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{KindleError, KindleResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
///
/// Existing directories are reused; existing files are overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> KindleResult<()> {
        trace!(path = %path.display(), "mkdir -p");
        std::fs::create_dir_all(path).map_err(|e| io_failure(path, "create directory", &e))
    }

    fn write_file(&self, path: &Path, content: &str) -> KindleResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| io_failure(path, "write file", &e))
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, executable: bool) -> KindleResult<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = std::fs::metadata(path)
            .map_err(|e| io_failure(path, "read metadata", &e))?
            .permissions();
        let mode = permissions.mode();
        permissions.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
        std::fs::set_permissions(path, permissions)
            .map_err(|e| io_failure(path, "set permissions", &e))
    }

    // No executable bit outside unix; scripts are run through bash there.
    #[cfg(not(unix))]
    fn set_permissions(&self, _path: &Path, _executable: bool) -> KindleResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> KindleResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| io_failure(path, "remove directory", &e))
    }
}

fn io_failure(path: &Path, operation: &str, err: &io::Error) -> KindleError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {err}"),
    }
    .into()
}
