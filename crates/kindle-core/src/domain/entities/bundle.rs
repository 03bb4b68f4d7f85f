use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// How a file is treated when it is written.
///
/// Roles are ordered by write phase: descriptors first, scaffold last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactRole {
    /// Base project descriptor; a write failure aborts the run.
    Descriptor,
    /// Every other generated file.
    Standard,
    /// Static starter; skipped when the preset generator succeeds.
    Scaffold,
}

/// The composed set of files for one project, ready to be written.
///
/// Pure data: composing a bundle performs no I/O. Adding a file declares
/// any missing parent directories first, so directories always precede the
/// files written into them.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    root: PathBuf,
    entries: Vec<FsEntry>,
}

impl ArtifactBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(
        &mut self,
        path: &str,
        content: impl Into<String>,
        role: ArtifactRole,
    ) -> Result<(), DomainError> {
        self.push_file(path, content.into(), Permissions::read_write(), role)
    }

    pub fn add_executable(
        &mut self,
        path: &str,
        content: impl Into<String>,
        role: ArtifactRole,
    ) -> Result<(), DomainError> {
        self.push_file(path, content.into(), Permissions::executable(), role)
    }

    fn push_file(
        &mut self,
        path: &str,
        content: String,
        permissions: Permissions,
        role: ArtifactRole,
    ) -> Result<(), DomainError> {
        let path = RelativePath::try_new(path)?;
        if let Some(parent) = path.parent() {
            self.ensure_directory(parent, role);
        }
        self.entries.push(FsEntry::File(FileToWrite {
            path,
            content,
            permissions,
            role,
        }));
        Ok(())
    }

    /// Declare `dir` and its ancestors, outermost first.
    ///
    /// A directory already declared for a later phase is moved up to `role`.
    fn ensure_directory(&mut self, dir: RelativePath, role: ArtifactRole) {
        if let Some(parent) = dir.parent() {
            self.ensure_directory(parent, role);
        }
        let existing = self.entries.iter_mut().find_map(|e| match e {
            FsEntry::Directory(d) if d.path == dir => Some(d),
            _ => None,
        });
        match existing {
            Some(d) => d.role = d.role.min(role),
            None => self
                .entries
                .push(FsEntry::Directory(DirectoryToCreate { path: dir, role })),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyBundle);
        }

        let mut seen = HashSet::new();
        let mut directories = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
            if let Some(parent) = path.parent() {
                if !directories.contains(&parent) {
                    return Err(DomainError::MissingParentDirectory {
                        path: path.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
            if let FsEntry::Directory(d) = entry {
                directories.insert(d.path.clone());
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Look a file up by its relative path (`apps/demo/project.json`).
    pub fn file(&self, path: &str) -> Option<&FileToWrite> {
        self.files().find(|f| f.path.as_str() == path)
    }

    pub fn has_role(&self, role: ArtifactRole) -> bool {
        self.files().any(|f| f.role == role)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }

    pub fn role(&self) -> ArtifactRole {
        match self {
            Self::File(f) => f.role,
            Self::Directory(d) => d.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
    pub role: ArtifactRole,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
    /// Earliest write phase that needs this directory.
    pub role: ArtifactRole,
}
