//! Virtual filesystem implementation.
//!
//! An in-memory store of generated artifacts keyed by [`VfsPath`]. It is a
//! [`GeneratorContext`], so a generation pass can write into it directly,
//! and its contents can be exported to a real directory afterwards.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::DtsGenerator;
//! use grpc_dts_core::SchemaFile;
//! use grpc_dts_vfs::Vfs;
//!
//! let mut vfs = Vfs::new();
//! DtsGenerator::new()
//!     .generate(&SchemaFile::new("pkg/empty.proto", "pkg"), "", &mut vfs)
//!     .unwrap();
//!
//! assert!(vfs.exists("/pkg/empty_grpc_pb.d.ts"));
//! ```

use crate::types::{Result, VfsError, VfsFile, VfsPath};
use grpc_dts_codegen::GeneratorContext;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An in-memory virtual filesystem for generated artifacts.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; each generation pass should own its
/// own instance or hold exclusive access while writing.
#[derive(Debug, Clone, Default)]
pub struct Vfs {
    files: HashMap<VfsPath, VfsFile>,
}

impl Vfs {
    /// Creates a new empty virtual filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Adds a file, replacing any file already at the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.add_file("/greeter_grpc_pb.d.ts", "export {};").unwrap();
    /// assert_eq!(vfs.file_count(), 1);
    /// ```
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let vfs_path = VfsPath::new(path)?;
        self.files.insert(vfs_path, VfsFile::new(content));
        Ok(())
    }

    /// Reads the content of a file.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::FileNotFound` if the file does not exist and
    /// `VfsError::InvalidPath` if the path is invalid.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let vfs_path = VfsPath::new(path)?;
        self.files
            .get(&vfs_path)
            .map(VfsFile::content)
            .ok_or_else(|| VfsError::FileNotFound {
                path: vfs_path.as_str().to_string(),
            })
    }

    /// Checks if a file exists at the given path.
    ///
    /// Returns `false` if the path is invalid.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        VfsPath::new(path)
            .ok()
            .is_some_and(|p| self.files.contains_key(&p))
    }

    /// Opens a file for writing, creating it or truncating its content.
    pub fn open_file(&mut self, path: VfsPath) -> &mut VfsFile {
        let file = self.files.entry(path).or_default();
        file.content_mut().clear();
        file
    }

    /// Returns the total number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns all file paths in sorted order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&VfsPath> {
        let mut paths: Vec<_> = self.files.keys().collect();
        paths.sort();
        paths
    }

    /// Iterates over all files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&VfsPath, &VfsFile)> {
        let mut entries: Vec<_> = self.files.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Removes all files.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Writes every file below `base_path` on the real filesystem.
    ///
    /// Parent directories are created first, in one pass; existing files
    /// are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::FileNotFound` if `base_path` does not exist and
    /// `VfsError::Io` if a directory or file cannot be written.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_vfs::Vfs;
    /// # use tempfile::TempDir;
    ///
    /// # let temp = TempDir::new().unwrap();
    /// let mut vfs = Vfs::new();
    /// vfs.add_file("/pkg/foo_grpc_pb.d.ts", "export {};").unwrap();
    ///
    /// vfs.export_to_filesystem(temp.path()).unwrap();
    /// assert!(temp.path().join("pkg/foo_grpc_pb.d.ts").exists());
    /// ```
    pub fn export_to_filesystem(&self, base_path: impl AsRef<Path>) -> Result<()> {
        let base = base_path.as_ref();

        if !base.is_dir() {
            return Err(VfsError::FileNotFound {
                path: base.display().to_string(),
            });
        }

        let dirs: BTreeSet<PathBuf> = self
            .files
            .keys()
            .filter_map(|path| path.parent())
            .map(|parent| base.join(parent.relative()))
            .collect();

        for dir in &dirs {
            fs::create_dir_all(dir).map_err(|source| VfsError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        }

        for (path, file) in self.files() {
            let disk_path = base.join(path.relative());
            fs::write(&disk_path, file.content()).map_err(|source| VfsError::Io {
                path: disk_path.display().to_string(),
                source,
            })?;
        }

        tracing::info!(
            base = %base.display(),
            files = self.files.len(),
            "exported artifacts"
        );

        Ok(())
    }
}

impl GeneratorContext for Vfs {
    fn open(&mut self, path: &str) -> grpc_dts_core::Result<&mut dyn fmt::Write> {
        let vfs_path = VfsPath::from_artifact(path)?;
        tracing::debug!(path = %vfs_path, "opening artifact");
        Ok(self.open_file(vfs_path).content_mut())
    }
}
