//! Core types for the virtual filesystem.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_vfs::{VfsFile, VfsPath};
//!
//! let path = VfsPath::new("/routeguide/route_guide_grpc_pb.d.ts").unwrap();
//! let file = VfsFile::new("import * as grpc from 'grpc';\n");
//!
//! assert_eq!(path.file_name(), "route_guide_grpc_pb.d.ts");
//! assert_eq!(file.size(), 30);
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during VFS operations.
///
/// # Examples
///
/// ```
/// use grpc_dts_vfs::VfsError;
///
/// let error = VfsError::FileNotFound {
///     path: "/missing.d.ts".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// ```
#[derive(Error, Debug)]
pub enum VfsError {
    /// No file at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Path is empty or not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// Path is not absolute (must start with '/')
    #[error("Path must be absolute: {path}")]
    PathNotAbsolute {
        /// The relative path
        path: String,
    },

    /// Path contains a '..' or '.' component
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The path with invalid components
        path: String,
    },

    /// Writing to the real filesystem failed
    #[error("I/O error at {path}")]
    Io {
        /// Disk path being written
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl VfsError {
    /// Returns `true` if this is a file not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` if this is any kind of invalid path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_vfs::VfsError;
    ///
    /// let error = VfsError::PathNotAbsolute {
    ///     path: "pkg/foo_grpc_pb.d.ts".to_string(),
    /// };
    ///
    /// assert!(error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. }
                | Self::PathNotAbsolute { .. }
                | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<VfsError> for grpc_dts_core::Error {
    fn from(error: VfsError) -> Self {
        let path = match &error {
            VfsError::FileNotFound { path }
            | VfsError::InvalidPath { path }
            | VfsError::PathNotAbsolute { path }
            | VfsError::InvalidPathComponent { path }
            | VfsError::Io { path, .. } => path.clone(),
        };

        Self::OutputError {
            path,
            message: error.to_string(),
        }
    }
}

/// A validated virtual filesystem path.
///
/// Paths use Unix conventions on every platform: they start with '/',
/// use '/' as separator, and contain no '.' or '..' components.
///
/// # Examples
///
/// ```
/// use grpc_dts_vfs::VfsPath;
///
/// assert!(VfsPath::new("/pkg/foo_grpc_pb.d.ts").is_ok());
/// assert!(VfsPath::new("pkg/foo_grpc_pb.d.ts").is_err());
/// assert!(VfsPath::new("/pkg/../escape.d.ts").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsPath(String);

impl VfsPath {
    /// Creates a new `VfsPath` from a path-like type.
    ///
    /// Backslashes are normalized to '/' on Windows.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidPath` if the path is empty or not UTF-8,
    /// `VfsError::PathNotAbsolute` if it does not start with '/', and
    /// `VfsError::InvalidPathComponent` if it has a '.' or '..' component.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let path_str = path.to_str().ok_or_else(|| VfsError::InvalidPath {
            path: path.display().to_string(),
        })?;

        let normalized = if cfg!(target_os = "windows") {
            path_str.replace(std::path::MAIN_SEPARATOR, "/")
        } else {
            path_str.to_string()
        };

        if normalized.is_empty() {
            return Err(VfsError::InvalidPath {
                path: String::new(),
            });
        }

        if !normalized.starts_with('/') {
            return Err(VfsError::PathNotAbsolute { path: normalized });
        }

        if normalized.split('/').any(|part| part == ".." || part == ".") {
            return Err(VfsError::InvalidPathComponent { path: normalized });
        }

        Ok(Self(normalized))
    }

    /// Roots a relative artifact path (as produced by the generator) at '/'.
    ///
    /// `.` segments are dropped; `..` segments are still rejected.
    ///
    /// # Errors
    ///
    /// Same as [`VfsPath::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_vfs::VfsPath;
    ///
    /// let path = VfsPath::from_artifact("pkg/foo_grpc_pb.d.ts").unwrap();
    /// assert_eq!(path.as_str(), "/pkg/foo_grpc_pb.d.ts");
    /// ```
    pub fn from_artifact(artifact: &str) -> Result<Self> {
        let segments: Vec<_> = artifact
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();

        if segments.is_empty() {
            return Err(VfsError::InvalidPath {
                path: artifact.to_string(),
            });
        }

        Self::new(format!("/{}", segments.join("/")))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path relative to the root, without the leading '/'.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    /// Returns the last path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Returns the parent directory of this path.
    ///
    /// Returns `None` for the root path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0 == "/" {
            return None;
        }

        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self("/".to_string())
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for VfsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// A file in the virtual filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VfsFile {
    content: String,
}

impl VfsFile {
    /// Creates a new VFS file with the given content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the file content as a string slice.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the content buffer for appending.
    pub const fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Returns the size of the file content in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.content.len()
    }
}

/// Type alias for VFS operation results.
pub type Result<T> = std::result::Result<T, VfsError>;
