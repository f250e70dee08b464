//! Fluent construction of a [`Vfs`].
//!
//! # Examples
//!
//! ```
//! use grpc_dts_vfs::VfsBuilder;
//!
//! let vfs = VfsBuilder::new()
//!     .add_file("/pkg/foo_grpc_pb.d.ts", "export {};")
//!     .add_file("/pkg/bar_grpc_pb.d.ts", "export {};")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(vfs.file_count(), 2);
//! ```

use crate::types::{Result, VfsError};
use crate::vfs::Vfs;
use grpc_dts_codegen::GeneratedCode;
use std::path::Path;

/// Builder for a virtual filesystem.
///
/// Path errors are collected while adding files and the first one is
/// reported by [`VfsBuilder::build`].
///
/// # Examples
///
/// ```
/// use grpc_dts_codegen::{GeneratedCode, GeneratedFile};
/// use grpc_dts_vfs::VfsBuilder;
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile {
///     path: "pkg/foo_grpc_pb.d.ts".to_string(),
///     content: "export {};".to_string(),
/// });
///
/// let vfs = VfsBuilder::from_generated_code(code, "/out")
///     .build()
///     .unwrap();
///
/// assert!(vfs.exists("/out/pkg/foo_grpc_pb.d.ts"));
/// ```
#[derive(Debug, Default)]
pub struct VfsBuilder {
    vfs: Vfs,
    errors: Vec<VfsError>,
}

impl VfsBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vfs: Vfs::new(),
            errors: Vec::new(),
        }
    }

    /// Creates a builder holding every artifact of `code`, placed under
    /// `base_path`.
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode, base_path: impl AsRef<Path>) -> Self {
        let base = base_path.as_ref();

        code.files().fold(Self::new(), |builder, file| {
            builder.add_file(base.join(&file.path), file.content.clone())
        })
    }

    /// Adds a file.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.vfs.add_file(path, content) {
            tracing::warn!(error = %e, "skipping file with invalid path");
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        files
            .into_iter()
            .fold(self, |builder, (path, content)| builder.add_file(path, content))
    }

    /// Returns the number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.vfs.file_count()
    }

    /// Builds the virtual filesystem.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while adding files.
    pub fn build(self) -> Result<Vfs> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.vfs),
        }
    }

    /// Builds the virtual filesystem and writes it below `base_path`.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while adding files, or any error
    /// from [`Vfs::export_to_filesystem`].
    pub fn build_and_export(self, base_path: impl AsRef<Path>) -> Result<Vfs> {
        let vfs = self.build()?;
        vfs.export_to_filesystem(base_path)?;
        Ok(vfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpc_dts_codegen::GeneratedFile;

    #[test]
    fn test_builder_empty() {
        let vfs = VfsBuilder::new().build().unwrap();
        assert_eq!(vfs.file_count(), 0);
    }

    #[test]
    fn test_builder_add_files() {
        let builder = VfsBuilder::new().add_files([("/a.d.ts", "a"), ("/b.d.ts", "b")]);
        assert_eq!(builder.file_count(), 2);

        let vfs = builder.build().unwrap();
        assert_eq!(vfs.read_file("/b.d.ts").unwrap(), "b");
    }

    #[test]
    fn test_builder_first_error_wins() {
        let err = VfsBuilder::new()
            .add_file("relative.d.ts", "")
            .add_file("/a/../b.d.ts", "")
            .build()
            .unwrap_err();

        assert!(matches!(err, VfsError::PathNotAbsolute { .. }));
    }

    #[test]
    fn test_from_generated_code() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: "routeguide/route_guide_grpc_pb.d.ts".to_string(),
            content: "x".to_string(),
        });
        code.add_file(GeneratedFile {
            path: "greeter_grpc_pb.d.ts".to_string(),
            content: "y".to_string(),
        });

        let vfs = VfsBuilder::from_generated_code(code, "/out").build().unwrap();

        assert_eq!(vfs.file_count(), 2);
        assert_eq!(
            vfs.read_file("/out/routeguide/route_guide_grpc_pb.d.ts").unwrap(),
            "x"
        );
        assert_eq!(vfs.read_file("/out/greeter_grpc_pb.d.ts").unwrap(), "y");
    }

    #[test]
    fn test_from_generated_code_relative_base_fails() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: "a_grpc_pb.d.ts".to_string(),
            content: String::new(),
        });

        let err = VfsBuilder::from_generated_code(code, "out").build().unwrap_err();
        assert!(err.is_invalid_path());
    }
}
