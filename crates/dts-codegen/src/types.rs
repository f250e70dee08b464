//! In-memory collection of generated artifacts.
//!
//! [`GeneratedCode`] is the simplest destination context: every artifact a
//! pass opens becomes one [`GeneratedFile`].
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "greeter_grpc_pb.d.ts".to_string(),
//!     content: "import * as grpc from 'grpc';\n".to_string(),
//! });
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use crate::generator::GeneratorContext;
use grpc_dts_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files in the order they were opened
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Looks up a generated file by path.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new();
    /// code.add_file(GeneratedFile {
    ///     path: "a_grpc_pb.d.ts".to_string(),
    ///     content: String::new(),
    /// });
    ///
    /// assert!(code.get("a_grpc_pb.d.ts").is_some());
    /// assert!(code.get("b_grpc_pb.d.ts").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

impl GeneratorContext for GeneratedCode {
    /// Opens `path`, truncating an artifact that was already opened.
    fn open(&mut self, path: &str) -> Result<&mut dyn fmt::Write> {
        let index = if let Some(index) = self.files.iter().position(|f| f.path == path) {
            self.files[index].content.clear();
            index
        } else {
            self.files.push(GeneratedFile {
                path: path.to_string(),
                content: String::new(),
            });
            self.files.len() - 1
        };

        Ok(&mut self.files[index].content)
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path of the artifact relative to the output root
    pub path: String,
    /// File content
    pub content: String,
}
