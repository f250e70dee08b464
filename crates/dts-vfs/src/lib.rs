//! Virtual filesystem for generated declaration artifacts.
//!
//! Provides an in-memory destination context that a generation pass can
//! open artifacts in, and an export of its contents to a real directory.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod types;
pub mod vfs;

pub use builder::VfsBuilder;
pub use types::{Result, VfsError, VfsFile, VfsPath};
pub use vfs::Vfs;
