//! Core types, options, and errors for gRPC declaration generation.
//!
//! This crate provides the foundational types shared by the generation
//! engine and its destination contexts.
//!
//! # Architecture
//!
//! The core consists of:
//! - The read-only schema model (`SchemaFile`, `Service`, `Method`, `TypeRef`)
//! - Error hierarchy with contextual information
//! - Generator options parsed from the plugin parameter string

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod model;
mod options;

pub use error::{Error, Result};
pub use model::{Method, SchemaFile, Service, StreamingVariant, TypeRef};
pub use options::GeneratorOptions;
