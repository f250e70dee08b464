//! TypeScript declaration generation for gRPC services.
//!
//! Turns one [`SchemaFile`](grpc_dts_core::SchemaFile) into one
//! `<name>_grpc_pb.d.ts` artifact containing, per service, the server
//! implementation interface, the service definition interface with its
//! descriptor constant, and the client class.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::{DtsGenerator, GeneratedCode};
//! use grpc_dts_core::{Method, SchemaFile, Service, TypeRef};
//!
//! let request = TypeRef::new("pkg.HelloRequest", "pkg", "pkg/foo.proto");
//! let reply = TypeRef::new("pkg.HelloReply", "pkg", "pkg/foo.proto");
//! let file = SchemaFile::new("pkg/foo.proto", "pkg").with_service(
//!     Service::new("Greeter").with_method(Method::unary("SayHello", request, reply)),
//! );
//!
//! let mut code = GeneratedCode::new();
//! let path = DtsGenerator::new().generate(&file, "", &mut code).unwrap();
//!
//! assert_eq!(path, "pkg/foo_grpc_pb.d.ts");
//! assert!(code.get(&path).unwrap().content.contains("export class GreeterClient"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod emit;
pub mod generator;
pub mod imports;
pub mod printer;
pub mod types;
pub mod typescript;

pub use generator::{DtsGenerator, GenerationOutcome, GeneratorContext};
pub use printer::{Printer, TemplateVars};
pub use types::{GeneratedCode, GeneratedFile};
