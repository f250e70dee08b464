//! Generation pass orchestration.
//!
//! One pass turns one schema file into one artifact: options are parsed,
//! the artifact is opened in the destination context, imports are
//! emitted, then for every service the implementation interface, the
//! definition interface and the client class, in that order.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::{DtsGenerator, GeneratedCode};
//! use grpc_dts_core::SchemaFile;
//!
//! let file = SchemaFile::new("empty.proto", "");
//! let mut code = GeneratedCode::new();
//!
//! let outcome = DtsGenerator::new().run(&file, "", &mut code);
//! assert!(outcome.success);
//! assert_eq!(code.get("empty_grpc_pb.d.ts").unwrap().content, "import * as grpc from 'grpc';\n\n");
//! ```

use crate::emit;
use crate::imports::{self, ImportSet};
use crate::printer::Printer;
use crate::typescript::artifact_path;
use grpc_dts_core::{Error, GeneratorOptions, Result, SchemaFile, Service};
use std::fmt;

/// Destination that can open one named output stream per artifact.
pub trait GeneratorContext {
    /// Opens (creating or truncating) the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutputError` if the artifact cannot be opened.
    fn open(&mut self, path: &str) -> Result<&mut dyn fmt::Write>;
}

/// Success flag plus optional message, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Whether the artifact is valid
    pub success: bool,
    /// Human-readable error when `success` is `false`
    pub error: Option<String>,
}

impl GenerationOutcome {
    /// A successful outcome.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed outcome carrying the error message.
    #[must_use]
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<String>> for GenerationOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Generator for gRPC TypeScript declaration files.
///
/// Stateless: every pass owns its own printer and import set, so passes
/// over different schema files can run on different threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtsGenerator;

impl DtsGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one generation pass and returns the artifact path.
    ///
    /// The parameter string is parsed before anything is opened, so a
    /// configuration error produces no artifact. A failure after the
    /// artifact was opened may leave partial content behind; the caller
    /// must discard it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` for a malformed parameter string,
    /// `Error::OutputError` if the artifact cannot be opened, and
    /// `Error::EmitError` if an emitter fails.
    pub fn generate<C>(&self, file: &SchemaFile, parameter: &str, context: &mut C) -> Result<String>
    where
        C: GeneratorContext + ?Sized,
    {
        let options = GeneratorOptions::parse(parameter)?;
        let path = artifact_path(&file.path);

        tracing::info!(file = %file.path, artifact = %path, "generating declarations");

        let mut printer = Printer::new(context.open(&path)?);

        let imports = ImportSet::collect(file);
        imports::print_imports(&mut printer, &options, &imports, &path)?;

        for service in &file.services {
            Self::print_service(&mut printer, &options, &imports, service)?;
        }

        tracing::info!(
            artifact = %path,
            services = file.services.len(),
            "generated declarations"
        );

        Ok(path)
    }

    /// Runs one pass per schema file against a shared destination context.
    ///
    /// Stops at the first failing file.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing pass.
    pub fn generate_all<'f, C>(
        &self,
        files: impl IntoIterator<Item = &'f SchemaFile>,
        parameter: &str,
        context: &mut C,
    ) -> Result<Vec<String>>
    where
        C: GeneratorContext + ?Sized,
    {
        files
            .into_iter()
            .map(|file| self.generate(file, parameter, context))
            .collect()
    }

    /// Runs one pass and reports the outcome as the host expects it.
    pub fn run<C>(&self, file: &SchemaFile, parameter: &str, context: &mut C) -> GenerationOutcome
    where
        C: GeneratorContext + ?Sized,
    {
        let result = self.generate(file, parameter, context);
        if let Err(e) = &result {
            tracing::error!(file = %file.path, error = %e, "generation failed");
        }
        result.into()
    }

    fn print_service<W: fmt::Write>(
        printer: &mut Printer<W>,
        options: &GeneratorOptions,
        imports: &ImportSet,
        service: &Service,
    ) -> Result<()> {
        tracing::debug!(
            service = %service.name,
            methods = service.methods.len(),
            "emitting service"
        );

        emit::print_implementation_interface(printer, options, imports, service)
            .map_err(|e| emit_error(service, "implementation interface", e))?;
        emit::print_definition_interface(printer, options, imports, service)
            .map_err(|e| emit_error(service, "definition interface", e))?;
        emit::print_client_class(printer, options, imports, service)
            .map_err(|e| emit_error(service, "client class", e))
    }
}

fn emit_error(service: &Service, block: &str, source: Error) -> Error {
    Error::EmitError {
        service: service.name.clone(),
        message: format!("failed to emit {block}"),
        source: Some(Box::new(source)),
    }
}
