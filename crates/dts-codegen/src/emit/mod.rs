//! Declaration emitters, one per generated block.
//!
//! Each emitter is a stateless function over one service that prints into
//! the shared [`Printer`](crate::printer::Printer), naming types through
//! the artifact's [`ImportSet`]. All three walk the
//! service's methods in declaration order and address each method by the
//! same property name.

pub mod client;
pub mod definition;
pub mod implementation;

pub use client::print_client_class;
pub use definition::print_definition_interface;
pub use implementation::print_implementation_interface;

use crate::imports::ImportSet;
use crate::printer::TemplateVars;
use grpc_dts_core::{GeneratorOptions, Method, Service};

/// Variables shared by every line of a service block.
fn service_vars(options: &GeneratorOptions, service: &Service) -> TemplateVars {
    let mut vars = options.vars();
    vars.insert("ServiceName", service.type_name().to_string());
    vars
}

/// Service variables extended with one method's names.
///
/// Built fresh for every method so nothing carries over between methods.
/// Type names are the identifiers the artifact's imports bind.
fn method_vars(
    service_vars: &TemplateVars,
    imports: &ImportSet,
    method: &Method,
) -> TemplateVars {
    let mut vars = service_vars.clone();
    vars.insert("MethodName", method.property_name());
    vars.insert("RequestName", imports.identifier(&method.request));
    vars.insert("ResponseName", imports.identifier(&method.response));
    vars
}
