//! Client class with call-signature overloads.
//!
//! Unary methods get three overloads, each adding one optional parameter
//! before the trailing callback:
//!
//! ```text
//! export class GreeterClient extends grpc.Client {
//!   sayHello
//!     ( request: HelloRequest
//!     , callback: grpc.requestCallback<HelloReply>
//!     ): void;
//!   ...
//! }
//! ```
//!
//! Client-streaming, server-streaming and bidirectional methods produce no
//! client signatures at all. Callers must not assume every method has a
//! client-side signature.

use super::{method_vars, service_vars};
use crate::imports::ImportSet;
use crate::printer::Printer;
use grpc_dts_core::{GeneratorOptions, Result, Service, StreamingVariant};
use std::fmt;

/// Optional parameters of each unary overload, in emission order.
const UNARY_OVERLOADS: [&[&str]; 3] = [
    &[],
    &[", metadata: grpc.Metadata | null\n"],
    &[
        ", metadata: grpc.Metadata | null\n",
        ", options: grpc.CallOptions | null\n",
    ],
];

/// Prints `<Service>Client` with overloads for every unary method.
///
/// # Errors
///
/// Returns `Error::Format` if the printer's writer fails.
pub fn print_client_class<W: fmt::Write>(
    printer: &mut Printer<W>,
    options: &GeneratorOptions,
    imports: &ImportSet,
    service: &Service,
) -> Result<()> {
    let vars = service_vars(options, service);

    printer.print("export class $ServiceName$Client extends grpc.Client {\n", &vars)?;
    printer.indented(|printer| {
        for method in &service.methods {
            match method.streaming {
                StreamingVariant::Unary => {
                    print_unary_overloads(printer, &method_vars(&vars, imports, method))?;
                }
                StreamingVariant::ClientStreaming
                | StreamingVariant::ServerStreaming
                | StreamingVariant::BidiStreaming => {
                    tracing::debug!(
                        service = %service.name,
                        method = %method.name,
                        streaming = %method.streaming,
                        "no client signature for streaming method"
                    );
                }
            }
        }
        Ok(())
    })?;
    printer.print("}\n\n", &vars)
}

fn print_unary_overloads<W: fmt::Write>(
    printer: &mut Printer<W>,
    vars: &crate::printer::TemplateVars,
) -> Result<()> {
    for (index, optional) in UNARY_OVERLOADS.iter().enumerate() {
        printer.print("$MethodName$\n", vars)?;
        printer.indented(|printer| {
            printer.print("( request: $RequestName$\n", vars)?;
            for parameter in *optional {
                printer.print(parameter, vars)?;
            }
            printer.print(", callback: grpc.requestCallback<$ResponseName$>\n", vars)?;
            printer.print("): void;\n", vars)?;

            // Blank line after the last overload separates methods
            if index + 1 == UNARY_OVERLOADS.len() {
                printer.print("\n", vars)?;
            }
            Ok(())
        })?;
    }
    Ok(())
}
