//! Wire-level service definition interface and its descriptor constant.
//!
//! ```text
//! export interface IGreeterServiceDefinition extends grpc.ServiceDefinition<IGreeterImplementation> {
//!   sayHello: grpc.MethodDefinition<HelloRequest, HelloReply>;
//! }
//!
//! export const GreeterService: IGreeterServiceDefinition;
//! ```

use super::{method_vars, service_vars};
use crate::imports::ImportSet;
use crate::printer::Printer;
use grpc_dts_core::{GeneratorOptions, Result, Service};
use std::fmt;

/// Prints `I<Service>ServiceDefinition` and the `<Service>Service` constant.
///
/// Every streaming variant gets the same method-definition property.
///
/// # Errors
///
/// Returns `Error::Format` if the printer's writer fails.
pub fn print_definition_interface<W: fmt::Write>(
    printer: &mut Printer<W>,
    options: &GeneratorOptions,
    imports: &ImportSet,
    service: &Service,
) -> Result<()> {
    let vars = service_vars(options, service);

    printer.print(
        "export interface I$ServiceName$ServiceDefinition \
         extends grpc.ServiceDefinition<I$ServiceName$Implementation> {\n",
        &vars,
    )?;
    printer.indented(|printer| {
        for method in &service.methods {
            printer.print(
                "$MethodName$: grpc.MethodDefinition<$RequestName$, $ResponseName$>;\n",
                &method_vars(&vars, imports, method),
            )?;
        }
        Ok(())
    })?;
    printer.print("}\n\n", &vars)?;

    printer.print(
        "export const $ServiceName$Service: I$ServiceName$ServiceDefinition;\n\n",
        &vars,
    )
}
