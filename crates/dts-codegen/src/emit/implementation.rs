//! Server-side implementation interface.
//!
//! ```text
//! export interface IGreeterImplementation {
//!   sayHello: grpc.handleUnaryCall<HelloRequest, HelloReply>;
//! }
//! ```

use super::{method_vars, service_vars};
use crate::imports::ImportSet;
use crate::printer::Printer;
use grpc_dts_core::{GeneratorOptions, Result, Service, StreamingVariant};
use std::fmt;

/// Handler property template for a streaming variant.
#[must_use]
pub const fn handler_template(streaming: StreamingVariant) -> &'static str {
    match streaming {
        StreamingVariant::Unary => {
            "$MethodName$: grpc.handleUnaryCall<$RequestName$, $ResponseName$>;\n"
        }
        StreamingVariant::ClientStreaming => {
            "$MethodName$: grpc.handleClientStreamingCall<$RequestName$, $ResponseName$>;\n"
        }
        StreamingVariant::ServerStreaming => {
            "$MethodName$: grpc.handleServerStreamingCall<$RequestName$, $ResponseName$>;\n"
        }
        StreamingVariant::BidiStreaming => {
            "$MethodName$: grpc.handleBidiStreamingCall<$RequestName$, $ResponseName$>;\n"
        }
    }
}

/// Prints `I<Service>Implementation` with one handler property per method.
///
/// # Errors
///
/// Returns `Error::Format` if the printer's writer fails.
pub fn print_implementation_interface<W: fmt::Write>(
    printer: &mut Printer<W>,
    options: &GeneratorOptions,
    imports: &ImportSet,
    service: &Service,
) -> Result<()> {
    let vars = service_vars(options, service);

    printer.print("export interface I$ServiceName$Implementation {\n", &vars)?;
    printer.indented(|printer| {
        for method in &service.methods {
            printer.print(
                handler_template(method.streaming),
                &method_vars(&vars, imports, method),
            )?;
        }
        Ok(())
    })?;
    printer.print("}\n\n", &vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpc_dts_core::{Method, TypeRef};

    fn render(service: &Service) -> String {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);
        print_implementation_interface(
            &mut printer,
            &GeneratorOptions::default(),
            &ImportSet::default(),
            service,
        )
            .unwrap();
        assert_eq!(printer.depth(), 0);
        out
    }

    fn t(name: &str) -> TypeRef {
        TypeRef::new(format!("pkg.{name}"), "pkg", "pkg/foo")
    }

    #[test]
    fn test_unary_handler() {
        let service =
            Service::new("Greeter").with_method(Method::unary("SayHello", t("HelloRequest"), t("HelloReply")));

        assert_eq!(
            render(&service),
            "export interface IGreeterImplementation {\n\
             \x20 sayHello: grpc.handleUnaryCall<HelloRequest, HelloReply>;\n\
             }\n\n"
        );
    }

    #[test]
    fn test_every_variant_in_declaration_order() {
        let service = Service::new("RouteGuide")
            .with_method(Method::unary("GetFeature", t("Point"), t("Feature")))
            .with_method(Method::server_streaming("ListFeatures", t("Rectangle"), t("Feature")))
            .with_method(Method::client_streaming("RecordRoute", t("Point"), t("RouteSummary")))
            .with_method(Method::bidi_streaming("RouteChat", t("RouteNote"), t("RouteNote")));

        let out = render(&service);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(
            lines,
            [
                "export interface IRouteGuideImplementation {",
                "  getFeature: grpc.handleUnaryCall<Point, Feature>;",
                "  listFeatures: grpc.handleServerStreamingCall<Rectangle, Feature>;",
                "  recordRoute: grpc.handleClientStreamingCall<Point, RouteSummary>;",
                "  routeChat: grpc.handleBidiStreamingCall<RouteNote, RouteNote>;",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn test_empty_service() {
        assert_eq!(
            render(&Service::new("Empty")),
            "export interface IEmptyImplementation {\n}\n\n"
        );
    }

    #[test]
    fn test_nested_types_keep_outer_qualifier() {
        let request = TypeRef::new("pkg.Outer.Inner", "pkg", "pkg/foo");
        let service = Service::new("S").with_method(Method::unary("Do", request, t("Reply")));

        assert!(render(&service).contains("do: grpc.handleUnaryCall<Outer.Inner, Reply>;"));
    }
}
