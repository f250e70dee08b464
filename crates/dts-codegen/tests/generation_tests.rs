//! End-to-end tests for declaration generation.
//!
//! Builds schema models programmatically or from JSON fixtures, runs a full
//! pass into an in-memory context, and checks the artifact text.

use grpc_dts_codegen::imports::ImportSet;
use grpc_dts_codegen::{DtsGenerator, GeneratedCode};
use grpc_dts_core::{Method, SchemaFile, Service, TypeRef};

const GREETER_ARTIFACT: &str = include_str!("fixtures/greeter_grpc_pb.d.ts");
const ROUTE_GUIDE_JSON: &str = include_str!("fixtures/route_guide.json");

fn pkg_type(name: &str) -> TypeRef {
    TypeRef::new(format!("pkg.{name}"), "pkg", "pkg/foo")
}

fn greeter() -> SchemaFile {
    SchemaFile::new("pkg/foo", "pkg").with_service(
        Service::new("Greeter").with_method(Method::unary(
            "SayHello",
            pkg_type("HelloRequest"),
            pkg_type("HelloReply"),
        )),
    )
}

fn generate(file: &SchemaFile) -> String {
    let mut code = GeneratedCode::new();
    let path = DtsGenerator::new().generate(file, "", &mut code).unwrap();
    code.get(&path).unwrap().content.clone()
}

/// Returns the text of the block starting at `header` up to its closing brace.
fn block<'a>(content: &'a str, header: &str) -> &'a str {
    let start = content.find(header).unwrap();
    let end = start + content[start..].find("\n}\n").unwrap();
    &content[start..end]
}

/// Property names declared in a block, in order of appearance.
fn properties(block: &str) -> Vec<String> {
    block
        .lines()
        .skip(1)
        .filter(|line| line.starts_with("  ") && !line.starts_with("    "))
        .map(|line| {
            line.trim()
                .split(':')
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

#[test]
fn test_greeter_artifact_matches_fixture() {
    let mut code = GeneratedCode::new();
    let path = DtsGenerator::new().generate(&greeter(), "", &mut code).unwrap();

    assert_eq!(path, "pkg/foo_grpc_pb.d.ts");
    assert_eq!(code.get(&path).unwrap().content, GREETER_ARTIFACT);
}

#[test]
fn test_greeter_artifact_from_schema_with_extension() {
    let mut file = greeter();
    file.path = "pkg/foo.proto".to_string();

    let mut code = GeneratedCode::new();
    let path = DtsGenerator::new().generate(&file, "", &mut code).unwrap();

    assert_eq!(path, "pkg/foo_grpc_pb.d.ts");
    assert_eq!(code.get(&path).unwrap().content, GREETER_ARTIFACT);
}

#[test]
fn test_cross_file_types_form_separate_groups() {
    let file = SchemaFile::new("svc/api.proto", "svc").with_service(
        Service::new("Api").with_method(Method::unary(
            "Fetch",
            TypeRef::new("svc.FetchRequest", "svc", "svc/requests.proto"),
            TypeRef::new("svc.FetchResponse", "svc", "svc/responses.proto"),
        )),
    );

    let content = generate(&file);

    assert_eq!(content.matches("import {").count(), 2);
    assert!(content.contains("import {\n  FetchRequest,\n} from './requests_pb';\n"));
    assert!(content.contains("import {\n  FetchResponse,\n} from './responses_pb';\n"));
    assert!(content.find("requests_pb").unwrap() < content.find("responses_pb").unwrap());
}

#[test]
fn test_bidi_method_has_no_client_signature() {
    let file = SchemaFile::new("chat.proto", "chat").with_service(
        Service::new("Chat").with_method(Method::bidi_streaming(
            "Talk",
            TypeRef::new("chat.Line", "chat", "chat.proto"),
            TypeRef::new("chat.Line", "chat", "chat.proto"),
        )),
    );

    let content = generate(&file);

    assert!(content.contains("  talk: grpc.handleBidiStreamingCall<Line, Line>;\n"));
    assert!(content.contains("  talk: grpc.MethodDefinition<Line, Line>;\n"));
    assert!(content.contains("export class ChatClient extends grpc.Client {\n}\n"));
}

#[test]
fn test_route_guide_from_json() {
    let file = SchemaFile::from_json(ROUTE_GUIDE_JSON).unwrap();
    let mut code = GeneratedCode::new();
    let path = DtsGenerator::new().generate(&file, "", &mut code).unwrap();

    assert_eq!(path, "routeguide/route_guide_grpc_pb.d.ts");
    let content = &code.get(&path).unwrap().content;

    let imports: Vec<_> = content
        .lines()
        .filter(|line| line.starts_with("} from "))
        .collect();
    assert_eq!(
        imports,
        [
            "} from '../google/protobuf/empty_pb';",
            "} from './route_guide_pb';",
            "} from './status_pb';",
        ]
    );
    assert!(content.contains(
        "import {\n  Feature,\n  Point,\n  Rectangle,\n  RouteNote,\n  RouteSummary,\n} from './route_guide_pb';"
    ));

    // Services in declaration order
    assert!(content.find("IRouteGuideImplementation").unwrap() < content.find("IHealthImplementation").unwrap());
    assert!(content.contains("  check: grpc.handleUnaryCall<Empty, Status>;\n"));
}

#[test]
fn test_emitters_agree_on_method_order() {
    let file = SchemaFile::from_json(ROUTE_GUIDE_JSON).unwrap();
    let content = generate(&file);

    let implementation = properties(block(&content, "export interface IRouteGuideImplementation"));
    let definition = properties(block(&content, "export interface IRouteGuideServiceDefinition"));
    let client = properties(block(&content, "export class RouteGuideClient"));

    let declared = ["getFeature", "listFeatures", "recordRoute", "routeChat"];
    assert_eq!(implementation, declared);
    assert_eq!(definition, declared);

    // Only the unary method appears, three times, in the client class
    assert_eq!(client, ["getFeature", "getFeature", "getFeature"]);
}

#[test]
fn test_unary_methods_have_three_overloads() {
    let service = Service::new("Store")
        .with_method(Method::unary("Get", pkg_type("Key"), pkg_type("Value")))
        .with_method(Method::server_streaming("Scan", pkg_type("Range"), pkg_type("Value")))
        .with_method(Method::unary("Put", pkg_type("Entry"), pkg_type("Ack")))
        .with_method(Method::client_streaming("Load", pkg_type("Entry"), pkg_type("Ack")));
    let file = SchemaFile::new("pkg/foo", "pkg").with_service(service);

    let content = generate(&file);
    let client = block(&content, "export class StoreClient");

    assert_eq!(properties(client), ["get", "get", "get", "put", "put", "put"]);

    // Overloads grow by one optional parameter each
    let get_signatures: Vec<usize> = client
        .split("  get\n")
        .skip(1)
        .map(|overload| {
            overload
                .lines()
                .take_while(|line| !line.contains("): void;"))
                .count()
        })
        .collect();
    assert_eq!(get_signatures, [2, 3, 4]);
}

#[test]
fn test_import_set_is_independent_of_method_order() {
    let methods = vec![
        Method::unary("A", pkg_type("One"), TypeRef::new("x.Two", "x", "x/two")),
        Method::unary("B", TypeRef::new("y.Three", "y", "y/three"), pkg_type("One")),
        Method::unary("C", pkg_type("Four"), TypeRef::new("x.Five", "x", "x/two")),
    ];

    let build = |methods: Vec<Method>| {
        let service = methods
            .into_iter()
            .fold(Service::new("S"), Service::with_method);
        SchemaFile::new("pkg/foo", "pkg").with_service(service)
    };

    let forward = build(methods.clone());
    let reversed = build(methods.into_iter().rev().collect());

    assert_eq!(ImportSet::collect(&forward), ImportSet::collect(&reversed));

    // The whole import section is identical, not just the set
    let imports_of = |file: &SchemaFile| {
        let content = generate(file);
        let end = content.find("export interface").unwrap();
        content[..end].to_string()
    };
    assert_eq!(imports_of(&forward), imports_of(&reversed));
}

#[test]
fn test_generate_all_shares_context() {
    let chat = SchemaFile::new("chat.proto", "chat");
    let mut code = GeneratedCode::new();

    let paths = DtsGenerator::new()
        .generate_all([&greeter(), &chat], "", &mut code)
        .unwrap();

    assert_eq!(paths, ["pkg/foo_grpc_pb.d.ts", "chat_grpc_pb.d.ts"]);
    assert_eq!(code.file_count(), 2);
}

#[test]
fn test_generate_all_stops_at_first_failure() {
    let mut code = GeneratedCode::new();
    let result = DtsGenerator::new().generate_all([&greeter()], "=x", &mut code);

    assert!(result.unwrap_err().is_config_error());
    assert_eq!(code.file_count(), 0);
}

#[test]
fn test_services_separated_by_blank_lines() {
    let file = SchemaFile::new("pkg/foo", "pkg")
        .with_service(Service::new("A"))
        .with_service(Service::new("B"));

    let content = generate(&file);

    assert!(content.contains("export class AClient extends grpc.Client {\n}\n\nexport interface IBImplementation {\n"));
    assert!(content.ends_with("export class BClient extends grpc.Client {\n}\n\n"));
    assert!(!content.contains("\n\n\n"));
}

#[test]
fn test_same_short_name_from_two_origins_stays_distinct() {
    let file = SchemaFile::new("svc/mover.proto", "svc").with_service(
        Service::new("Mover").with_method(Method::unary(
            "Move",
            TypeRef::new("a.Item", "a", "a.proto"),
            TypeRef::new("b.Item", "b", "b.proto"),
        )),
    );

    let content = generate(&file);

    assert!(content.contains("import {\n  Item as a_Item,\n} from '../a_pb';\n"));
    assert!(content.contains("import {\n  Item as b_Item,\n} from '../b_pb';\n"));
    assert!(content.contains("  move: grpc.handleUnaryCall<a_Item, b_Item>;\n"));
    assert!(content.contains("  move: grpc.MethodDefinition<a_Item, b_Item>;\n"));
    assert_eq!(content.matches("( request: a_Item\n").count(), 3);
    assert_eq!(
        content
            .matches("callback: grpc.requestCallback<b_Item>\n")
            .count(),
        3
    );
    assert!(!content.contains("<Item"));
}
