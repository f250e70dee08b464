//! Tests for decoding the schema model handed over by the front end.

use grpc_dts_core::{SchemaFile, StreamingVariant};

const ROUTE_GUIDE: &str = r#"{
    "path": "routeguide/route_guide.proto",
    "package": "routeguide",
    "services": [
        {
            "name": "RouteGuide",
            "methods": [
                {
                    "name": "GetFeature",
                    "request": {"full_name": "routeguide.Point", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "response": {"full_name": "routeguide.Feature", "package": "routeguide", "file": "routeguide/route_guide.proto"}
                },
                {
                    "name": "ListFeatures",
                    "request": {"full_name": "routeguide.Rectangle", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "response": {"full_name": "routeguide.Feature", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "server_streaming": true
                },
                {
                    "name": "RecordRoute",
                    "request": {"full_name": "routeguide.Point", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "response": {"full_name": "routeguide.RouteSummary", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "client_streaming": true
                },
                {
                    "name": "RouteChat",
                    "request": {"full_name": "routeguide.RouteNote", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "response": {"full_name": "routeguide.RouteNote", "package": "routeguide", "file": "routeguide/route_guide.proto"},
                    "client_streaming": true,
                    "server_streaming": true
                }
            ]
        }
    ]
}"#;

#[test]
fn test_decode_route_guide() {
    let file = SchemaFile::from_json(ROUTE_GUIDE).unwrap();

    assert_eq!(file.path, "routeguide/route_guide.proto");
    assert_eq!(file.package, "routeguide");
    assert_eq!(file.services.len(), 1);

    let variants: Vec<_> = file.methods().map(|m| m.streaming).collect();
    assert_eq!(
        variants,
        [
            StreamingVariant::Unary,
            StreamingVariant::ServerStreaming,
            StreamingVariant::ClientStreaming,
            StreamingVariant::BidiStreaming,
        ]
    );
}

#[test]
fn test_decode_preserves_declaration_order() {
    let file = SchemaFile::from_json(ROUTE_GUIDE).unwrap();
    let names: Vec<_> = file.methods().map(|m| m.property_name()).collect();
    assert_eq!(names, ["getFeature", "listFeatures", "recordRoute", "routeChat"]);
}

#[test]
fn test_encode_then_decode_is_stable() {
    let file = SchemaFile::from_json(ROUTE_GUIDE).unwrap();
    let encoded = serde_json::to_string(&file).unwrap();
    let decoded = SchemaFile::from_json(&encoded).unwrap();
    assert_eq!(file, decoded);
}

#[test]
fn test_decode_minimal_file() {
    let file = SchemaFile::from_json(r#"{"path": "empty.proto"}"#).unwrap();
    assert!(file.package.is_empty());
    assert!(file.services.is_empty());
    assert_eq!(file.methods().count(), 0);
}

#[test]
fn test_decode_rejects_missing_type_file() {
    let json = r#"{
        "path": "a.proto",
        "services": [{"name": "S", "methods": [{
            "name": "M",
            "request": {"full_name": "A"},
            "response": {"full_name": "B", "file": "a.proto"}
        }]}]
    }"#;
    let err = SchemaFile::from_json(json).unwrap_err();
    assert!(err.is_serialization_error());
}
