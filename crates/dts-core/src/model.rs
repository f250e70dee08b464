//! Read-only schema model consumed by the generation engine.
//!
//! A [`SchemaFile`] is built once by the descriptor front end, handed to one
//! generation pass, and discarded afterwards. Nothing in the engine mutates
//! it. Every type derives serde so the front end can hand the model over
//! as JSON.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_core::{Method, SchemaFile, Service, TypeRef};
//!
//! let request = TypeRef::new("pkg.HelloRequest", "pkg", "pkg/foo");
//! let reply = TypeRef::new("pkg.HelloReply", "pkg", "pkg/foo");
//!
//! let file = SchemaFile::new("pkg/foo", "pkg").with_service(
//!     Service::new("Greeter").with_method(Method::unary("SayHello", request, reply)),
//! );
//!
//! assert_eq!(file.services[0].methods[0].property_name(), "sayHello");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four call shapes selected by the two streaming flags.
///
/// The variant is fixed when the method is constructed and never
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamingVariant {
    /// Single request, single response.
    Unary,
    /// Stream of requests, single response.
    ClientStreaming,
    /// Single request, stream of responses.
    ServerStreaming,
    /// Stream of requests, stream of responses.
    BidiStreaming,
}

impl StreamingVariant {
    /// Selects the variant from the two independent descriptor flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::StreamingVariant;
    ///
    /// assert_eq!(StreamingVariant::from_flags(false, false), StreamingVariant::Unary);
    /// assert_eq!(StreamingVariant::from_flags(true, true), StreamingVariant::BidiStreaming);
    /// ```
    #[must_use]
    pub const fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => Self::Unary,
            (true, false) => Self::ClientStreaming,
            (false, true) => Self::ServerStreaming,
            (true, true) => Self::BidiStreaming,
        }
    }

    /// Returns `true` if the client sends a stream of requests.
    #[must_use]
    pub const fn is_client_streaming(self) -> bool {
        matches!(self, Self::ClientStreaming | Self::BidiStreaming)
    }

    /// Returns `true` if the server sends a stream of responses.
    #[must_use]
    pub const fn is_server_streaming(self) -> bool {
        matches!(self, Self::ServerStreaming | Self::BidiStreaming)
    }
}

impl fmt::Display for StreamingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unary => "unary",
            Self::ClientStreaming => "client-streaming",
            Self::ServerStreaming => "server-streaming",
            Self::BidiStreaming => "bidi-streaming",
        };
        f.write_str(name)
    }
}

/// Reference to a message type and the schema file declaring it.
///
/// Two references share an import group iff they share an origin file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Fully-qualified type name, e.g. `pkg.HelloRequest`
    pub full_name: String,
    /// Package the type is declared in (may be empty)
    #[serde(default)]
    pub package: String,
    /// Path of the declaring schema file
    pub file: String,
}

impl TypeRef {
    /// Creates a new type reference.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            package: package.into(),
            file: file.into(),
        }
    }

    /// Name of the type relative to its package.
    ///
    /// This is how the type is addressed inside the generated declarations;
    /// nested messages keep their outer message as a qualifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::TypeRef;
    ///
    /// let nested = TypeRef::new("pkg.Outer.Inner", "pkg", "pkg/foo");
    /// assert_eq!(nested.local_name(), "Outer.Inner");
    ///
    /// let unpackaged = TypeRef::new("Ping", "", "ping");
    /// assert_eq!(unpackaged.local_name(), "Ping");
    /// ```
    #[must_use]
    pub fn local_name(&self) -> &str {
        if self.package.is_empty() {
            return &self.full_name;
        }

        self.full_name
            .strip_prefix(self.package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.full_name)
    }

    /// Name imported from the origin module: the top-level message.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::TypeRef;
    ///
    /// let nested = TypeRef::new("pkg.Outer.Inner", "pkg", "pkg/foo");
    /// assert_eq!(nested.import_name(), "Outer");
    /// ```
    #[must_use]
    pub fn import_name(&self) -> &str {
        let local = self.local_name();
        local.split('.').next().unwrap_or(local)
    }
}

/// A remote-procedure-call method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MethodRepr", into = "MethodRepr")]
pub struct Method {
    /// Method name as declared in the schema
    pub name: String,
    /// Request message type
    pub request: TypeRef,
    /// Response message type
    pub response: TypeRef,
    /// Call shape, fixed at construction
    pub streaming: StreamingVariant,
}

impl Method {
    /// Creates a method with an explicit streaming variant.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        request: TypeRef,
        response: TypeRef,
        streaming: StreamingVariant,
    ) -> Self {
        Self {
            name: name.into(),
            request,
            response,
            streaming,
        }
    }

    /// Creates a unary method.
    #[must_use]
    pub fn unary(name: impl Into<String>, request: TypeRef, response: TypeRef) -> Self {
        Self::new(name, request, response, StreamingVariant::Unary)
    }

    /// Creates a client-streaming method.
    #[must_use]
    pub fn client_streaming(name: impl Into<String>, request: TypeRef, response: TypeRef) -> Self {
        Self::new(name, request, response, StreamingVariant::ClientStreaming)
    }

    /// Creates a server-streaming method.
    #[must_use]
    pub fn server_streaming(name: impl Into<String>, request: TypeRef, response: TypeRef) -> Self {
        Self::new(name, request, response, StreamingVariant::ServerStreaming)
    }

    /// Creates a bidirectional-streaming method.
    #[must_use]
    pub fn bidi_streaming(name: impl Into<String>, request: TypeRef, response: TypeRef) -> Self {
        Self::new(name, request, response, StreamingVariant::BidiStreaming)
    }

    /// Property name used for this method in every generated declaration.
    ///
    /// The method name with its first character lower-cased.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::{Method, TypeRef};
    ///
    /// let t = TypeRef::new("pkg.Empty", "pkg", "pkg/foo");
    /// let method = Method::unary("SayHello", t.clone(), t);
    /// assert_eq!(method.property_name(), "sayHello");
    /// ```
    #[must_use]
    pub fn property_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        }
    }
}

/// Wire form of [`Method`]: the front end sends the two raw flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MethodRepr {
    name: String,
    request: TypeRef,
    response: TypeRef,
    #[serde(default)]
    client_streaming: bool,
    #[serde(default)]
    server_streaming: bool,
}

impl From<MethodRepr> for Method {
    fn from(repr: MethodRepr) -> Self {
        Self::new(
            repr.name,
            repr.request,
            repr.response,
            StreamingVariant::from_flags(repr.client_streaming, repr.server_streaming),
        )
    }
}

impl From<Method> for MethodRepr {
    fn from(method: Method) -> Self {
        Self {
            client_streaming: method.streaming.is_client_streaming(),
            server_streaming: method.streaming.is_server_streaming(),
            name: method.name,
            request: method.request,
            response: method.response,
        }
    }
}

/// A named collection of methods, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name as declared in the schema
    pub name: String,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    /// Creates a service with no methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Appends a method, keeping declaration order.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Prefix for every declaration generated for this service.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name
    }
}

/// One schema file: the unit of generation and of import grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Path of the schema file, with or without extension
    pub path: String,
    /// Package declared by the file (may be empty)
    #[serde(default)]
    pub package: String,
    /// Services in declaration order
    #[serde(default)]
    pub services: Vec<Service>,
}

impl SchemaFile {
    /// Creates a schema file with no services.
    #[must_use]
    pub fn new(path: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            services: Vec::new(),
        }
    }

    /// Appends a service, keeping declaration order.
    #[must_use]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Decodes a schema file from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if the JSON does not describe a
    /// schema file.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::{SchemaFile, StreamingVariant};
    ///
    /// let json = r#"{
    ///     "path": "chat.proto",
    ///     "services": [{
    ///         "name": "Chat",
    ///         "methods": [{
    ///             "name": "Talk",
    ///             "request": {"full_name": "Line", "file": "chat.proto"},
    ///             "response": {"full_name": "Line", "file": "chat.proto"},
    ///             "client_streaming": true,
    ///             "server_streaming": true
    ///         }]
    ///     }]
    /// }"#;
    ///
    /// let file = SchemaFile::from_json(json).unwrap();
    /// assert_eq!(file.services[0].methods[0].streaming, StreamingVariant::BidiStreaming);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SerializationError {
            message: format!("Failed to decode schema file: {e}"),
            source: Some(e),
        })
    }

    /// Iterates over every method of every service, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.services.iter().flat_map(|service| service.methods.iter())
    }
}
