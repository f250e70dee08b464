//! Path and module naming helpers for the generated TypeScript.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::typescript::{artifact_path, module_path};
//!
//! let artifact = artifact_path("pkg/foo.proto");
//! assert_eq!(artifact, "pkg/foo_grpc_pb.d.ts");
//! assert_eq!(module_path("pkg/foo", &artifact), "./foo_pb");
//! assert_eq!(module_path("common/types", &artifact), "../common/types_pb");
//! ```

/// Suffix appended to the schema path to name the declaration artifact.
pub const ARTIFACT_SUFFIX: &str = "_grpc_pb.d.ts";

/// Suffix of the message module generated alongside each schema file.
pub const MESSAGE_MODULE_SUFFIX: &str = "_pb";

/// Strips the extension from the last segment of a `/`-separated path.
///
/// Dots in directory names and a leading dot in the file name are kept.
///
/// # Examples
///
/// ```
/// use grpc_dts_codegen::typescript::remove_extension;
///
/// assert_eq!(remove_extension("pkg/foo.proto"), "pkg/foo");
/// assert_eq!(remove_extension("pkg/foo"), "pkg/foo");
/// assert_eq!(remove_extension("v1.2/foo"), "v1.2/foo");
/// ```
#[must_use]
pub fn remove_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);

    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Name of the declaration artifact generated for a schema file.
///
/// `.` segments are dropped, so `./svc.proto` and `svc.proto` name the
/// same artifact.
///
/// # Examples
///
/// ```
/// use grpc_dts_codegen::typescript::artifact_path;
///
/// assert_eq!(artifact_path("./pkg/./foo.proto"), "pkg/foo_grpc_pb.d.ts");
/// ```
#[must_use]
pub fn artifact_path(schema_path: &str) -> String {
    let normalized = schema_path
        .split('/')
        .filter(|segment| *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    format!("{}{ARTIFACT_SUFFIX}", remove_extension(&normalized))
}

/// Module specifier importing the message module of `origin` from `artifact`.
///
/// `origin` is a schema path (extension optional); the specifier is made
/// relative to the directory holding `artifact`.
#[must_use]
pub fn module_path(origin: &str, artifact: &str) -> String {
    let target = format!("{}{MESSAGE_MODULE_SUFFIX}", remove_extension(origin));
    relative_path(directory_of(artifact), &target)
}

/// Directory part of a `/`-separated path, empty for top-level files.
fn directory_of(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Non-empty path segments other than `.`.
fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Relative specifier from directory `from` to file `to`, always starting
/// with `./` or `../`.
fn relative_path(from: &str, to: &str) -> String {
    let from = segments(from);
    let to = segments(to);

    // The last segment of `to` is the file name and never part of the prefix
    let common = from
        .iter()
        .zip(&to[..to.len().saturating_sub(1)])
        .take_while(|(a, b)| a == b)
        .count();

    let rest = to[common..].join("/");
    let ups = from.len() - common;

    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}
