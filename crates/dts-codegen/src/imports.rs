//! Cross-file import resolution.
//!
//! Every request and response type referenced by a method is imported from
//! the message module of the schema file that declares it. Groups are keyed
//! by origin path and names within a group are deduplicated; both levels
//! are kept in lexicographic order so the artifact is reproducible.
//!
//! A name imported from more than one origin is imported under an alias
//! prefixed with its origin (`Item as a_Item`), and declarations refer to
//! it through [`ImportSet::identifier`].
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::imports::ImportSet;
//! use grpc_dts_core::{Method, SchemaFile, Service, TypeRef};
//!
//! let file = SchemaFile::new("svc.proto", "svc").with_service(
//!     Service::new("Svc").with_method(Method::unary(
//!         "Get",
//!         TypeRef::new("svc.GetRequest", "svc", "svc.proto"),
//!         TypeRef::new("common.Item", "common", "common.proto"),
//!     )),
//! );
//!
//! let imports = ImportSet::collect(&file);
//! let origins: Vec<_> = imports.groups().map(|(origin, _)| origin).collect();
//! assert_eq!(origins, ["common", "svc"]);
//! ```

use crate::printer::Printer;
use crate::typescript::{module_path, remove_extension};
use grpc_dts_core::{GeneratorOptions, Result, SchemaFile, TypeRef};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Import of the runtime support types, emitted unconditionally.
pub const RUNTIME_IMPORT: &str = "import * as grpc from 'grpc';\n";

/// Type names to import, grouped by origin schema path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl ImportSet {
    /// Collects the imports needed by every method of every service in `file`.
    #[must_use]
    pub fn collect(file: &SchemaFile) -> Self {
        let mut imports = Self::default();

        for method in file.methods() {
            for type_ref in [&method.request, &method.response] {
                imports.insert(&type_ref.file, type_ref.import_name());
            }
        }

        imports
    }

    /// Registers one imported name under its origin path.
    pub fn insert(&mut self, origin: &str, name: &str) {
        self.groups
            .entry(remove_extension(origin).to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Iterates over groups by origin path, each with its names in order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.groups.iter().map(|(origin, names)| {
            (
                origin.as_str(),
                names.iter().map(String::as_str).collect::<Vec<_>>(),
            )
        })
    }

    /// Alias under which `name` is imported from `origin`.
    ///
    /// Returns `None` unless `name` is imported from more than one origin.
    /// `origin` may carry its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_codegen::imports::ImportSet;
    ///
    /// let mut imports = ImportSet::default();
    /// imports.insert("a.proto", "Item");
    /// imports.insert("common/v1/b.proto", "Item");
    /// imports.insert("a.proto", "Other");
    ///
    /// assert_eq!(imports.alias("a.proto", "Item").as_deref(), Some("a_Item"));
    /// assert_eq!(
    ///     imports.alias("common/v1/b", "Item").as_deref(),
    ///     Some("common_v1_b_Item")
    /// );
    /// assert_eq!(imports.alias("a.proto", "Other"), None);
    /// ```
    #[must_use]
    pub fn alias(&self, origin: &str, name: &str) -> Option<String> {
        let origins = self
            .groups
            .values()
            .filter(|names| names.contains(name))
            .count();

        (origins > 1).then(|| format!("{}_{name}", origin_prefix(remove_extension(origin))))
    }

    /// TypeScript identifier that refers to `type_ref` in this artifact.
    ///
    /// This is the package-relative name, with its top-level segment
    /// replaced by the import alias when one is needed.
    #[must_use]
    pub fn identifier(&self, type_ref: &TypeRef) -> String {
        let local = type_ref.local_name();
        let import_name = type_ref.import_name();

        match self.alias(&type_ref.file, import_name) {
            Some(alias) => format!("{alias}{}", &local[import_name.len()..]),
            None => local.to_string(),
        }
    }

    /// Number of origin groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no type needs importing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Characters of an origin path usable as an identifier prefix.
fn origin_prefix(origin: &str) -> String {
    let prefix: String = origin
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if prefix.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{prefix}")
    } else {
        prefix
    }
}

/// Prints the runtime import followed by one grouped import per origin file.
///
/// Module specifiers are relative to the directory of `artifact`.
///
/// # Errors
///
/// Returns `Error::Format` if the printer's writer fails.
pub fn print_imports<W: fmt::Write>(
    printer: &mut Printer<W>,
    options: &GeneratorOptions,
    imports: &ImportSet,
    artifact: &str,
) -> Result<()> {
    let mut vars = options.vars();
    printer.print(RUNTIME_IMPORT, &vars)?;
    printer.print("\n", &vars)?;

    tracing::debug!(artifact, groups = imports.len(), "resolved imports");

    for (origin, names) in imports.groups() {
        vars.insert("ImportPath", module_path(origin, artifact));

        printer.print("import {\n", &vars)?;
        printer.indented(|printer| {
            for name in &names {
                vars.insert("ImportName", (*name).to_string());
                match imports.alias(origin, name) {
                    Some(alias) => {
                        vars.insert("ImportAlias", alias);
                        printer.print("$ImportName$ as $ImportAlias$,\n", &vars)?;
                    }
                    None => printer.print("$ImportName$,\n", &vars)?,
                }
            }
            Ok(())
        })?;
        printer.print("} from '$ImportPath$';\n\n", &vars)?;
    }

    Ok(())
}
