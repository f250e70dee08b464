//! Indentation-aware text sink with `$Name$` placeholder substitution.
//!
//! One [`Printer`] is owned by a generation pass and threaded through every
//! emitter, so the artifact is a plain concatenation of emitted blocks.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_codegen::printer::{Printer, TemplateVars};
//!
//! let mut out = String::new();
//! let mut printer = Printer::new(&mut out);
//!
//! let mut vars = TemplateVars::new();
//! vars.insert("Name", "Greeter".to_string());
//!
//! printer.print("interface $Name$ {\n", &vars).unwrap();
//! printer
//!     .indented(|p| p.print("cost: $$5;\n", &vars))
//!     .unwrap();
//! printer.print("}\n", &vars).unwrap();
//!
//! assert_eq!(out, "interface Greeter {\n  cost: $5;\n}\n");
//! ```

use grpc_dts_core::Result;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Placeholder name to substitution text.
pub type TemplateVars = BTreeMap<&'static str, String>;

/// Text inserted once per nesting level.
pub const INDENT: &str = "  ";

/// `$Name$` placeholders; `$$` is an escaped dollar sign.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)?\$").expect("placeholder pattern is valid")
});

/// Resolves every placeholder in `template`.
///
/// Placeholders without a mapping resolve to the empty string.
///
/// # Examples
///
/// ```
/// use grpc_dts_codegen::printer::{render, TemplateVars};
///
/// let mut vars = TemplateVars::new();
/// vars.insert("A", "x".to_string());
/// assert_eq!(render("$A$-$B$-$$", &vars), "x--$");
/// ```
#[must_use]
pub fn render(template: &str, vars: &TemplateVars) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match caps.get(1) {
            Some(name) => vars.get(name.as_str()).cloned().unwrap_or_default(),
            None => "$".to_string(),
        })
        .into_owned()
}

/// Text sink that tracks nesting depth for the whole artifact.
///
/// Text is written straight into the underlying writer, so a failed pass
/// may leave a partially written artifact behind.
pub struct Printer<W> {
    out: W,
    depth: usize,
    at_line_start: bool,
}

impl<W: fmt::Write> Printer<W> {
    /// Creates a printer at depth zero.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            at_line_start: true,
        }
    }

    /// Renders `template` and appends it to the output.
    ///
    /// Every non-empty line is prefixed with the current indentation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Format` if the underlying writer fails.
    pub fn print(&mut self, template: &str, vars: &TemplateVars) -> Result<()> {
        let text = render(template, vars);

        for line in text.split_inclusive('\n') {
            if self.at_line_start && line != "\n" {
                for _ in 0..self.depth {
                    self.out.write_str(INDENT)?;
                }
            }
            self.out.write_str(line)?;
            self.at_line_start = line.ends_with('\n');
        }

        Ok(())
    }

    /// Increases nesting depth by one level.
    pub const fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decreases nesting depth by one level, stopping at zero.
    pub fn outdent(&mut self) {
        if self.depth == 0 {
            tracing::warn!("outdent called at depth zero");
            return;
        }
        self.depth -= 1;
    }

    /// Runs `f` one level deeper, restoring the depth on every exit path.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns.
    pub fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.indent();
        let result = f(self);
        self.outdent();
        result
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Consumes the printer and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> fmt::Debug for Printer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("depth", &self.depth)
            .field("at_line_start", &self.at_line_start)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpc_dts_core::Error;

    fn vars(pairs: &[(&'static str, &str)]) -> TemplateVars {
        pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect()
    }

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let vars = vars(&[("Name", "Foo")]);
        assert_eq!(render("$Name$ and $Name$", &vars), "Foo and Foo");
    }

    #[test]
    fn test_render_unknown_placeholder_is_empty() {
        assert_eq!(render("a$Missing$b", &TemplateVars::new()), "ab");
    }

    #[test]
    fn test_render_escaped_dollar() {
        assert_eq!(render("$$x", &TemplateVars::new()), "$x");
    }

    #[test]
    fn test_render_leaves_lone_dollar() {
        assert_eq!(render("cost $5", &TemplateVars::new()), "cost $5");
    }

    #[test]
    fn test_print_indents_non_empty_lines_only() {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);
        printer.indent();
        printer.print("a\n\nb\n", &TemplateVars::new()).unwrap();
        assert_eq!(out, "  a\n\n  b\n");
    }

    #[test]
    fn test_print_continues_partial_line_without_indent() {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);
        printer.indent();
        printer.print("foo", &TemplateVars::new()).unwrap();
        printer.print("bar\n", &TemplateVars::new()).unwrap();
        assert_eq!(out, "  foobar\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);
        let empty = TemplateVars::new();
        printer.print("a\n", &empty).unwrap();
        printer
            .indented(|p| {
                p.print("b\n", &empty)?;
                p.indented(|p| p.print("c\n", &empty))
            })
            .unwrap();
        printer.print("d\n", &empty).unwrap();
        assert_eq!(out, "a\n  b\n    c\nd\n");
    }

    #[test]
    fn test_indented_restores_depth_on_error() {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);

        let result: Result<()> = printer.indented(|p| {
            assert_eq!(p.depth(), 1);
            Err(Error::ConfigError {
                message: "boom".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(printer.depth(), 0);
    }

    #[test]
    fn test_outdent_saturates_at_zero() {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out);
        printer.outdent();
        assert_eq!(printer.depth(), 0);
    }

    #[test]
    fn test_into_inner() {
        let mut printer = Printer::new(String::new());
        printer.print("x\n", &TemplateVars::new()).unwrap();
        assert_eq!(printer.into_inner(), "x\n");
    }

    #[test]
    fn test_writer_failure_is_format_error() {
        struct Broken;

        impl fmt::Write for Broken {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut printer = Printer::new(Broken);
        let err = printer.print("x\n", &TemplateVars::new()).unwrap_err();
        assert!(err.is_emit_error());
    }
}
