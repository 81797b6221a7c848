//! Diagnostic constructors for the failures sable reports.
//!
//! Each constructor gathers the raw context for one error kind, resolves
//! whatever positions it has through the [`span`](crate::span) module,
//! and assembles the final [`Diagnostic`]. Codes are assigned here, one
//! per constructor, and checked against the catalog by
//! [`crate::catalog::verify`].

use std::any::Any;
use std::error::Error;

use sable_source_map::FileSet;

use crate::diagnostic::Diagnostic;
use crate::location::AnnotatedLocation;
use crate::recover::{diagnostic_from_panic, REPORT_THIS_BUG};
use crate::span::{FilePosition, NodeSpan, Span};

/// Numeric codes, one per error kind.
pub mod codes {
    pub const UNHANDLED_PANIC: u32 = 1;
    pub const PARSE_ERROR: u32 = 2;
    pub const MODULE_LOADER_ERROR: u32 = 3;
    pub const EXTERNAL_COMPILER_ERROR: u32 = 4;
    pub const STANDARD_LIBRARY_ERROR: u32 = 5;
    pub const GENERIC_ERROR: u32 = 6;
    pub const DUPLICATE_DEFINITION: u32 = 7;
    pub const CROSS_MODULE_REFERENCE: u32 = 8;
    pub const RESERVED_NAME: u32 = 9;
    pub const NAME_WRONG_LENGTH: u32 = 10;
    pub const INTERNAL_INVARIANT: u32 = 11;
    pub const NO_MODULES_FOUND: u32 = 12;
    pub const NESTED_MODULES: u32 = 13;
    pub const DUPLICATE_MODULE_NAME: u32 = 14;
}

/// Every code this module assigns, paired with the constructor that
/// claims it. [`crate::catalog::verify`] checks this table for
/// duplicates and unregistered codes.
pub const ASSIGNED_CODES: &[(u32, &str)] = &[
    (codes::UNHANDLED_PANIC, "unhandled_panic"),
    (codes::PARSE_ERROR, "parse_error"),
    (codes::MODULE_LOADER_ERROR, "module_loader_error"),
    (codes::EXTERNAL_COMPILER_ERROR, "external_compiler_error"),
    (codes::STANDARD_LIBRARY_ERROR, "standard_library_error"),
    (codes::GENERIC_ERROR, "generic_error"),
    (codes::DUPLICATE_DEFINITION, "duplicate_definition"),
    (codes::CROSS_MODULE_REFERENCE, "cross_module_reference"),
    (codes::RESERVED_NAME, "reserved_name"),
    (codes::NAME_WRONG_LENGTH, "name_wrong_length"),
    (codes::INTERNAL_INVARIANT, "invariant_violated"),
    (codes::NO_MODULES_FOUND, "no_modules_found"),
    (codes::NESTED_MODULES, "nested_modules"),
    (codes::DUPLICATE_MODULE_NAME, "duplicate_module_name"),
];

const MODULE_HELP: &str = "A module is a directory containing a `module.sb` file. Every rule \
     must live inside exactly one module; see the module guide for how \
     sable discovers them.";

const NAME_HELP: &str = "Names must be written in \"kebab-case\": lowercase words separated \
     by single dashes, starting and ending with a letter or digit.";

/// Join remediation fragments into one detail text.
fn combine<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts.into_iter().collect::<Vec<_>>().join("\n\n")
}

/// The error shape reported by the module loader (an external tool):
/// a free-text `path[:line[:col]]` position plus a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ModuleLoadError {
    /// Free-text position; may be empty or the sentinel `-`
    pub position: String,
    /// Human-readable failure message
    pub message: String,
}

/// Wrap a panic that was not handled anywhere else.
///
/// Ideally never seen by users; when it is, it means a bug in sable
/// itself. Delegates the payload triage to
/// [`crate::recover::diagnostic_from_panic`].
pub fn unhandled_panic(recovered: Box<dyn Any + Send>) -> Diagnostic {
    diagnostic_from_panic(recovered)
}

/// An error reported by sable's own scanner/parser.
pub fn parse_error(pos: &FilePosition, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(codes::PARSE_ERROR, "Parse Error")
        .summary(message)
        .location_opt(Span::from_positions(pos, pos))
        .build()
}

/// An error reported by the module loader while resolving the project.
///
/// The loader's free-text position is resolved best-effort; a position
/// of `-` or a line-less path degrades to a location-free diagnostic.
pub fn module_loader_error(err: ModuleLoadError) -> Diagnostic {
    let span = Span::from_text(&err.position);
    Diagnostic::error(codes::MODULE_LOADER_ERROR, "Module Loader Error")
        .summary(err.message.clone())
        .cause(err)
        .location_opt(span)
        .build()
}

/// An error line emitted by the downstream compiler the generated
/// sources are handed to. The caller has already split the line into
/// its structured parts.
pub fn external_compiler_error(file: &str, line: u32, column: u32, output: &str) -> Diagnostic {
    let pos = FilePosition::new(file, line, column);
    Diagnostic::error(codes::EXTERNAL_COMPILER_ERROR, "External Compiler Error")
        .summary(output.trim())
        .location_opt(Span::from_position(&pos))
        .build()
}

/// A standard library failure that is not caused by the analyzed
/// source. Wrapped so it still flows through the normal reporting path.
pub fn standard_library_error(err: impl Error + Send + Sync + 'static) -> Diagnostic {
    let summary = err.to_string();
    Diagnostic::internal(codes::STANDARD_LIBRARY_ERROR, "Error")
        .summary(summary)
        .detail(REPORT_THIS_BUG)
        .cause(err)
        .build()
}

/// Placeholder for errors reported through the analysis pass queue
/// without a more specific constructor.
pub fn generic_error(pos: &FilePosition, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(codes::GENERIC_ERROR, "Error")
        .summary(message)
        .location_opt(Span::from_positions(pos, pos))
        .build()
}

/// A rule (or other named item) defined twice within one module.
///
/// Annotates both sites: the original definition as help context, the
/// redefinition as the error.
pub fn duplicate_definition(
    files: &FileSet,
    kind: &str,
    name: &str,
    first: &NodeSpan,
    second: &NodeSpan,
) -> Diagnostic {
    let mut locations = Vec::new();
    if let Some(span) = Span::from_node(files, first) {
        locations.push(AnnotatedLocation::help(span).with_caption("originally defined here"));
    }
    if let Some(span) = Span::from_node(files, second) {
        locations.push(AnnotatedLocation::error(span).with_caption("redefined here"));
    }

    Diagnostic::error(codes::DUPLICATE_DEFINITION, "Duplicate definition")
        .summary(format!("the {kind} `{name}` is defined more than once"))
        .detail(combine([NAME_HELP, MODULE_HELP]))
        .locations(locations)
        .build()
}

/// A reference to an item from outside the module that defines it.
pub fn cross_module_reference(
    files: &FileSet,
    kind: &str,
    reference: &NodeSpan,
    defined: &NodeSpan,
) -> Diagnostic {
    let mut locations = Vec::new();
    if let Some(span) = Span::from_node(files, reference) {
        locations.push(AnnotatedLocation::error(span).with_caption("referenced here"));
    }
    if let Some(span) = Span::from_node(files, defined) {
        locations.push(AnnotatedLocation::help(span).with_caption("defined here"));
    }

    Diagnostic::error(codes::CROSS_MODULE_REFERENCE, "Cross-module reference")
        .summary(format!(
            "a {kind} can only be referenced from within the module it is defined in"
        ))
        .detail(MODULE_HELP)
        .locations(locations)
        .build()
}

/// A name using a prefix sable reserves for generated items.
pub fn reserved_name(
    files: &FileSet,
    node: &NodeSpan,
    kind: &str,
    name: &str,
    reserved_prefix: &str,
) -> Diagnostic {
    let location = Span::from_node(files, node).map(|span| {
        let annotated = AnnotatedLocation::error(span);
        // Should always strip, but better to be safe
        match name.strip_prefix(reserved_prefix) {
            Some(rest) => annotated.with_caption(format!("try {rest:?}?")),
            None => annotated,
        }
    });

    let mut builder = Diagnostic::error(codes::RESERVED_NAME, "Reserved name")
        .summary(format!(
            "the {kind} name {name:?} uses the reserved prefix {reserved_prefix:?}"
        ))
        .detail(NAME_HELP);
    if let Some(location) = location {
        builder = builder.location(location);
    }
    builder.build()
}

/// A name outside the accepted length range.
pub fn name_wrong_length(files: &FileSet, node: &NodeSpan, kind: &str, name: &str) -> Diagnostic {
    let location = Span::from_node(files, node).map(|span| {
        AnnotatedLocation::error(span)
            .with_caption(format!("is {} characters long", name.chars().count()))
    });

    let mut builder = Diagnostic::error(codes::NAME_WRONG_LENGTH, "Invalid name")
        .summary(format!(
            "the {kind} name needs to be between 1 and 63 characters long"
        ))
        .detail(NAME_HELP);
    if let Some(location) = location {
        builder = builder.location(location);
    }
    builder.build()
}

/// An invariant violation reported from a site without an AST node to
/// point at. Backs the [`internal_error!`](crate::internal_error) macro,
/// which stamps in the reporting site automatically.
pub fn invariant_violated_at(what: impl Into<String>, file: &str, line: u32) -> Diagnostic {
    Diagnostic::internal(codes::INTERNAL_INVARIANT, "Internal Error")
        .summary(format!("{} (at {file}:{line})", what.into()))
        .detail(REPORT_THIS_BUG)
        .build()
}

/// An invariant the tool itself was supposed to uphold did not hold.
pub fn invariant_violated(files: &FileSet, node: &NodeSpan, what: impl Into<String>) -> Diagnostic {
    Diagnostic::internal(codes::INTERNAL_INVARIANT, "Internal Error")
        .summary(what)
        .detail(REPORT_THIS_BUG)
        .location_opt(Span::from_node(files, node))
        .build()
}

/// The project contains no modules at all. Application-wide: carries no
/// source location by design.
pub fn no_modules_found() -> Diagnostic {
    Diagnostic::error(codes::NO_MODULES_FOUND, "No modules found")
        .summary("no modules were found in the project")
        .detail(MODULE_HELP)
        .build()
}

/// One module's directory nested inside another's.
pub fn nested_modules(outer: &str, inner: &str) -> Diagnostic {
    Diagnostic::error(codes::NESTED_MODULES, "Nested modules")
        .summary(format!(
            "the module {inner} was found within the module {outer}; sable does not allow modules to be nested"
        ))
        .detail(MODULE_HELP)
        .build()
}

/// Two modules sharing one name. The offending directories are named in
/// the summary since neither has a single node to point at.
pub fn duplicate_module_name(name: &str, first_dir: &str, second_dir: &str) -> Diagnostic {
    Diagnostic::error(codes::DUPLICATE_MODULE_NAME, "Duplicate module name")
        .summary(format!(
            "two modules were found with the same name {name:?}, modules must have unique names. The modules were found:\n\t{first_dir}\n\t{second_dir}"
        ))
        .detail(MODULE_HELP)
        .build()
}
