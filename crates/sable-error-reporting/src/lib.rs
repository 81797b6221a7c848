//! Error reporting and diagnostics for sable.
//!
//! This crate turns the failures the compiler encounters into structured
//! [`Diagnostic`] values that carry an error code, a human-readable
//! message, and zero or more source locations. Positions arrive in
//! whatever shape the reporting layer has (structured parser positions,
//! AST node offsets, free-text `path:line:col` strings) and are resolved
//! into one canonical [`Span`] before assembly.
//!
//! # Architecture
//!
//! - [`span`]: canonical source spans and the resolvers that produce
//!   them from each input shape
//! - [`location`]: spans annotated with a role (error or help) and an
//!   optional caption
//! - [`diagnostic`]: the [`Diagnostic`] type and its builder
//! - [`errors`]: one constructor per error kind, each owning a code
//! - [`catalog`]: the embedded error-code catalog and its consistency
//!   checks
//! - [`recover`]: panic payload triage at tool boundaries
//!
//! # Example
//!
//! ```
//! use sable_error_reporting::{FilePosition, errors};
//!
//! let pos = FilePosition::new("checks/module.sb", 3, 6);
//! let diag = errors::parse_error(&pos, "unexpected token `{`");
//!
//! assert_eq!(diag.primary_span().unwrap().line, 3);
//! println!("{diag}");
//! ```

pub mod catalog;
pub mod diagnostic;
pub mod errors;
pub mod location;
pub mod macros;
pub mod recover;
pub mod span;

// Re-export main types for convenience
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_code_info};
pub use diagnostic::{Diagnostic, DiagnosticBuilder};
pub use location::{AnnotatedLocation, LocationRole};
pub use recover::{REPORT_THIS_BUG, RecoveredFailure, catch_diagnostics};
pub use span::{FilePosition, NodeSpan, Span, parse_file_position};
