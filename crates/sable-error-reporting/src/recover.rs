//! Panic recovery at the tool boundary.
//!
//! Analysis internals may panic with a plain error, with a diagnostic
//! some earlier layer already built, or with an arbitrary value. The
//! top-level driver catches the unwind and converts whatever it got into
//! a normal [`Diagnostic`] so a raw panic never escapes the tool. The
//! triage runs exactly once per recovered panic and never re-panics.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use crate::diagnostic::Diagnostic;
use crate::errors::codes;

/// The fixed remediation text attached to every internal diagnostic.
pub const REPORT_THIS_BUG: &str =
    "This is a bug in sable itself, not in your source. Please report it to the \
     maintainers at https://github.com/sable-lang/sable/issues with the output above.";

/// A recovered panic payload, classified into one of the three shapes
/// the adapter recognizes.
///
/// Transient: exists only between the unwind and the diagnostic built
/// from it.
#[derive(Debug)]
pub enum RecoveredFailure {
    /// An earlier layer already built a full diagnostic and re-raised it
    /// as the panic payload
    Diagnostic(Diagnostic),
    /// A plain error value (panicked with a boxed error)
    Failure(Box<dyn Error + Send + Sync>),
    /// Anything else; carries a best-effort rendering of the payload
    Opaque(String),
}

impl RecoveredFailure {
    /// Classify a raw panic payload.
    ///
    /// Checked in order: an already-built [`Diagnostic`] passes through;
    /// a boxed error becomes [`RecoveredFailure::Failure`]; the standard
    /// string payloads (`String`, `&str` — what `panic!` itself
    /// produces) and everything else become [`RecoveredFailure::Opaque`].
    /// Payloads of types the adapter cannot inspect render as a fixed
    /// placeholder; `Box<dyn Any>` carries no display capability.
    pub fn classify(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Diagnostic>() {
            Ok(diag) => return RecoveredFailure::Diagnostic(*diag),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<Box<dyn Error + Send + Sync>>() {
            Ok(err) => return RecoveredFailure::Failure(*err),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(text) => return RecoveredFailure::Opaque(*text),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(text) => RecoveredFailure::Opaque((*text).to_string()),
            Err(_) => RecoveredFailure::Opaque("a panic payload of unknown type".to_string()),
        }
    }
}

/// Convert a recovered panic payload into a diagnostic.
///
/// A payload that already is a [`Diagnostic`] is returned unchanged — no
/// re-wrapping, no second internal flag. Everything else becomes an
/// internal "Unhandled Panic" diagnostic: a boxed error is kept as the
/// cause with its message in the summary; an opaque payload contributes
/// only its rendering.
pub fn diagnostic_from_panic(payload: Box<dyn Any + Send>) -> Diagnostic {
    match RecoveredFailure::classify(payload) {
        RecoveredFailure::Diagnostic(diag) => diag,
        RecoveredFailure::Failure(err) => {
            let summary = format!("an unhandled panic occurred: {err}");
            Diagnostic::internal(codes::UNHANDLED_PANIC, "Unhandled Panic")
                .summary(summary)
                .detail(REPORT_THIS_BUG)
                .cause_boxed(err)
                .build()
        }
        RecoveredFailure::Opaque(text) => Diagnostic::internal(codes::UNHANDLED_PANIC, "Unhandled Panic")
            .summary(format!("an unhandled panic occurred: {text}"))
            .detail(REPORT_THIS_BUG)
            .build(),
    }
}

/// Run `f`, converting any panic into a returned [`Diagnostic`].
///
/// This is the hook the top-level driver wraps around parsing and
/// analysis: after conversion the failure behaves like any other
/// returned diagnostic.
pub fn catch_diagnostics<T>(f: impl FnOnce() -> Result<T, Diagnostic>) -> Result<T, Diagnostic> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let diag = diagnostic_from_panic(payload);
            tracing::error!(code = diag.code, internal = diag.internal, "recovered panic at tool boundary");
            Err(diag)
        }
    }
}
