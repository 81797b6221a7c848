//! Core diagnostic type and its builder.
//!
//! A [`Diagnostic`] is the terminal artifact of every failure the tool
//! reports: parser errors, analysis violations, external tool failures,
//! and recovered panics all end up here. Construction is pure and
//! infallible; a diagnostic is built once at the failure site and flows
//! upward through `Result` returns to the top-level reporter.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::location::{AnnotatedLocation, LocationRole};
use crate::span::Span;

/// The unified representation of a reportable failure.
///
/// Carries a numeric code (stable per error kind, see
/// [`crate::catalog`]), a short title, a fully formatted one-line
/// summary, optional remediation detail, an optional underlying cause,
/// an ordered sequence of annotated locations, and a flag separating
/// bugs in the tool itself from mistakes in the analyzed source.
///
/// Diagnostics are plain values: `Clone + Send + Sync`, safe to build
/// from any number of concurrent analysis passes with no shared state.
#[derive(Debug, Clone)]
#[must_use = "diagnostics should be returned or reported, not silently dropped"]
pub struct Diagnostic {
    /// Stable numeric code, unique per error kind
    pub code: u32,
    /// Short category name
    pub title: String,
    /// One-line human message, instance values already interpolated
    pub summary: String,
    /// Longer remediation text, possibly multi-paragraph
    pub detail: Option<String>,
    /// The lower-level error this diagnostic wraps, held for display and
    /// chaining only
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
    /// Annotated source locations, in caller-given order
    pub locations: Vec<AnnotatedLocation>,
    /// Whether this signals a bug in the tool itself rather than a
    /// problem in the analyzed source
    pub internal: bool,
}

impl Diagnostic {
    /// Start building a user-source diagnostic.
    pub fn error(code: u32, title: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, title, false)
    }

    /// Start building an internal ("bug in the tool") diagnostic.
    pub fn internal(code: u32, title: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, title, true)
    }

    /// The wrapped lower-level error, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The span of the first error-role location.
    pub fn primary_span(&self) -> Option<&Span> {
        self.locations
            .iter()
            .find(|loc| loc.is_error())
            .map(|loc| &loc.span)
    }

    /// Whether this diagnostic signals a bug in the tool itself.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Render this diagnostic as a structured JSON value.
    ///
    /// Optional fields are omitted rather than serialized as null; the
    /// cause is rendered as its display string.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut obj = json!({
            "code": self.code,
            "title": self.title,
            "summary": self.summary,
            "internal": self.internal,
        });

        if let Some(detail) = &self.detail {
            obj["detail"] = json!(detail);
        }

        if let Some(cause) = &self.cause {
            obj["cause"] = json!(cause.to_string());
        }

        if !self.locations.is_empty() {
            obj["locations"] = json!(self.locations);
        }

        obj
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.internal {
            "internal error"
        } else {
            "error"
        };
        write!(f, "{kind}[{:04}] {}: {}", self.code, self.title, self.summary)?;

        for loc in &self.locations {
            let marker = match loc.role {
                LocationRole::Error => "-->",
                LocationRole::Help => ":::",
            };
            write!(f, "\n  {marker} {}:{}", loc.span.file, loc.span.line)?;
            if loc.span.column > 0 {
                write!(f, ":{}", loc.span.column)?;
            }
            if let Some(caption) = &loc.caption {
                write!(f, " ({caption})")?;
            }
        }

        if let Some(detail) = &self.detail {
            write!(f, "\n  = help: {detail}")?;
        }

        Ok(())
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

/// Builder for [`Diagnostic`] values.
///
/// Every field except code and title has a default: empty detail, no
/// cause, no locations. `build()` cannot fail; validating code
/// uniqueness is the catalog's job, not the assembler's.
#[derive(Debug)]
pub struct DiagnosticBuilder {
    code: u32,
    title: String,
    summary: String,
    detail: Option<String>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
    locations: Vec<AnnotatedLocation>,
    internal: bool,
}

impl DiagnosticBuilder {
    fn new(code: u32, title: impl Into<String>, internal: bool) -> Self {
        DiagnosticBuilder {
            code,
            title: title.into(),
            summary: String::new(),
            detail: None,
            cause: None,
            locations: Vec::new(),
            internal,
        }
    }

    /// Set the one-line summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the remediation detail text.
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the underlying error this diagnostic wraps.
    pub fn cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attach an already-boxed underlying error.
    pub fn cause_boxed(mut self, cause: Box<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(Arc::from(cause));
        self
    }

    /// Append one annotated location. Locations render in push order.
    pub fn location(mut self, location: AnnotatedLocation) -> Self {
        self.locations.push(location);
        self
    }

    /// Append a location when the span resolved, skip it when it did not.
    ///
    /// This is the common pattern at call sites: position resolution is
    /// best-effort, and a failed resolution degrades the diagnostic to
    /// fewer (possibly zero) locations.
    pub fn location_opt(mut self, span: Option<Span>) -> Self {
        if let Some(span) = span {
            self.locations.push(AnnotatedLocation::error(span));
        }
        self
    }

    /// Append a sequence of annotated locations, preserving their order.
    pub fn locations(mut self, locations: impl IntoIterator<Item = AnnotatedLocation>) -> Self {
        self.locations.extend(locations);
        self
    }

    /// Finish building. Pure construction; cannot fail.
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            code: self.code,
            title: self.title,
            summary: self.summary,
            detail: self.detail,
            cause: self.cause,
            locations: self.locations,
            internal: self.internal,
        }
    }
}
