//! Annotated source locations.
//!
//! A diagnostic points at one or more spans, each tagged with a display
//! role and an optional caption ("defined here", "redefined here", ...).
//! The order of a diagnostic's locations is chosen by the caller and
//! preserved verbatim; by convention the first entry is the primary
//! offending site.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Display role of an annotated location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationRole {
    /// The offending site itself
    Error,
    /// Secondary context shown alongside the error site
    Help,
}

/// A [`Span`] tagged with a role and an optional caption.
///
/// Relabeling a location for a second mention goes through the consuming
/// [`with_role`](AnnotatedLocation::with_role) /
/// [`with_caption`](AnnotatedLocation::with_caption) methods: they take
/// the value, so reusing one resolution under two labels forces an
/// explicit `clone()` instead of mutating a location something else may
/// still hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotatedLocation {
    /// The resolved source location
    pub span: Span,
    /// Display role
    pub role: LocationRole,
    /// Optional caption rendered next to the squiggle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl AnnotatedLocation {
    /// Annotate a span as the error site.
    pub fn error(span: Span) -> Self {
        AnnotatedLocation {
            span,
            role: LocationRole::Error,
            caption: None,
        }
    }

    /// Annotate a span as secondary help context.
    pub fn help(span: Span) -> Self {
        AnnotatedLocation {
            span,
            role: LocationRole::Help,
            caption: None,
        }
    }

    /// Replace the role.
    #[must_use]
    pub fn with_role(mut self, role: LocationRole) -> Self {
        self.role = role;
        self
    }

    /// Replace the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Whether this is the error-role annotation.
    pub fn is_error(&self) -> bool {
        matches!(self.role, LocationRole::Error)
    }
}
