//! Macros for reporting internal errors.

#[cfg(test)]
mod tests {
    use crate::errors::codes;
    use crate::internal_error;

    #[test]
    fn test_internal_error_macro() {
        let diag = internal_error!("rule table entry missing after registration");

        assert_eq!(diag.code, codes::INTERNAL_INVARIANT);
        assert!(diag.is_internal());
        assert!(diag.summary.contains("rule table entry missing"));
        assert!(diag.summary.contains(file!()));
        // Line number is included but varies depending on where macro is called
        assert!(diag.summary.contains(':'));
    }

    #[test]
    fn test_macro_with_format() {
        let pass = "lowering";
        let diag = internal_error!(format!("pass {} ran twice", pass));

        assert!(diag.summary.contains("pass lowering ran twice"));
    }

    #[test]
    fn test_macro_carries_bug_report_detail() {
        let diag = internal_error!("unreachable state");

        assert_eq!(diag.detail.as_deref(), Some(crate::recover::REPORT_THIS_BUG));
        assert!(diag.locations.is_empty());
    }
}

/// Report a violated internal invariant with automatic file and line
/// information.
///
/// For sites that have an AST node at hand,
/// [`errors::invariant_violated`](crate::errors::invariant_violated)
/// produces a source location instead; this macro stamps in the
/// reporting site in the tool's own code.
///
/// # Example
///
/// ```
/// use sable_error_reporting::internal_error;
///
/// let diag = internal_error!("the type of a rule value was not set");
/// assert!(diag.is_internal());
/// assert!(diag.summary.contains("was not set"));
/// assert!(diag.summary.contains(file!()));
/// ```
#[macro_export]
macro_rules! internal_error {
    ($message:expr) => {
        $crate::errors::invariant_violated_at($message, file!(), line!())
    };
}
