//! Unified error interface.
//!
//! Every error enum in the workspace implements [`ErrorCode`] on top of its
//! `thiserror` Display impl, so callers can branch on a stable machine code
//! instead of matching display strings, and retry logic can ask whether an
//! error is worth retrying at all.

/// Stable, machine-readable error classification.
///
/// # Code format
///
/// - UPPER_SNAKE_CASE, prefixed with the owning domain
///   (e.g. `"EVENT_TRIGGER_ABORTED"`, `"SERVICE_UNKNOWN"`).
/// - Treated as API contract: once published, a code does not change.
///
/// # Recoverability
///
/// `is_recoverable()` answers "could retrying or corrective action help?".
/// Unknown service names and alias cycles are configuration bugs (`false`);
/// a listener that failed on transient state may well succeed next run
/// (`true`).
pub trait ErrorCode {
    /// Returns the machine-readable code for this error value.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying or corrective action may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error's code follows workspace conventions.
///
/// Checks the code is non-empty, UPPER_SNAKE_CASE, and carries the expected
/// domain prefix. Intended for use in tests covering every variant of an
/// error enum.
///
/// # Panics
///
/// Panics with a descriptive message on any violation.
pub fn assert_error_code<E: ErrorCode>(err: &E, prefix: &str) {
    let code = err.code();
    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(prefix),
        "error code '{code}' must start with '{prefix}'"
    );
    assert!(
        is_upper_snake(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// [`assert_error_code`] over a slice of variants.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], prefix: &str) {
    for err in errors {
        assert_error_code(err, prefix);
    }
}

fn is_upper_snake(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
