use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_builder() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("can't open missing.s for reading: No such file or directory")
        .with_file("missing.s");

    assert!(diag.is_error());
    assert!(!diag.is_warning());
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.file.as_deref(), Some("missing.s"));
}

#[test]
fn test_warning_builder() {
    let diag = Diagnostic::warning(ErrorCode::E0003).with_message("can't close a.s");
    assert!(diag.is_warning());
    assert!(!diag.is_error());
    assert_eq!(diag.severity, Severity::Warning);
}

#[test]
fn test_severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Note.to_string(), "note");
}

#[test]
fn test_display_with_file_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E0002)
        .with_message("can't read from a.s: Input/output error")
        .with_file("a.s")
        .with_note("bytes read before the failure are still delivered");

    assert_eq!(
        diag.to_string(),
        "a.s: error [E0002]: can't read from a.s: Input/output error\n  \
         = note: bytes read before the failure are still delivered"
    );
}

#[test]
fn test_display_without_file() {
    let diag = Diagnostic::warning(ErrorCode::E0004).with_message("invalid UTF-8 sequence");
    assert_eq!(diag.to_string(), "warning [E0004]: invalid UTF-8 sequence");
}
