//! Long-form explanations behind `asmc explain <code>`.
//!
//! One markdown page per code lives next to this file and is compiled in.
//! A new code needs its `EXXXX.md` page and a row in `DOCS`; the
//! `test_every_code_is_documented` test catches a missing row.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// The markdown page for `code`, if one is embedded.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Codes with an embedded page, in table order.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Input layer
    (ErrorCode::E0001, include_str!("E0001.md")),
    (ErrorCode::E0002, include_str!("E0002.md")),
    (ErrorCode::E0003, include_str!("E0003.md")),
    (ErrorCode::E0004, include_str!("E0004.md")),
    // Diagnostic machinery
    (ErrorCode::E9002, include_str!("E9002.md")),
];
