//! The `explain` command: display documentation for input error codes.

use asm_diagnostic::{ErrorCode, ErrorDocs};

/// Look up the documentation for `code_str`.
pub fn explain_error(code_str: &str) -> Result<&'static str, String> {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        let known: Vec<_> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
        return Err(format!(
            "Unknown error code: {code_str}\n\nKnown codes: {}",
            known.join(", ")
        ));
    };

    ErrorDocs::get(code).ok_or_else(|| format!("No documentation available for {code}"))
}
