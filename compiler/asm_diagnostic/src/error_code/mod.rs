//! Stable identifiers for every diagnostic the input layer can produce.

use std::fmt;

/// `E0xxx` codes come from reading sources, `E9xxx` from the diagnostic
/// machinery itself. Each has a page under `errors/` for `asmc explain`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Source could not be opened for reading
    E0001,
    /// Read from an open source failed
    E0002,
    /// Closing an exhausted source failed
    E0003,
    /// Malformed multibyte sequence in source
    E0004,

    /// Error limit reached; later errors were dropped
    E9002,
}

impl ErrorCode {
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E9002 => "E9002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `e0002` parses as [`ErrorCode::E0002`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
