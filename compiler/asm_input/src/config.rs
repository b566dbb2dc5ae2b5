//! Input configuration supplied by the active assembler target.

/// How raw input bytes outside the ASCII range are treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MultibyteHandling {
    /// Pass bytes through without checking them.
    #[default]
    Allow,
    /// Report malformed UTF-8 sequences as warnings.
    Warn,
}

impl MultibyteHandling {
    /// Parse a `--multibyte=` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "allow" => Some(MultibyteHandling::Allow),
            "warn" => Some(MultibyteHandling::Warn),
            _ => None,
        }
    }

    pub fn warns(self) -> bool {
        self == MultibyteHandling::Warn
    }
}

/// Lexical facts about the target language the input layer needs.
///
/// The input layer does not tokenize, but it must recognise a leading
/// comment character to find `#APP` / `#NO_APP` on the first line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InputConfig {
    /// Bytes that start a comment running to end of line.
    pub line_comment_chars: Vec<u8>,
    /// Bytes that end a line. End of input always ends a line too.
    pub end_of_line_chars: Vec<u8>,
    pub multibyte: MultibyteHandling,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            line_comment_chars: b"#".to_vec(),
            end_of_line_chars: b"\n\r".to_vec(),
            multibyte: MultibyteHandling::Allow,
        }
    }
}

impl InputConfig {
    #[must_use]
    pub fn with_line_comment_chars(mut self, chars: impl Into<Vec<u8>>) -> Self {
        self.line_comment_chars = chars.into();
        self
    }

    #[must_use]
    pub fn with_end_of_line_chars(mut self, chars: impl Into<Vec<u8>>) -> Self {
        self.end_of_line_chars = chars.into();
        self
    }

    #[must_use]
    pub fn with_multibyte(mut self, multibyte: MultibyteHandling) -> Self {
        self.multibyte = multibyte;
        self
    }

    /// Whether `byte` opens the first-line directive check.
    ///
    /// When `#` is a comment character only `#` itself triggers; other
    /// comment characters are ordinary content for this purpose. Otherwise
    /// any (non-NUL) comment character triggers.
    pub fn is_comment_trigger(&self, byte: u8) -> bool {
        if memchr::memchr(b'#', &self.line_comment_chars).is_some() {
            byte == b'#'
        } else {
            byte != 0 && memchr::memchr(byte, &self.line_comment_chars).is_some()
        }
    }

    /// End-of-line predicate; `None` is the end of the bytes available.
    pub fn is_end_of_line(&self, byte: Option<u8>) -> bool {
        byte.is_none_or(|b| memchr::memchr(b, &self.end_of_line_chars).is_some())
    }
}
