//! Command-line options shared by the `cat` and `sniff` commands.

use asm_diagnostic::emitter::ColorMode;
use asm_diagnostic::DiagnosticConfig;
use asm_input::{InputConfig, MultibyteHandling};

/// Options controlling how input files are opened and reported on.
#[derive(Clone, Debug)]
pub struct InputOptions {
    /// Preprocess hint passed to every `open`; a directive may override it.
    pub preprocess: bool,
    pub config: InputConfig,
    pub color: ColorMode,
    pub diagnostics: DiagnosticConfig,
    /// Names as given on the command line; `-` is standard input.
    pub files: Vec<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        InputOptions {
            preprocess: true,
            config: InputConfig::default(),
            color: ColorMode::Auto,
            diagnostics: DiagnosticConfig::default(),
            files: Vec::new(),
        }
    }
}

impl InputOptions {
    /// Name to hand to `InputFile::open`: `-` becomes the empty name.
    pub fn open_name(file: &str) -> &str {
        if file == "-" {
            ""
        } else {
            file
        }
    }
}

/// Parse the arguments following the subcommand name.
///
/// Flags and file names may be interleaved. A lone `-` is a file name
/// (standard input); `--` ends flag parsing.
pub fn parse_input_options(args: &[String]) -> Result<InputOptions, String> {
    let mut options = InputOptions::default();
    let mut only_files = false;

    for arg in args {
        if only_files || arg == "-" || !arg.starts_with('-') {
            options.files.push(arg.clone());
        } else if arg == "--" {
            only_files = true;
        } else if arg == "--preprocess" {
            options.preprocess = true;
        } else if arg == "--no-preprocess" {
            options.preprocess = false;
        } else if let Some(chars) = arg.strip_prefix("--comment-chars=") {
            options.config.line_comment_chars = chars.as_bytes().to_vec();
        } else if let Some(value) = arg.strip_prefix("--multibyte=") {
            options.config.multibyte = MultibyteHandling::parse(value)
                .ok_or_else(|| format!("invalid --multibyte value '{value}' (expected allow or warn)"))?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color = ColorMode::parse(value).ok_or_else(|| {
                format!("invalid --color value '{value}' (expected auto, always or never)")
            })?;
        } else if let Some(value) = arg.strip_prefix("--error-limit=") {
            options.diagnostics.error_limit = value
                .parse()
                .map_err(|_| format!("invalid --error-limit value '{value}'"))?;
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    if options.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(options)
}
