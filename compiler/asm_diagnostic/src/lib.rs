//! Diagnostic system for the assembler input layer.
//!
//! Every failure in the input layer is a sentinel return plus a diagnostic
//! pushed into a [`DiagnosticSink`]. Callers poll state instead of catching
//! faults, so the sink is the only channel through which problems surface.
//!
//! # Proof of reporting
//!
//! [`ErrorGuaranteed`] is only handed out by [`DiagnosticSink::emit_error`]
//! (or recovered from a non-zero error count). A failing operation returns
//! one, so a caller abandoning its work knows the user was already told.
//!
//! ```text
//! fn open(&mut self, name: &str, hint: bool, sink: &mut dyn DiagnosticSink)
//!     -> Result<(), ErrorGuaranteed>;
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod guarantee;
pub mod queue;

pub use errors::ErrorDocs;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSink};
