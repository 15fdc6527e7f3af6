//! Unified diagnostic system
//!
//! # Module layout
//!
//! - [`error`] - `Diagnostic` and `Severity`
//! - [`codes`] - code registry and `DiagnosticBuilder`
//! - [`collect`] - per-compile `DiagnosticCollector`
//! - [`emitter`] - text and JSON renderers
//!
//! # Example
//!
//! ```
//! use arolang::util::diagnostic::{ErrorCodeDefinition, TextEmitter};
//!
//! let diagnostic = ErrorCodeDefinition::cannot_rebind("value").build();
//! let text = TextEmitter::new().render(&diagnostic);
//! assert!(text.contains("value-updated"));
//! ```

pub mod codes;
pub mod collect;
pub mod emitter;
pub mod error;

pub use codes::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
pub use collect::{DiagnosticCollector, ToDiagnostic};
pub use emitter::{EmitterConfig, JsonEmitter, TextEmitter};
pub use error::{Diagnostic, Severity};
