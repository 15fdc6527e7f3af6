//! Diagnostic output

pub mod json;
pub mod text;

pub use json::JsonEmitter;
pub use text::{severity_label, DiagnosticEmitter, EmitterConfig, TextEmitter};
