//! ARO front end
//!
//! Source text flows through the lexer, the parser and the semantic
//! analyzer; [`Compiler`] drives the stages and collects diagnostics.

pub mod compiler;
pub mod config;
pub mod core;
pub mod report;
pub mod semantic;

pub use compiler::{CompilationPhase, CompilationResult, CompileError, Compiler};
pub use config::{CompileConfig, ConfigError, DiagLevel, WarningConfig};
