//! ARO language front end
//!
//! Lexer, parser and semantic analyzer for ARO (Action-Result-Object), a
//! small event-driven business language whose programs are lists of
//! feature sets made of sentence-like statements.
//!
//! # Example
//!
//! ```
//! let result = arolang::compile(
//!     "(Greet User: User API) {
//!         Extract the <name> from the <request: body>.
//!         Return an <OK: status> with <name>.
//!     }",
//! );
//! assert!(result.is_success());
//! ```

#![doc(html_root_url = "https://docs.rs/arolang")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use frontend::{CompilationResult, CompileConfig, Compiler};
pub use thiserror::Error;

use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "ARO (Action-Result-Object)";

/// Compile source with the default configuration
pub fn compile(source: &str) -> CompilationResult {
    Compiler::new().compile(source)
}

/// Compile source and render the text report
pub fn compile_with_report(source: &str) -> String {
    Compiler::new().compile_with_report(source)
}

/// Analyze source, failing if any error was found
///
/// # Example
///
/// ```
/// let analyzed = arolang::check(
///     "(Users: User API) {
///         Extract the <user> from the <request>.
///         Publish as <current-user> <user>.
///         Return an <OK: status>.
///     }",
/// )?;
/// assert!(analyzed.registry.contains("current-user"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn check(source: &str) -> Result<frontend::semantic::AnalyzedProgram> {
    debug!("checking {} bytes", source.len());
    let analyzed = compile(source)
        .into_result()
        .context("ARO source did not compile")?;
    Ok(analyzed)
}

/// Load a TOML configuration and compile with it
pub fn compile_with_config_toml(
    source: &str,
    config_toml: &str,
) -> Result<CompilationResult> {
    let config = CompileConfig::from_toml_str(config_toml).context("invalid compiler configuration")?;
    Ok(Compiler::with_config(config).compile(source))
}
