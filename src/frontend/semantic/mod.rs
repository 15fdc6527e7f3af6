//! Semantic analysis
//!
//! - [`analyzer`] - per-feature-set scoping, bindings and data flow
//! - [`symbols`] - persistent symbol tables
//! - [`registry`] - names published across feature sets
//! - [`event_graph`] - handler/emit graph and cycle enumeration
//! - [`checks`] - program-wide passes
//!
//! Analysis never fails: findings are pushed onto the caller's
//! `DiagnosticCollector`.

pub mod analyzer;
pub mod checks;
pub mod data_flow;
pub mod event_graph;
pub mod registry;
pub mod symbols;
pub mod visit;
#[cfg(test)]
mod tests;

pub use analyzer::{AnalyzedFeatureSet, AnalyzedProgram, SemanticAnalyzer};
pub use data_flow::DataFlowInfo;
pub use event_graph::{CycleSearch, EventCycle, EventGraph};
pub use registry::GlobalSymbolRegistry;
pub use symbols::{DataType, ScopeId, Symbol, SymbolSource, SymbolTable, Visibility};
