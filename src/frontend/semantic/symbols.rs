//! Symbols and persistent symbol tables
//!
//! A `SymbolTable` is immutable: `define`, `update_visibility` and `child`
//! return new tables that share structure with the old one through `Arc`.
//! Exploring a match branch or loop body therefore never needs a rollback.

use crate::util::span::Span;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Scope identifier, unique within one feature set. The root scope is 0.
pub type ScopeId = usize;

/// Who can see a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Local to its feature set
    Internal,
    /// Upgraded by `Publish`; visible to other feature sets
    Published,
    /// Supplied from outside (`Require`, publish aliases)
    External,
}

impl fmt::Display for Visibility {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Visibility::Internal => "internal",
            Visibility::Published => "published",
            Visibility::External => "external",
        })
    }
}

/// Where a symbol's value comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SymbolSource {
    /// Pulled from an object (`Extract the <x> from the <request>`)
    ExtractedFrom(String),
    /// Produced by a local computation
    Computed,
    /// Loop item or index
    Parameter,
    /// `Publish as` alias of an internal name
    AliasOf(String),
}

impl fmt::Display for SymbolSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SymbolSource::ExtractedFrom(from) => write!(f, "extracted(from: {})", from),
            SymbolSource::Computed => f.write_str("computed"),
            SymbolSource::Parameter => f.write_str("parameter"),
            SymbolSource::AliasOf(of) => write!(f, "alias(of: {})", of),
        }
    }
}

/// Type inferred from a result's first specifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DataType {
    Identifier,
    Hash,
    Record,
    Status,
    Boolean,
    Error,
    Custom(String),
    Unresolved,
}

impl DataType {
    /// `<x: id>` is an Identifier, `<x: User>` a custom `User`, `<x>` unresolved
    pub fn from_specifier(specifier: Option<&str>) -> Self {
        let Some(spec) = specifier else {
            return DataType::Unresolved;
        };
        match spec.to_lowercase().as_str() {
            "identifier" | "id" => DataType::Identifier,
            "hash" | "checksum" => DataType::Hash,
            "record" => DataType::Record,
            "status" => DataType::Status,
            "result" => DataType::Boolean,
            "error" => DataType::Error,
            _ => DataType::Custom(spec.to_string()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DataType::Identifier => f.write_str("Identifier"),
            DataType::Hash => f.write_str("Hash"),
            DataType::Record => f.write_str("Record"),
            DataType::Status => f.write_str("Status"),
            DataType::Boolean => f.write_str("Boolean"),
            DataType::Error => f.write_str("Error"),
            DataType::Custom(name) => f.write_str(name),
            DataType::Unresolved => f.write_str("?"),
        }
    }
}

/// A named binding
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Symbol {
    pub name: String,
    pub span: Span,
    pub visibility: Visibility,
    pub source: SymbolSource,
    pub data_type: DataType,
    pub scope: ScopeId,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        span: Span,
        source: SymbolSource,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            span,
            visibility: Visibility::Internal,
            source,
            data_type,
            scope: 0,
        }
    }

    pub fn with_visibility(
        mut self,
        visibility: Visibility,
    ) -> Self {
        self.visibility = visibility;
        self
    }
}

impl fmt::Display for Symbol {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}, {}]",
            self.name, self.data_type, self.visibility, self.source
        )
    }
}

/// Persistent, scoped symbol table
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    scope: ScopeId,
    parent: Option<Arc<SymbolTable>>,
    symbols: Arc<IndexMap<String, Symbol>>,
}

impl SymbolTable {
    /// Empty root table (scope 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scope nested in this one
    pub fn child(
        &self,
        scope: ScopeId,
    ) -> SymbolTable {
        SymbolTable {
            scope,
            parent: Some(Arc::new(self.clone())),
            symbols: Arc::new(IndexMap::new()),
        }
    }

    /// A table with `symbol` bound in this scope. An existing local binding
    /// of the same name is replaced in place.
    pub fn define(
        &self,
        mut symbol: Symbol,
    ) -> SymbolTable {
        symbol.scope = self.scope;
        let mut symbols = (*self.symbols).clone();
        symbols.insert(symbol.name.clone(), symbol);
        SymbolTable {
            scope: self.scope,
            parent: self.parent.clone(),
            symbols: Arc::new(symbols),
        }
    }

    /// A table where the nearest binding of `name` has `visibility`, or
    /// `None` when `name` is not bound anywhere in the chain
    pub fn update_visibility(
        &self,
        name: &str,
        visibility: Visibility,
    ) -> Option<SymbolTable> {
        if let Some(symbol) = self.symbols.get(name) {
            let updated = symbol.clone().with_visibility(visibility);
            return Some(self.define(updated));
        }

        let parent = self.parent.as_ref()?.update_visibility(name, visibility)?;
        Some(SymbolTable {
            scope: self.scope,
            parent: Some(Arc::new(parent)),
            symbols: Arc::clone(&self.symbols),
        })
    }

    /// Nearest binding, walking outwards
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.symbols
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Binding in this scope only
    pub fn lookup_local(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.lookup(name).is_some()
    }

    /// The enclosing table, carrying any visibility updates made through this one
    pub fn parent(&self) -> Option<&SymbolTable> {
        self.parent.as_deref()
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Nesting depth; the root is 0
    pub fn depth(&self) -> usize {
        self.parent.as_ref().map(|p| p.depth() + 1).unwrap_or(0)
    }

    /// Local symbols in definition order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
