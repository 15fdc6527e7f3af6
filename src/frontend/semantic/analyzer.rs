//! Semantic analyzer
//!
//! Walks the AST once per feature set, building persistent symbol tables
//! and data-flow records, then runs the program-wide checks. Analysis is
//! total: every finding becomes a diagnostic and an `AnalyzedProgram` is
//! always produced.

use super::checks::{self, PublishConflict};
use super::data_flow::DataFlowInfo;
use super::event_graph::{EventCycle, EventGraph};
use super::registry::GlobalSymbolRegistry;
use super::symbols::*;
use super::visit;
use crate::frontend::config::CompileConfig;
use crate::frontend::core::lexer::tokens::Preposition;
use crate::frontend::core::parser::ast::*;
use crate::util::diagnostic::{DiagnosticCollector, ErrorCodeDefinition};
use crate::util::span::Span;
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::debug;

/// Analysis result for one feature set
#[derive(Debug, Clone)]
pub struct AnalyzedFeatureSet {
    pub feature_set: FeatureSet,
    /// Root scope
    pub symbol_table: SymbolTable,
    /// Match-branch and loop scopes, in creation order
    pub child_scopes: Vec<SymbolTable>,
    /// One record per statement, pre-order
    pub data_flows: Vec<DataFlowInfo>,
    /// Objects the feature set pulls from outside
    pub dependencies: IndexSet<String>,
    /// Names made visible to other feature sets
    pub exports: IndexSet<String>,
    pub emitted_events: IndexSet<String>,
}

impl AnalyzedFeatureSet {
    pub fn name(&self) -> &str {
        &self.feature_set.name
    }

    /// Root and child scopes
    pub fn scopes(&self) -> impl Iterator<Item = &SymbolTable> {
        std::iter::once(&self.symbol_table).chain(self.child_scopes.iter())
    }

    /// A symbol from any scope of this feature set
    pub fn find_symbol(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.scopes().find_map(|scope| scope.lookup_local(name))
    }
}

/// Analysis result for a whole program
#[derive(Debug, Clone, Default)]
pub struct AnalyzedProgram {
    pub feature_sets: Vec<AnalyzedFeatureSet>,
    pub registry: GlobalSymbolRegistry,
    pub event_graph: EventGraph,
    pub cycles: Vec<EventCycle>,
    /// More cycles exist than `max_event_cycles` allowed to enumerate
    pub cycles_truncated: bool,
}

impl AnalyzedProgram {
    pub fn feature_set(
        &self,
        name: &str,
    ) -> Option<&AnalyzedFeatureSet> {
        self.feature_sets.iter().find(|fs| fs.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.feature_sets.is_empty()
    }
}

/// Semantic analyzer
#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    config: CompileConfig,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Analyze `program`, appending every finding to `diagnostics`
    pub fn analyze(
        &self,
        program: &Program,
        diagnostics: &mut DiagnosticCollector,
    ) -> AnalyzedProgram {
        let warnings = self.config.warnings;
        let mut registry = GlobalSymbolRegistry::new();
        let mut conflicts: Vec<PublishConflict> = Vec::new();

        checks::check_duplicate_feature_sets(program, diagnostics);

        let mut feature_sets = Vec::with_capacity(program.feature_sets.len());
        for feature_set in &program.feature_sets {
            let analyzed = FeatureSetAnalyzer::new(
                &self.config,
                feature_set,
                &mut registry,
                &mut conflicts,
                &mut *diagnostics,
            )
            .run();
            debug!(
                "analyzed '{}': {} symbols, {} child scopes, {} data flows",
                analyzed.name(),
                analyzed.symbol_table.len(),
                analyzed.child_scopes.len(),
                analyzed.data_flows.len()
            );
            feature_sets.push(analyzed);
        }

        if warnings.unreachable_code {
            checks::check_unreachable_code(program, diagnostics);
        }
        if warnings.missing_return {
            checks::check_missing_return(program, diagnostics);
        }
        if warnings.orphaned_events {
            checks::check_orphaned_events(program, diagnostics);
        }

        let event_graph = checks::build_event_graph(program, &self.config);
        let search = event_graph.find_cycles_bounded(self.config.max_event_cycles);
        checks::report_cycles(program, &search, diagnostics);

        if warnings.duplicate_exports {
            checks::report_duplicate_exports(&conflicts, diagnostics);
        }

        AnalyzedProgram {
            feature_sets,
            registry,
            event_graph,
            cycles: search.cycles,
            cycles_truncated: search.truncated,
        }
    }
}

/// Per-feature-set analysis state
struct FeatureSetAnalyzer<'a> {
    config: &'a CompileConfig,
    feature_set: &'a FeatureSet,
    registry: &'a mut GlobalSymbolRegistry,
    conflicts: &'a mut Vec<PublishConflict>,
    diagnostics: &'a mut DiagnosticCollector,
    table: SymbolTable,
    next_scope: ScopeId,
    child_scopes: Vec<SymbolTable>,
    consumed: HashSet<(ScopeId, String)>,
    data_flows: Vec<DataFlowInfo>,
    dependencies: IndexSet<String>,
    exports: IndexSet<String>,
    emitted_events: IndexSet<String>,
}

impl<'a> FeatureSetAnalyzer<'a> {
    fn new(
        config: &'a CompileConfig,
        feature_set: &'a FeatureSet,
        registry: &'a mut GlobalSymbolRegistry,
        conflicts: &'a mut Vec<PublishConflict>,
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        Self {
            config,
            feature_set,
            registry,
            conflicts,
            diagnostics,
            table: SymbolTable::new(),
            next_scope: 1,
            child_scopes: Vec::new(),
            consumed: HashSet::new(),
            data_flows: Vec::new(),
            dependencies: IndexSet::new(),
            exports: IndexSet::new(),
            emitted_events: IndexSet::new(),
        }
    }

    fn run(mut self) -> AnalyzedFeatureSet {
        let feature_set = self.feature_set;
        self.analyze_block(&feature_set.statements);

        if self.config.warnings.unused_variables {
            self.report_unused();
        }

        AnalyzedFeatureSet {
            feature_set: self.feature_set.clone(),
            symbol_table: self.table,
            child_scopes: self.child_scopes,
            data_flows: self.data_flows,
            dependencies: self.dependencies,
            exports: self.exports,
            emitted_events: self.emitted_events,
        }
    }

    fn analyze_block(
        &mut self,
        statements: &[Statement],
    ) {
        for statement in statements {
            self.analyze_statement(statement);
        }
    }

    fn analyze_statement(
        &mut self,
        statement: &Statement,
    ) {
        match statement {
            Statement::Aro(aro) => {
                let flow = self.analyze_aro(aro, None);
                self.data_flows.push(flow);
            }
            Statement::Publish(publish) => self.analyze_publish(publish),
            Statement::Require(require) => self.analyze_require(require),
            Statement::Match(m) => self.analyze_match(m),
            Statement::ForEach(f) => self.analyze_for_each(f),
            Statement::Pipeline(pipeline) => self.analyze_pipeline(pipeline),
        }
    }

    // =========================================================================
    // ARO statements
    // =========================================================================

    /// `piped` is the previous pipeline stage's result
    fn analyze_aro(
        &mut self,
        aro: &AroStatement,
        piped: Option<&str>,
    ) -> DataFlowInfo {
        let mut flow = DataFlowInfo::new(aro.label(), aro.span);

        if let Some(previous) = piped {
            self.consume(previous, &mut flow);
            flow.effect("pipeline");
        }
        if let Some(value) = &aro.value {
            self.check_expression(value, &mut flow);
        }
        if let Some(guard) = &aro.guard {
            self.check_expression(guard, &mut flow);
        }

        match aro.action.role {
            ActionRole::Request => {
                let mut source = None;
                if let Some(object) = &aro.object {
                    let base = object.noun.base.as_str();
                    if !self.consume(base, &mut flow) {
                        flow.input(base);
                        if !self.config.is_builtin_context(base) {
                            self.dependencies.insert(base.to_string());
                        }
                    }
                    source = Some(SymbolSource::ExtractedFrom(base.to_string()));
                }
                if let Some(result) = &aro.result {
                    self.bind(result, source.unwrap_or(SymbolSource::Computed), &mut flow);
                }
            }
            ActionRole::Own => {
                if let Some(object) = &aro.object {
                    self.consume_object(object, &mut flow);
                }
                if let Some(result) = &aro.result {
                    self.bind(result, SymbolSource::Computed, &mut flow);
                }
            }
            ActionRole::Response => {
                if let Some(result) = &aro.result {
                    self.consume(&result.base, &mut flow);
                }
                if let Some(object) = &aro.object {
                    self.consume_object(object, &mut flow);
                }
                if let Some(event) = visit::emitted_event(aro) {
                    flow.effect(format!("emit:{}", event));
                    self.emitted_events.insert(event.to_string());
                }
            }
            ActionRole::Export => {
                if let Some(object) = &aro.object {
                    self.consume_object(object, &mut flow);
                }
                if let Some(result) = &aro.result {
                    self.export(result, &mut flow);
                }
            }
        }

        flow
    }

    /// Export-role ARO form: the result must already be bound
    fn export(
        &mut self,
        noun: &QualifiedNoun,
        flow: &mut DataFlowInfo,
    ) {
        let name = noun.base.as_str();
        let Some(updated) = self.table.update_visibility(name, Visibility::Published) else {
            self.diagnostics
                .push(ErrorCodeDefinition::undefined_variable(name).at(noun.span).build());
            return;
        };
        self.table = updated;
        self.consume(name, flow);

        if let Some(symbol) = self.table.lookup(name).cloned() {
            self.register(name, symbol, noun.span);
        }
        self.exports.insert(name.to_string());
        flow.effect(format!("export:{}", name));
    }

    fn analyze_pipeline(
        &mut self,
        pipeline: &PipelineStatement,
    ) {
        let mut previous: Option<&str> = None;
        for stage in &pipeline.stages {
            let mut flow = self.analyze_aro(stage, previous);
            if previous.is_none() {
                flow.effect("pipeline");
            }
            self.data_flows.push(flow);
            previous = stage.result.as_ref().map(|r| r.base.as_str());
        }
    }

    // =========================================================================
    // Publish / Require
    // =========================================================================

    fn analyze_publish(
        &mut self,
        publish: &PublishStatement,
    ) {
        let mut flow = DataFlowInfo::new(
            format!("Publish as <{}> <{}>", publish.alias, publish.variable),
            publish.span,
        );
        let internal = publish.variable.base.as_str();
        let alias = publish.alias.base.as_str();

        match self.table.update_visibility(internal, Visibility::Published) {
            Some(updated) => {
                self.table = updated;
                self.consume(internal, &mut flow);

                let data_type = self
                    .table
                    .lookup(internal)
                    .map(|s| s.data_type.clone())
                    .unwrap_or(DataType::Unresolved);
                let symbol = Symbol::new(
                    alias,
                    publish.alias.span,
                    SymbolSource::AliasOf(internal.to_string()),
                    data_type,
                )
                .with_visibility(Visibility::External);

                if self.define(symbol.clone(), publish.alias.span) {
                    flow.output(alias);
                    self.register(alias, symbol, publish.alias.span);
                }
                self.exports.insert(alias.to_string());
            }
            None => {
                self.diagnostics.push(
                    ErrorCodeDefinition::undefined_variable(internal)
                        .at(publish.variable.span)
                        .hint(format!("Bind '{}' before publishing it", internal))
                        .build(),
                );
            }
        }

        flow.effect(format!("publish:{}", alias));
        self.data_flows.push(flow);
    }

    fn analyze_require(
        &mut self,
        require: &RequireStatement,
    ) {
        let name = require.variable.base.as_str();
        let source = require.source.clone().unwrap_or_else(|| "framework".to_string());
        let mut flow = DataFlowInfo::new(format!("Require <{}>", require.variable), require.span);

        let symbol = Symbol::new(
            name,
            require.variable.span,
            SymbolSource::ExtractedFrom(source),
            DataType::from_specifier(require.variable.type_specifier()),
        )
        .with_visibility(Visibility::External);

        if self.define(symbol, require.variable.span) {
            flow.output(name);
        }
        self.dependencies.insert(name.to_string());
        flow.effect(format!("require:{}", name));
        self.data_flows.push(flow);
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn analyze_match(
        &mut self,
        m: &MatchStatement,
    ) {
        let mut flow = DataFlowInfo::new("match", m.span);
        self.check_expression(&m.subject, &mut flow);
        self.data_flows.push(flow);

        for case in &m.cases {
            if let Literal::Regex { pattern, flags } = &case.pattern {
                self.check_regex(pattern, flags, case.span);
            }
            self.in_child_scope(|this| this.analyze_block(&case.body));
        }
        if let Some(otherwise) = &m.otherwise {
            self.in_child_scope(|this| this.analyze_block(otherwise));
        }
    }

    fn analyze_for_each(
        &mut self,
        f: &ForEachStatement,
    ) {
        let mut flow = DataFlowInfo::new(f.label(), f.span);
        self.check_expression(&f.collection, &mut flow);
        if f.parallel {
            flow.effect("parallel");
        }
        flow.output(f.item.value.as_str());
        if let Some(index) = &f.index {
            flow.output(index.value.as_str());
        }

        let flow_index = self.data_flows.len();
        self.data_flows.push(flow);

        self.in_child_scope(|this| {
            let item = Symbol::new(
                f.item.value.as_str(),
                f.item.span,
                SymbolSource::Parameter,
                DataType::Unresolved,
            );
            this.define(item, f.item.span);
            if let Some(index) = &f.index {
                let index = Symbol::new(
                    index.value.as_str(),
                    index.span,
                    SymbolSource::Parameter,
                    DataType::Unresolved,
                );
                let span = index.span;
                this.define(index, span);
            }

            if let Some(filter) = &f.filter {
                let mut filter_flow = DataFlowInfo::new("where", filter.span());
                this.check_expression(filter, &mut filter_flow);
                if let Some(loop_flow) = this.data_flows.get_mut(flow_index) {
                    loop_flow.inputs.extend(filter_flow.inputs);
                }
            }

            this.analyze_block(&f.body);
        });
    }

    /// Run `body` in a fresh child scope. Bindings made inside stay there;
    /// visibility updates to outer symbols are carried back out.
    fn in_child_scope(
        &mut self,
        body: impl FnOnce(&mut Self),
    ) {
        let scope = self.next_scope;
        self.next_scope += 1;
        self.table = self.table.child(scope);

        body(self);

        let child = std::mem::take(&mut self.table);
        self.table = child.parent().cloned().unwrap_or_default();
        self.child_scopes.push(child);
    }

    fn check_regex(
        &mut self,
        pattern: &str,
        flags: &str,
        span: Span,
    ) {
        let mut builder = regex::RegexBuilder::new(pattern);
        builder
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .ignore_whitespace(flags.contains('x'));

        if let Err(err) = builder.build() {
            let reason = err.to_string();
            let reason = reason.lines().last().unwrap_or("invalid pattern").trim();
            self.diagnostics.push(
                ErrorCodeDefinition::invalid_regex(pattern, reason)
                    .at(span)
                    .build(),
            );
        }
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Bind an ARO result in the current scope
    fn bind(
        &mut self,
        noun: &QualifiedNoun,
        source: SymbolSource,
        flow: &mut DataFlowInfo,
    ) {
        let symbol = Symbol::new(
            noun.base.as_str(),
            noun.span,
            source,
            DataType::from_specifier(noun.type_specifier()),
        );
        if self.define(symbol, noun.span) {
            flow.output(noun.base.as_str());
        }
    }

    /// Define `symbol` unless the name is already bound in this scope.
    /// Reserved names rebind freely. Returns whether it was defined.
    fn define(
        &mut self,
        symbol: Symbol,
        span: Span,
    ) -> bool {
        let reserved = self.config.is_reserved(&symbol.name);
        if !reserved && self.table.lookup_local(&symbol.name).is_some() {
            self.diagnostics
                .push(ErrorCodeDefinition::cannot_rebind(&symbol.name).at(span).build());
            return false;
        }
        self.table = self.table.define(symbol);
        true
    }

    /// Mark `name` used if it resolves. Returns whether it resolved.
    fn consume(
        &mut self,
        name: &str,
        flow: &mut DataFlowInfo,
    ) -> bool {
        match self.table.lookup(name) {
            Some(symbol) => {
                self.consumed.insert((symbol.scope, name.to_string()));
                flow.input(name);
                true
            }
            None => false,
        }
    }

    /// Variables in an expression must resolve or be built-in contexts
    fn check_expression(
        &mut self,
        expr: &Expression,
        flow: &mut DataFlowInfo,
    ) {
        let mut nouns = Vec::new();
        visit::expression_variables(expr, &mut nouns);

        for noun in nouns {
            self.resolve(noun, flow);
        }
    }

    /// A `with` operand is a value and must resolve. Other object nouns
    /// name external resources (repositories, sinks) and are only consumed
    /// when they happen to be bound.
    fn consume_object(
        &mut self,
        object: &ObjectClause,
        flow: &mut DataFlowInfo,
    ) {
        if object.preposition == Preposition::With {
            self.resolve(&object.noun, flow);
        } else {
            self.consume(&object.noun.base, flow);
        }
    }

    /// Consume `noun`, or report it as undefined unless it is a built-in context
    fn resolve(
        &mut self,
        noun: &QualifiedNoun,
        flow: &mut DataFlowInfo,
    ) {
        let name = noun.base.as_str();
        if self.consume(name, flow) {
            return;
        }
        if self.config.is_builtin_context(name) {
            flow.input(name);
            return;
        }
        self.diagnostics
            .push(ErrorCodeDefinition::undefined_variable(name).at(noun.span).build());
    }

    fn register(
        &mut self,
        name: &str,
        symbol: Symbol,
        span: Span,
    ) {
        if let Err(first) = self.registry.register(name, &self.feature_set.name, symbol) {
            self.conflicts.push(PublishConflict {
                name: name.to_string(),
                first,
                second: self.feature_set.name.clone(),
                span,
            });
        }
    }

    // =========================================================================
    // Unused variables
    // =========================================================================

    fn report_unused(&mut self) {
        let mut unused: Vec<(String, Span)> = std::iter::once(&self.table)
            .chain(self.child_scopes.iter())
            .flat_map(|scope| scope.symbols())
            .filter(|symbol| {
                symbol.visibility == Visibility::Internal
                    && symbol.source != SymbolSource::Parameter
                    && !self.config.is_reserved(&symbol.name)
                    && !self.consumed.contains(&(symbol.scope, symbol.name.clone()))
            })
            .map(|symbol| (symbol.name.clone(), symbol.span))
            .collect();
        unused.sort_by_key(|(_, span)| span.start.offset);

        for (name, span) in unused {
            self.diagnostics
                .push(ErrorCodeDefinition::unused_variable(&name).at(span).build());
        }
    }
}
