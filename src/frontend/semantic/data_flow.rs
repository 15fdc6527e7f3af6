//! Per-statement data flow

use crate::util::span::Span;
use indexmap::IndexSet;
use std::fmt;

/// Names a statement reads and writes, plus its side-effect tags
/// (`emit:<Event>`, `parallel`, `publish:<alias>`, `export:<name>`,
/// `require:<name>`, `pipeline`)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DataFlowInfo {
    pub label: String,
    pub span: Span,
    pub inputs: IndexSet<String>,
    pub outputs: IndexSet<String>,
    pub side_effects: IndexSet<String>,
}

impl DataFlowInfo {
    pub fn new(
        label: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            label: label.into(),
            span,
            inputs: IndexSet::new(),
            outputs: IndexSet::new(),
            side_effects: IndexSet::new(),
        }
    }

    #[inline]
    pub fn input(
        &mut self,
        name: impl Into<String>,
    ) {
        self.inputs.insert(name.into());
    }

    #[inline]
    pub fn output(
        &mut self,
        name: impl Into<String>,
    ) {
        self.outputs.insert(name.into());
    }

    #[inline]
    pub fn effect(
        &mut self,
        tag: impl Into<String>,
    ) {
        self.side_effects.insert(tag.into());
    }

    pub fn has_effect(
        &self,
        tag: &str,
    ) -> bool {
        self.side_effects.contains(tag)
    }
}

fn join(set: &IndexSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for DataFlowInfo {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}: in [{}] out [{}]",
            self.label,
            join(&self.inputs),
            join(&self.outputs)
        )?;
        if !self.side_effects.is_empty() {
            write!(f, " effects [{}]", join(&self.side_effects))?;
        }
        Ok(())
    }
}
