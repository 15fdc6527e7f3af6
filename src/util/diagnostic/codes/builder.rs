//! Template-driven diagnostic builder

use super::ErrorCodeDefinition;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;

/// Diagnostic builder with template parameters
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    definition: ErrorCodeDefinition,
    params: Vec<(&'static str, String)>,
    span: Option<Span>,
    hints: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(definition: ErrorCodeDefinition) -> Self {
        Self {
            definition,
            params: Vec::new(),
            span: None,
            hints: Vec::new(),
        }
    }

    /// Add a template parameter
    pub fn param(
        mut self,
        key: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Set the location
    #[inline]
    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        self.span = Some(span);
        self
    }

    /// Append a hint after the code's default hint
    #[inline]
    pub fn hint(
        mut self,
        hint: impl Into<String>,
    ) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Render templates and produce the diagnostic
    pub fn build(self) -> Diagnostic {
        let message = render(self.definition.message_template, &self.params);
        let mut hints = Vec::with_capacity(self.hints.len() + 1);
        if !self.definition.help_template.is_empty() {
            hints.push(render(self.definition.help_template, &self.params));
        }
        hints.extend(self.hints);

        Diagnostic::new(
            self.definition.severity,
            self.definition.code.to_string(),
            message,
            self.span,
            hints,
        )
    }
}

/// Substitute `{key}` placeholders; unknown keys are left verbatim
fn render(
    template: &str,
    params: &[(&'static str, String)],
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        tracing::warn!("missing diagnostic parameter '{}'", key);
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::diagnostic::codes::CANNOT_REBIND_VARIABLE;
    use crate::util::diagnostic::Severity;

    #[test]
    fn test_render_substitutes_all_params() {
        let rendered = render(
            "'{name}' and '{name}' in {place}",
            &[("name", "x".to_string()), ("place", "scope".to_string())],
        );
        assert_eq!(rendered, "'x' and 'x' in scope");
    }

    #[test]
    fn test_render_keeps_unknown_placeholder() {
        assert_eq!(render("value {missing}", &[]), "value {missing}");
        assert_eq!(render("open { brace", &[]), "open { brace");
    }

    #[test]
    fn test_builder_renders_help_first() {
        let diag = CANNOT_REBIND_VARIABLE
            .builder()
            .param("name", "value")
            .hint("extra")
            .build();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, "E2003");
        assert!(diag.message.contains("Cannot rebind variable 'value'"));
        assert_eq!(diag.hints.len(), 2);
        assert!(diag.hints[0].contains("value-updated"));
        assert_eq!(diag.hints[1], "extra");
    }
}
