//! Plain-text diagnostic renderer

use crate::util::diagnostic::Diagnostic;
use crate::util::diagnostic::Severity;
use crate::util::span::SourceFile;

/// Renderer settings
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Wrap severity and code in ANSI colors
    pub use_colors: bool,
    /// Print the source snippet under the header
    pub show_source: bool,
    /// Print `help:` lines
    pub show_help: bool,
    /// Print line numbers in the gutter
    pub show_line_numbers: bool,
    /// Underline character
    pub indicator: char,
    /// Maximum snippet lines
    pub max_lines: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: false,
            show_source: true,
            show_help: true,
            show_line_numbers: true,
            indicator: '^',
            max_lines: 6,
        }
    }
}

/// Renderer trait shared by the emitters
pub trait DiagnosticEmitter {
    fn emit(
        &self,
        diagnostic: &Diagnostic,
    ) -> String;
}

/// Text renderer
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
        }
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render a diagnostic without source context
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render_with_source(diagnostic, None)
    }

    /// Render a diagnostic against its source file
    pub fn render_with_source(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&self.render_header(diagnostic));
        output.push_str(&self.render_location(diagnostic, source_file));

        if self.config.show_source {
            if let Some(snippet) = self.render_source_snippet(diagnostic, source_file) {
                output.push_str(&snippet);
            }
        }

        if self.config.show_help {
            for hint in &diagnostic.hints {
                output.push_str(&self.color("help", "help"));
                output.push_str(": ");
                output.push_str(hint);
                output.push('\n');
            }
        }

        output
    }

    /// Render every diagnostic, separated by blank lines
    pub fn render_all(
        &self,
        diagnostics: &[Diagnostic],
        source_file: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .iter()
            .map(|d| self.render_with_source(d, source_file))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = diagnostic.severity.to_string();
        format!(
            "{}[{}]: {}\n",
            self.color(&severity, &severity),
            self.color("bold", &diagnostic.code),
            diagnostic.message
        )
    }

    fn render_location(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        match &diagnostic.location {
            Some(span) if !span.is_dummy() => {
                let file_name = source_file
                    .map(|sf| sf.name.as_str())
                    .unwrap_or("<source>");
                format!(
                    " --> {}:{}:{}\n",
                    file_name, span.start.line, span.start.column
                )
            }
            _ => String::new(),
        }
    }

    fn render_source_snippet(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> Option<String> {
        let span = diagnostic.location.as_ref()?;
        if span.is_dummy() {
            return None;
        }
        let source_file = source_file?;

        let start_line = span.start.line;
        let end_line = span.end.line.max(start_line);
        let lines_to_show = (end_line - start_line + 1).min(self.config.max_lines);
        let mut output = String::new();

        for i in 0..lines_to_show {
            let line_num = start_line + i;
            let Some(line) = source_file.line(line_num) else {
                break;
            };
            if self.config.show_line_numbers {
                output.push_str(&format!("{:>4} | ", line_num));
            } else {
                output.push_str("     | ");
            }
            output.push_str(line);
            output.push('\n');

            if i == 0 {
                let spaces = " ".repeat(span.start.column.saturating_sub(1));
                let indicator_len = if start_line == end_line {
                    span.end.column.saturating_sub(span.start.column).max(1)
                } else {
                    line.chars()
                        .count()
                        .saturating_sub(span.start.column - 1)
                        .max(1)
                };
                let indicators = self.config.indicator.to_string().repeat(indicator_len);
                output.push_str(&format!("     | {}{}\n", spaces, indicators));
            }
        }

        Some(output)
    }

    fn color(
        &self,
        style: &str,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }

        match style {
            "error" => format!("\x1b[31m{}\x1b[0m", text),
            "warning" => format!("\x1b[33m{}\x1b[0m", text),
            "note" => format!("\x1b[34m{}\x1b[0m", text),
            "help" => format!("\x1b[36m{}\x1b[0m", text),
            "bold" => format!("\x1b[1m{}\x1b[0m", text),
            _ => text.to_string(),
        }
    }
}

impl DiagnosticEmitter for TextEmitter {
    fn emit(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render(diagnostic)
    }
}

/// Short severity label used by one-line listings
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
        Severity::Note => "NOTE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::diagnostic::codes::ErrorCodeDefinition;
    use crate::util::span::{Position, Span};

    #[test]
    fn test_render_header_and_help() {
        let diagnostic = ErrorCodeDefinition::cannot_rebind("value").build();
        let output = TextEmitter::new().render(&diagnostic);

        assert!(output.starts_with("error[E2003]: Cannot rebind variable 'value'"));
        assert!(output.contains("help: Create a new variable instead, e.g. 'value-updated'"));
    }

    #[test]
    fn test_render_snippet_with_carets() {
        let source = SourceFile::new("orders.aro", "(A: B) {\n    Make the <value> with 1.\n}");
        let span = Span::new(
            Position::with_offset(2, 14, 22),
            Position::with_offset(2, 21, 29),
        );
        let diagnostic = ErrorCodeDefinition::unused_variable("value")
            .at(span)
            .build();
        let output = TextEmitter::new().render_with_source(&diagnostic, Some(&source));

        assert!(output.contains(" --> orders.aro:2:14"), "{}", output);
        assert!(output.contains("   2 |     Make the <value> with 1."), "{}", output);
        assert!(output.contains(&format!("     | {}^^^^^^^", " ".repeat(13))), "{}", output);
    }

    #[test]
    fn test_colors_disabled_by_default() {
        let diagnostic = ErrorCodeDefinition::orphaned_event("Ping").build();
        let plain = TextEmitter::new().render(&diagnostic);
        assert!(!plain.contains("\x1b["));

        let colored = TextEmitter::with_config(EmitterConfig {
            use_colors: true,
            ..Default::default()
        })
        .render(&diagnostic);
        assert!(colored.contains("\x1b[33mwarning\x1b[0m"));
    }
}
