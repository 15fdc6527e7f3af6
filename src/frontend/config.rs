//! Compiler configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! reserved_prefix = "_"
//! diag_level = "warnings"
//!
//! [warnings]
//! orphaned_events = false
//! ```

use serde::{Deserialize, Serialize};

/// Compile-time options for one `Compiler`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileConfig {
    /// Object nouns that are always in scope (`request`, `env`, ...)
    #[serde(default = "default_builtin_contexts")]
    pub builtin_contexts: Vec<String>,
    /// Handler events triggered by the runtime rather than by an `Emit`
    #[serde(default = "default_external_event_categories")]
    pub external_event_categories: Vec<String>,
    /// Names starting with this prefix may be rebound and are never reported unused
    #[serde(default = "default_reserved_prefix")]
    pub reserved_prefix: String,
    /// Circular event chains enumerated before the search stops
    #[serde(default = "default_max_event_cycles")]
    pub max_event_cycles: usize,
    /// Which diagnostics end up in the compilation result
    #[serde(default)]
    pub diag_level: DiagLevel,
    /// Individual warning switches
    #[serde(default)]
    pub warnings: WarningConfig,
}

fn default_builtin_contexts() -> Vec<String> {
    [
        "request",
        "env",
        "event",
        "context",
        "pathParameters",
        "queryParameters",
        "headers",
        "application",
        "console",
        "framework",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_external_event_categories() -> Vec<String> {
    [
        "Socket Event",
        "File Event",
        "Socket",
        "File",
        "Timer",
        "Application-Start",
        "Application-End",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_reserved_prefix() -> String {
    "_".to_string()
}

fn default_max_event_cycles() -> usize {
    256
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            builtin_contexts: default_builtin_contexts(),
            external_event_categories: default_external_event_categories(),
            reserved_prefix: default_reserved_prefix(),
            max_event_cycles: default_max_event_cycles(),
            diag_level: DiagLevel::default(),
            warnings: WarningConfig::default(),
        }
    }
}

impl CompileConfig {
    /// Parse a TOML document; unknown keys are rejected
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: CompileConfig = toml::from_str(source)?;
        if config.reserved_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "reserved_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if config.max_event_cycles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_event_cycles",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Case-insensitive membership in `builtin_contexts`
    pub fn is_builtin_context(
        &self,
        name: &str,
    ) -> bool {
        self.builtin_contexts
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive membership in `external_event_categories`
    pub fn is_external_event(
        &self,
        event: &str,
    ) -> bool {
        self.external_event_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(event))
    }

    pub fn is_reserved(
        &self,
        name: &str,
    ) -> bool {
        name.starts_with(self.reserved_prefix.as_str())
    }
}

/// Warning switches, all on by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningConfig {
    #[serde(default = "enabled")]
    pub unused_variables: bool,
    #[serde(default = "enabled")]
    pub unreachable_code: bool,
    #[serde(default = "enabled")]
    pub missing_return: bool,
    #[serde(default = "enabled")]
    pub orphaned_events: bool,
    #[serde(default = "enabled")]
    pub duplicate_exports: bool,
}

fn enabled() -> bool {
    true
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            unused_variables: true,
            unreachable_code: true,
            missing_return: true,
            orphaned_events: true,
            duplicate_exports: true,
        }
    }
}

/// Diagnostic filter applied to the compilation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagLevel {
    /// Keep nothing
    None,
    /// Keep errors only
    Errors,
    /// Keep errors and warnings
    Warnings,
    /// Keep everything, notes included
    #[default]
    All,
}

impl DiagLevel {
    /// Whether a diagnostic of `severity` survives this filter
    pub fn keeps(
        &self,
        severity: crate::util::diagnostic::Severity,
    ) -> bool {
        use crate::util::diagnostic::Severity;
        match self {
            DiagLevel::None => false,
            DiagLevel::Errors => severity == Severity::Error,
            DiagLevel::Warnings => severity != Severity::Note,
            DiagLevel::All => true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
