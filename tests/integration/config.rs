//! TOML configuration through the public API

use arolang::frontend::{CompileConfig, DiagLevel};
use arolang::{compile_with_config_toml, Compiler};

const NOISY: &str = "(Noisy: Timer Handler) {\n\
                     Make the <unused> with 1.\n\
                     Emit the <Timer: event>.\n\
                     }";

#[test]
fn test_toml_switches_off_warnings() {
    let config = r#"
diag_level = "all"

[warnings]
unused_variables = false
missing_return = false
"#;
    let result = compile_with_config_toml(NOISY, config).expect("valid config");
    assert!(result.is_success());
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_external_categories_from_toml() {
    let config = r#"external_event_categories = ["Cron"]"#;
    let result = compile_with_config_toml(NOISY, config).expect("valid config");
    // `Timer` is no longer external, so the handler loops on itself
    assert_eq!(result.errors().filter(|d| d.code == "E2004").count(), 1);
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = compile_with_config_toml(NOISY, "colour = true").expect_err("unknown field");
    assert!(format!("{:#}", err).contains("invalid compiler configuration"));
}

#[test]
fn test_config_round_trip() {
    let config = CompileConfig {
        diag_level: DiagLevel::Warnings,
        ..CompileConfig::default()
    };
    let text = config.to_toml_string().expect("serializable");
    let parsed = CompileConfig::from_toml_str(&text).expect("parsable");
    assert_eq!(parsed, config);
    assert_eq!(Compiler::with_config(parsed).config().diag_level, DiagLevel::Warnings);
}
