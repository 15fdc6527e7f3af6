//! Cross-stage properties

use arolang::frontend::core::lexer::{tokenize, TokenKind};
use arolang::{compile, Compiler};
use proptest::prelude::*;
use quickcheck::{quickcheck, TestResult};

/// Statement fragments that are valid inside any feature set body
const FRAGMENTS: [&str; 8] = [
    "Extract the <id> from the <request: parameters>.",
    "Make the <value> with 1.",
    "Compute the <sum> from <value> + 2.",
    "Log \"tick\" to the <console>.",
    "Emit the <Tick: event>.",
    "Publish as <shared-value> <value>.",
    "Return an <OK: status> with <sum>.",
    "Throw a <NotFound: error> for the <id>.",
];

fn program_from(picks: &[u8]) -> String {
    let mut source = String::from("(Generated: Tick Handler) {\n");
    for pick in picks {
        source.push_str(FRAGMENTS[*pick as usize % FRAGMENTS.len()]);
        source.push('\n');
    }
    source.push('}');
    source
}

fn prop_compile_is_idempotent(picks: Vec<u8>) -> TestResult {
    if picks.is_empty() || picks.len() > 24 {
        return TestResult::discard();
    }
    let source = program_from(&picks);
    let first = compile(&source);
    let second = compile(&source);
    TestResult::from_bool(
        first.diagnostics == second.diagnostics
            && first.program == second.program
            && first.failed_phase.is_none(),
    )
}

fn prop_arbitrary_text_never_panics(source: String) -> bool {
    let compiler = Compiler::new();
    let first = compiler.compile(&source);
    let second = compiler.compile(&source);
    first.diagnostics == second.diagnostics && first.is_success() == second.is_success()
}

#[test]
fn test_compile_idempotence() {
    quickcheck(prop_compile_is_idempotent as fn(Vec<u8>) -> TestResult);
}

#[test]
fn test_arbitrary_text() {
    quickcheck(prop_arbitrary_text_never_panics as fn(String) -> bool);
}

#[test]
fn test_raw_and_escaped_paths_agree() {
    let raw = tokenize(r#"'C:\Users\Admin\config.json'"#).expect("raw string");
    let cooked = tokenize(r#""C:\\Users\\Admin\\config.json""#).expect("escaped string");
    assert_eq!(
        raw[0].kind,
        TokenKind::StringLiteral(r"C:\Users\Admin\config.json".to_string())
    );
    assert_eq!(raw[0].kind, cooked[0].kind);
}

#[test]
fn test_handler_without_self_emit_never_cycles() {
    for picks in [vec![0u8, 1, 2, 6], vec![3, 6], vec![1, 5, 7]] {
        let result = compile(&program_from(&picks));
        assert!(result.analyzed_program.cycles.is_empty());
        assert!(result.diagnostics.iter().all(|d| d.code != "E2004"));
    }
    let looping = compile(&program_from(&[4, 6]));
    assert_eq!(looping.analyzed_program.cycles.len(), 1);
}

proptest! {
    #[test]
    fn prop_spans_increase_and_lexemes_echo_source(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "Extract", "the", "<user>", "from", "<request: body>", ".", "42", "3.5",
                "\"text\"", "{", "}", "(", ")", "|>", "==", "+", "true", "where",
            ]),
            1..40,
        )
    ) {
        let source = words.join(" ");
        let tokens = tokenize(&source).expect("fragments always lex");

        let mut previous_end = 0;
        let mut echo = String::new();
        for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
            prop_assert!(token.span.start.offset >= previous_end);
            prop_assert!(token.span.end.offset > token.span.start.offset);
            prop_assert_eq!(&source[token.span.start.offset..token.span.end.offset], token.lexeme.as_str());
            previous_end = token.span.end.offset;
            echo.push_str(&token.lexeme);
        }

        let squeezed: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(echo, squeezed);
    }
}
