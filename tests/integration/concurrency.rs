//! Independent compiles share no state

use arolang::util::logger::{self, LogLevel};
use arolang::Compiler;
use std::thread;

const SOURCES: [&str; 3] = [
    "(Ping: Pong Handler) {\nEmit the <Ping: event>.\nReturn an <OK: status>.\n}\n\
     (Pong: Ping Handler) {\nEmit the <Pong: event>.\nReturn an <OK: status>.\n}",
    "(Shared: A) {\nMake the <x> with 1.\nPublish as <value> <x>.\nReturn an <OK: status>.\n}",
    "(Shared: B) {\nMake the <y> with 2.\nPublish as <value> <y>.\nReturn an <OK: status>.\n}",
];

#[test]
fn test_threads_see_independent_registries() {
    logger::init_with_level(LogLevel::Trace);
    let compiler = Compiler::new();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = SOURCES
            .iter()
            .map(|source| {
                let compiler = &compiler;
                scope.spawn(move || compiler.compile(source))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("compile thread panicked"))
            .collect()
    });

    // two units publishing `value` separately never conflict
    assert!(results[1].warnings().all(|d| d.code != "W2005"));
    assert!(results[2].warnings().all(|d| d.code != "W2005"));
    assert_eq!(results[1].analyzed_program.registry.owner("value"), Some("Shared"));
    assert_eq!(results[0].analyzed_program.cycles.len(), 1);
}

#[test]
fn test_batch_matches_sequential() {
    let compiler = Compiler::new();
    let batch = compiler.compile_batch(&SOURCES);
    for (source, batched) in SOURCES.iter().zip(&batch) {
        let sequential = compiler.compile(source);
        assert_eq!(sequential.diagnostics, batched.diagnostics);
        assert_eq!(sequential.program, batched.program);
    }
}
