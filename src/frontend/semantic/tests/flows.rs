//! Data-flow records

use super::{analyze, feature_set};
use crate::frontend::semantic::DataFlowInfo;

fn flows(statements: &str) -> Vec<DataFlowInfo> {
    let (analyzed, _) = analyze(&feature_set(statements));
    analyzed
        .feature_sets
        .into_iter()
        .next()
        .map(|fs| fs.data_flows)
        .unwrap_or_default()
}

#[test]
fn test_one_flow_per_statement() {
    let flows = flows(
        "Extract the <price> from the <request: body>.\n\
         Extract the <quantity> from the <request: body>.\n\
         Compute the <total> from <price> * <quantity>.\n\
         Return an <OK: status> with <total>.",
    );
    assert_eq!(flows.len(), 4);
    assert_eq!(flows[0].to_string(), "Extract <price>: in [request] out [price]");
    assert_eq!(
        flows[2].inputs.iter().map(String::as_str).collect::<Vec<_>>(),
        ["price", "quantity"]
    );
    assert!(flows[2].outputs.contains("total"));
    assert!(flows[3].inputs.contains("total"));
    assert!(flows[3].outputs.is_empty());
}

#[test]
fn test_emit_tag() {
    let flows = flows("Emit the <UserCreated: event>.\nReturn an <OK: status>.");
    assert!(flows[0].has_effect("emit:UserCreated"));
    assert!(!flows[1].has_effect("emit:UserCreated"));
}

#[test]
fn test_pipeline_stages_are_chained() {
    let flows = flows(
        "Fetch the <users> from <api> |> Filter the <active> from <users> |> Return an <OK: status> with <active>.",
    );
    assert_eq!(flows.len(), 3);
    assert!(flows.iter().all(|f| f.has_effect("pipeline")));
    assert!(flows[1].inputs.contains("users"));
    assert!(flows[2].inputs.contains("active"));
}

#[test]
fn test_parallel_loop_flow() {
    let flows = flows(
        "Extract the <urls> from the <request>.\n\
         parallel for each <url> at <n> in <urls> where <n> >= 0 with concurrency: 4 {\n\
         Fetch the <page> from <url>.\n\
         Log <page> to <console>.\n\
         }\n\
         Return an <OK: status>.",
    );
    let loop_flow = &flows[1];
    assert!(loop_flow.has_effect("parallel"));
    assert_eq!(loop_flow.label, "parallel for each <url>");
    assert!(loop_flow.inputs.contains("urls"));
    assert!(loop_flow.inputs.contains("n"));
    assert_eq!(
        loop_flow.outputs.iter().map(String::as_str).collect::<Vec<_>>(),
        ["url", "n"]
    );
    // the body follows its loop, pre-order
    assert_eq!(flows[2].label, "Fetch <page>");
    assert!(flows[2].inputs.contains("url"));
}

#[test]
fn test_scoping_tags() {
    let flows = flows(
        "Require <db>.\n\
         Retrieve the <user> from the <db>.\n\
         Publish as <current-user> <user>.\n\
         Return an <OK: status>.",
    );
    assert!(flows[0].has_effect("require:db"));
    assert!(flows[0].outputs.contains("db"));
    assert!(flows[1].inputs.contains("db"));
    assert!(flows[2].has_effect("publish:current-user"));
    assert!(flows[2].inputs.contains("user"));
    assert!(flows[2].outputs.contains("current-user"));
}

#[test]
fn test_match_flow_precedes_branches() {
    let flows = flows(
        "Extract the <kind> from the <request>.\n\
         match <kind> {\n\
         case \"a\" { Log \"a\" to <console>. }\n\
         otherwise { Log \"other\" to <console>. }\n\
         }\n\
         Return an <OK: status>.",
    );
    let labels: Vec<&str> = flows.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels[1], "match");
    assert!(flows[1].inputs.contains("kind"));
    assert_eq!(flows.len(), 5);
}
