//! ward-gate: pre-execution policy gate for agent tool calls.
//!
//! Reads one invocation request as JSON on stdin and reports the verdict
//! through the exit status: 0 lets the tool call proceed, 2 blocks it and
//! leaves two rationale lines on stderr for the agent. Absent or
//! malformed input allows: the gate sits in front of every tool call, and
//! a parsing defect must not take the whole agent down. That fail-open
//! choice trades security for availability and is called out in
//! DESIGN.md as a reviewable policy decision.

use std::io::{IsTerminal, Read};
use ward_core::{evaluate, InvocationRequest, Verdict, BLOCK_EXIT_CODE};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return;
    }

    let mut input = String::new();
    if stdin.read_to_string(&mut input).is_err() {
        return;
    }

    let Ok(request) = InvocationRequest::from_json(&input) else {
        return;
    };

    if let Verdict::Block(reason) = evaluate(&request) {
        eprintln!("{}", reason.message);
        eprintln!("{}", reason.hint);
        std::process::exit(BLOCK_EXIT_CODE);
    }
}
