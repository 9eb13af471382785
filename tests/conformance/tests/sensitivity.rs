//! Sensitivity: a single-character divergence in one generated response on
//! one iteration changes that line's response digest and, transitively, the
//! run's headline response digest — while leaving the prompt-category
//! headline unaffected.

use conformance_tests::{capture_logger, write_prompt_file};
use verbatim_harness::driver::{record_final_digests, run_generation, DriverConfig};
use verbatim_harness::engines::scripted::{LineScript, ScriptedEngine};
use verbatim_ledger::digest::Category;
use verbatim_ledger::ledger::{AggregateDigests, HashLedger};

/// Two iterations over a one-line prompt file; the second iteration's
/// reply is supplied by the caller.
fn run_two_iterations(second_reply: LineScript) -> (HashLedger, AggregateDigests) {
    let (_dir, path) = write_prompt_file(&["the only prompt"]);
    let mut engine = ScriptedEngine::new(vec![
        LineScript::reply(&[(1, "stable", 0.5), (2, " output", -1.0)]),
        second_reply,
    ]);
    let mut ledger = HashLedger::new();
    let (mut log, _console, _file) = capture_logger();
    let config = DriverConfig {
        prompt_path: path,
        max_new_tokens: 16,
        repeat: 2,
    };
    run_generation(&mut engine, &config, &mut ledger, &mut log).unwrap();
    let aggregates = record_final_digests(&ledger, &mut log);
    log.close().unwrap();
    (ledger, aggregates)
}

#[test]
fn one_character_divergence_flips_response_headline_only() {
    let identical = LineScript::reply(&[(1, "stable", 0.5), (2, " output", -1.0)]);
    // Same tokens, same scores — one character differs in one piece.
    let divergent = LineScript::reply(&[(1, "stable", 0.5), (2, " outpuX", -1.0)]);

    let (ledger_a, baseline) = run_two_iterations(identical);
    let (ledger_b, diverged) = run_two_iterations(divergent);

    // The line-level response digest differs on the diverged iteration.
    assert_eq!(
        ledger_a.records(Category::Response)[0].digest,
        ledger_b.records(Category::Response)[0].digest
    );
    assert_ne!(
        ledger_a.records(Category::Response)[1].digest,
        ledger_b.records(Category::Response)[1].digest
    );

    // Headline: response flips, prompt and scores do not.
    assert_ne!(baseline.response, diverged.response);
    assert_eq!(baseline.prompt, diverged.prompt);
    assert_eq!(baseline.scores, diverged.scores);
}

#[test]
fn one_score_divergence_flips_scores_headline_only() {
    let identical = LineScript::reply(&[(1, "stable", 0.5), (2, " output", -1.0)]);
    // Same text, one score differs past the 6th fractional digit boundary.
    let divergent = LineScript::reply(&[(1, "stable", 0.5), (2, " output", -1.000001)]);

    let (_, baseline) = run_two_iterations(identical);
    let (_, diverged) = run_two_iterations(divergent);

    assert_ne!(baseline.scores, diverged.scores);
    assert_eq!(baseline.response, diverged.response);
    assert_eq!(baseline.prompt, diverged.prompt);
}

#[test]
fn deterministic_stub_keeps_all_headlines_stable() {
    let identical = LineScript::reply(&[(1, "stable", 0.5), (2, " output", -1.0)]);
    let (_, first) = run_two_iterations(identical.clone());
    let (_, second) = run_two_iterations(identical);
    assert_eq!(first, second);
}
