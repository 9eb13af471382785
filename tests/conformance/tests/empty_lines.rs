//! Empty-line skipping: a prompt file with blank lines interspersed
//! produces exactly as many line-level hash records as non-empty lines,
//! preserving relative order.

use conformance_tests::{capture_logger, write_prompt_file};
use verbatim_harness::driver::{run_generation, DriverConfig};
use verbatim_harness::engines::scripted::{LineScript, ScriptedEngine};
use verbatim_ledger::digest::{digest_bytes, Category};
use verbatim_ledger::ledger::HashLedger;

#[test]
fn blank_lines_produce_no_records_and_order_is_preserved() {
    let (_dir, path) =
        write_prompt_file(&["", "first", "", "", "second", "third", "", ""]);
    let mut engine = ScriptedEngine::new(vec![
        LineScript::reply(&[(1, "r1", 0.1)]),
        LineScript::reply(&[(2, "r2", 0.2)]),
        LineScript::reply(&[(3, "r3", 0.3)]),
    ]);
    let mut ledger = HashLedger::new();
    let (mut log, _console, file) = capture_logger();
    let config = DriverConfig {
        prompt_path: path,
        max_new_tokens: 8,
        repeat: 1,
    };
    let stats = run_generation(&mut engine, &config, &mut ledger, &mut log).unwrap();
    log.close().unwrap();

    assert_eq!(stats.lines_hashed, 3);
    for category in Category::ALL {
        assert_eq!(ledger.len(category), 3);
    }

    // Prompt digests are the digests of the non-empty lines, in order.
    let expected: Vec<_> = ["first", "second", "third"]
        .iter()
        .map(|l| digest_bytes(l.as_bytes()))
        .collect();
    let recorded: Vec<_> = ledger
        .records(Category::Prompt)
        .iter()
        .map(|r| r.digest.clone())
        .collect();
    assert_eq!(recorded, expected);

    // Blank lines are skipped silently — no prompt log line for them.
    let captured = file.contents();
    assert_eq!(captured.matches("Prompt: ").count(), 3);
}

#[test]
fn whitespace_only_lines_are_not_blank() {
    // A line of spaces is non-empty and is processed like any other.
    let (_dir, path) = write_prompt_file(&["  ", "real"]);
    let mut engine = ScriptedEngine::new(vec![
        LineScript::reply(&[(1, "a", 0.1)]),
        LineScript::reply(&[(2, "b", 0.2)]),
    ]);
    let mut ledger = HashLedger::new();
    let (mut log, _console, _file) = capture_logger();
    let config = DriverConfig {
        prompt_path: path,
        max_new_tokens: 8,
        repeat: 1,
    };
    let stats = run_generation(&mut engine, &config, &mut ledger, &mut log).unwrap();
    log.close().unwrap();

    assert_eq!(stats.lines_hashed, 2);
    assert_eq!(
        ledger.records(Category::Prompt)[0].digest,
        digest_bytes(b"  ")
    );
}
