//! Argument extraction idempotence: harness flags are removed, everything
//! else is forwarded to the engine parser in original relative order.

use verbatim_harness::args::{extract_harness_args, ArgError};
use verbatim_harness::engines::params::parse_engine_args;

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

#[test]
fn harness_flags_are_stripped_from_a_mixed_invocation() {
    let (harness, rest) =
        extract_harness_args(argv(&["-o", "results.txt", "--repeat", "3", "--model", "m.bin"]))
            .unwrap();
    assert_eq!(harness.out_path, "results.txt");
    assert_eq!(harness.repeat, 3);
    assert_eq!(rest, argv(&["--model", "m.bin"]));
}

#[test]
fn remainder_parses_as_engine_configuration() {
    let (_, rest) = extract_harness_args(argv(&[
        "--model", "m.bin", "-o", "x.txt", "--file", "p.txt", "--repeat", "2", "--seed", "9",
    ]))
    .unwrap();
    let params = parse_engine_args(&rest).unwrap();
    assert_eq!(params.model, "m.bin");
    assert_eq!(params.prompt_file, "p.txt");
    assert_eq!(params.seed, 9);
}

#[test]
fn unrelated_flag_order_is_preserved() {
    let (_, rest) = extract_harness_args(argv(&[
        "--file", "p.txt", "--repeat", "5", "--model", "m.bin", "--temp", "0.1",
    ]))
    .unwrap();
    assert_eq!(rest, argv(&["--file", "p.txt", "--model", "m.bin", "--temp", "0.1"]));
}

#[test]
fn extraction_is_idempotent() {
    let (first, rest) =
        extract_harness_args(argv(&["-o", "a.txt", "--model", "m.bin"])).unwrap();
    let (second, rest_again) = extract_harness_args(rest.clone()).unwrap();
    // The remainder contains no harness flags, so a second pass is a no-op
    // with default settings.
    assert_eq!(rest, rest_again);
    assert_eq!(first.out_path, "a.txt");
    assert_eq!(second.out_path, "determinism_results.txt");
}

#[test]
fn dangling_flag_fails_before_any_generation() {
    assert_eq!(
        extract_harness_args(argv(&["--model", "m.bin", "--repeat"])).unwrap_err(),
        ArgError::MissingValue { flag: "--repeat" }
    );
}
