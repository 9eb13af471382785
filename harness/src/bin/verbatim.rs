//! `verbatim`: determinism-verification CLI.
//!
//! Drives the built-in deterministic toy engine over a prompt file
//! `--repeat` times and writes every captured log line — parameter
//! summary, per-line prompt/response/score text, per-line hash records,
//! and the three final hash-of-hashes records — to the console and to the
//! resolved output file, identically.
//!
//! ```text
//! verbatim [-o out.txt] [--repeat N] --file prompts.txt \
//!          [--model ID] [--seed S] [--temp T] [--n-predict N] [--n-batch B]
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use verbatim_harness::args::extract_harness_args;
use verbatim_harness::contract::InferenceEngineV1;
use verbatim_harness::driver::{record_final_digests, run_generation, DriverConfig};
use verbatim_harness::engines::params::parse_engine_args;
use verbatim_harness::engines::toy_lm::ToyLm;
use verbatim_harness::logger::LogBroadcaster;
use verbatim_harness::outfile::resolve_output_path;
use verbatim_harness::report::render_run_report;
use verbatim_ledger::ledger::HashLedger;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    // Harness flags first, engine configuration from the remainder.
    let (harness_args, engine_args) = extract_harness_args(args).map_err(|e| e.to_string())?;
    let engine_params = parse_engine_args(&engine_args).map_err(|e| e.to_string())?;

    // Pick a non-destructive output name, then attach the broadcaster
    // before any message that must be captured.
    let resolved =
        resolve_output_path(Path::new(&harness_args.out_path)).map_err(|e| e.to_string())?;
    if let Some(notice) = resolved.notice() {
        eprint!("{notice}");
    }
    let out_file = File::create(&resolved.chosen).map_err(|e| {
        format!("cannot open {} for logging: {e}", resolved.chosen.display())
    })?;
    eprintln!("Writing logs to: {}", resolved.chosen.display());

    let mut log = LogBroadcaster::new(Box::new(std::io::stdout()), Box::new(out_file));
    log.log(&engine_params.summary(harness_args.repeat));

    let mut engine = ToyLm::new(&engine_params);
    let mut ledger = HashLedger::new();
    let config = DriverConfig {
        prompt_path: PathBuf::from(&engine_params.prompt_file),
        max_new_tokens: engine_params.max_new_tokens(),
        repeat: harness_args.repeat,
    };

    let stats = run_generation(&mut engine, &config, &mut ledger, &mut log)
        .map_err(|e| e.to_string())?;

    let aggregates = record_final_digests(&ledger, &mut log);
    log.log(&render_run_report(&stats, &aggregates));

    // Engine performance dump goes to stderr only, like the driver's
    // per-iteration throughput line — it is timing-dependent and must not
    // land in the captured (comparable) output.
    eprintln!("{}", engine.perf_summary());

    log.close().map_err(|e| format!("closing log sinks: {e}"))?;
    Ok(())
}
