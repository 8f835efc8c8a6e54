//! Run the Gauss-Legendre kernel natively.
//!
//! Usage: gauss_legendre [--start] [ITERATIONS...]
//!
//! Prints each reported value on its own line, the way a host console wired
//! to `env.report` would. With no counts, runs 1, 2 and 3. `--start` reports
//! the initializer's sentinel first. Set `WASMPI_TRACE=debug` to see each
//! convergence step on stderr.

use std::env;
use std::process;

use wasmpi_core::{gauss_legendre_traced, start};
use wasmpi_std::sink::StdoutReporter;
use wasmpi_std::trace::{StderrTracer, TRACE_ENV};

const DEFAULT_COUNTS: [i32; 3] = [1, 2, 3];

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("gauss_legendre", String::as_str);

    let mut run_start = false;
    let mut counts = Vec::new();
    for arg in args.iter().skip(1) {
        if arg == "--start" {
            run_start = true;
            continue;
        }
        match arg.parse::<i32>() {
            Ok(n) => counts.push(n),
            Err(e) => {
                eprintln!("{arg}: {e}");
                eprintln!("Usage: {program} [--start] [ITERATIONS...]");
                process::exit(1);
            }
        }
    }
    if counts.is_empty() {
        counts.extend(DEFAULT_COUNTS);
    }

    let mut tracer = match StderrTracer::from_env() {
        Ok(tracer) => tracer,
        Err(e) => {
            eprintln!("{TRACE_ENV}: {e}");
            process::exit(1);
        }
    };

    let mut reporter = StdoutReporter::stdout();
    if run_start {
        start(&mut reporter);
    }
    for iterations in counts {
        gauss_legendre_traced(iterations, &mut reporter, &mut tracer);
    }

    if let Err(e) = reporter.finish() {
        eprintln!("stdout: {e}");
        process::exit(1);
    }
}
