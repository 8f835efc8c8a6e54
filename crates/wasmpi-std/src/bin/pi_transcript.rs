//! Record and verify regression transcripts of kernel output.
//!
//! Usage:
//!   pi_transcript record <FILE> [MAX]   record iterations 0..=MAX (default 6)
//!   pi_transcript verify <FILE>         compare FILE against the current kernel
//!   pi_transcript show <FILE>           print iterations, value and error

use std::env;
use std::process;

use wasmpi_std::transcript::Transcript;

const DEFAULT_MAX: u32 = 6;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} record <FILE> [MAX]");
    eprintln!("       {program} verify <FILE>");
    eprintln!("       {program} show <FILE>");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("pi_transcript", String::as_str);

    let (command, path) = match (args.get(1), args.get(2)) {
        (Some(command), Some(path)) => (command.as_str(), path.as_str()),
        _ => usage(program),
    };

    match command {
        "record" => {
            let max = match args.get(3) {
                None => DEFAULT_MAX,
                Some(raw) => match raw.parse::<u32>() {
                    Ok(max) => max,
                    Err(e) => {
                        eprintln!("{raw}: {e}");
                        usage(program);
                    }
                },
            };
            let transcript = Transcript::record(max);
            if let Err(e) = transcript.save(path) {
                eprintln!("{path}: {e}");
                process::exit(1);
            }
            println!("recorded {} entries to {path}", transcript.entries().len());
        }
        "verify" => {
            let stored = load_or_exit(path);
            let current = Transcript::record(stored.max_iterations());
            let drift = stored.diff(&current);
            if drift.is_empty() {
                println!("ok: {} entries match", stored.entries().len());
                return;
            }
            for d in &drift {
                println!(
                    "drift at {}: expected {} ({:#018x}), found {} ({:#018x})",
                    d.iterations,
                    d.expected,
                    d.expected.to_bits(),
                    d.found,
                    d.found.to_bits()
                );
            }
            process::exit(1);
        }
        "show" => {
            let stored = load_or_exit(path);
            for entry in stored.entries() {
                println!("{}\t{}\t{:e}", entry.iterations, entry.value, entry.error());
            }
        }
        _ => usage(program),
    }
}

fn load_or_exit(path: &str) -> Transcript {
    match Transcript::load(path) {
        Ok(transcript) => transcript,
        Err(e) => {
            eprintln!("{path}: {e}");
            process::exit(1);
        }
    }
}
