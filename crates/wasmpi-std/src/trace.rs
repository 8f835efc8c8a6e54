//! Stderr trace sink for native runs.
//!
//! Verbosity comes from the `WASMPI_TRACE` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`). Unset means quiet.

use std::env;
use std::io::{self, Write};

use wasmpi_core::tracing::{ParseTraceLevelError, TraceEvent, TraceLevel, Tracer};

/// Environment variable holding the trace level.
pub const TRACE_ENV: &str = "WASMPI_TRACE";

/// Tracer that writes one line per event to stderr.
#[derive(Clone, Copy, Debug)]
pub struct StderrTracer {
    level: TraceLevel,
}

impl StderrTracer {
    pub fn new(level: TraceLevel) -> Self {
        Self { level }
    }

    /// Build a tracer from [`TRACE_ENV`].
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to something other than a level name.
    pub fn from_env() -> Result<Self, ParseTraceLevelError> {
        match env::var(TRACE_ENV) {
            Ok(value) => Ok(Self::new(value.parse()?)),
            Err(_) => Ok(Self::new(TraceLevel::Error)),
        }
    }
}

impl Tracer for StderrTracer {
    fn level(&self) -> TraceLevel {
        self.level
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent) {
        // Tracing must never abort a run; a closed stderr drops the line.
        let _ = writeln!(io::stderr().lock(), "{}", format_event(level, &event));
    }
}

/// Render an event as a single `[level] message key=value...` line.
pub fn format_event(level: TraceLevel, event: &TraceEvent) -> String {
    match event {
        TraceEvent::KernelStart { iterations } => {
            format!("[{level}] kernel start iterations={iterations}")
        }
        TraceEvent::Step {
            index,
            weight,
            a,
            b,
            t,
        } => format!("[{level}] step index={index} weight={weight} a={a} b={b} t={t}"),
        TraceEvent::Report { value } => format!("[{level}] report value={value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kernel_start() {
        let line = format_event(TraceLevel::Info, &TraceEvent::KernelStart { iterations: 3 });
        assert_eq!(line, "[info] kernel start iterations=3");
    }

    #[test]
    fn test_format_step() {
        let line = format_event(
            TraceLevel::Debug,
            &TraceEvent::Step {
                index: 1,
                weight: 2.0,
                a: 0.5,
                b: 0.25,
                t: 0.125,
            },
        );
        assert_eq!(line, "[debug] step index=1 weight=2 a=0.5 b=0.25 t=0.125");
    }

    #[test]
    fn test_format_report() {
        let line = format_event(TraceLevel::Info, &TraceEvent::Report { value: 42.0 });
        assert_eq!(line, "[info] report value=42");
    }

    #[test]
    fn test_tracer_level() {
        assert_eq!(StderrTracer::new(TraceLevel::Debug).level(), TraceLevel::Debug);
    }
}
