//! Kernel tracing support (feature-gated).
//!
//! Provides structured trace events for inspecting convergence step by step.
//! Zero overhead when the `tracing` feature is disabled.

use core::fmt;
use core::str::FromStr;

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Kernel entry and the reported value.
    Info,
    /// Every convergence step.
    Debug,
    /// Verbose tracing (every operation).
    Trace,
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceLevel::Error => write!(f, "error"),
            TraceLevel::Warn => write!(f, "warn"),
            TraceLevel::Info => write!(f, "info"),
            TraceLevel::Debug => write!(f, "debug"),
            TraceLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Error returned when a string does not name a [`TraceLevel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseTraceLevelError;

impl fmt::Display for ParseTraceLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: error, warn, info, debug, trace")
    }
}

impl FromStr for TraceLevel {
    type Err = ParseTraceLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("error") {
            Ok(TraceLevel::Error)
        } else if s.eq_ignore_ascii_case("warn") || s.eq_ignore_ascii_case("warning") {
            Ok(TraceLevel::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(TraceLevel::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(TraceLevel::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(TraceLevel::Trace)
        } else {
            Err(ParseTraceLevelError)
        }
    }
}

/// Structured trace events emitted by the kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceEvent {
    /// A kernel run is starting.
    KernelStart {
        /// Steps that will be applied (negative requests already clamped).
        iterations: u32,
    },
    /// One convergence step has been applied.
    Step {
        /// Zero-based index of the step just applied.
        index: u32,
        /// Weight used for this step's correction (`2^index`).
        weight: f64,
        /// Arithmetic mean after the step.
        a: f64,
        /// Geometric mean after the step.
        b: f64,
        /// Correction term after the step.
        t: f64,
    },
    /// The final value is about to be handed to the reporter.
    Report {
        /// The reported estimate.
        value: f64,
    },
}

/// Trait for receiving trace events during a kernel run.
///
/// The tracer can filter events by returning a minimum trace level
/// from `level()`.
pub trait Tracer {
    /// Returns the minimum trace level to emit.
    ///
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event at or above the configured level.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent);
}

/// A no-op tracer that discards all events.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent) {}
}

/// Emit a trace event if the tracer level permits.
///
/// The level is checked before the event is constructed.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}
