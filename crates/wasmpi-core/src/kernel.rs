//! Gauss-Legendre convergence kernel.
//!
//! Each step replaces the arithmetic and geometric means and subtracts a
//! weighted variance correction from `t`:
//!
//! ```text
//! a' = (a + b) / 2
//! b' = sqrt(a * b)
//! t' = t - 2^i * (a - a')^2
//!
//! pi ~ (a + b)^2 / (4 * t)
//! ```
//!
//! The sequence starts from `a = 1`, `b = 1 / sqrt(2)`, `t = 1/4` and reaches
//! double-precision pi after three steps. Square roots go through `libm` so
//! the result is bit-identical on every target, including `wasm32`.

use crate::report::Reporter;

#[cfg(feature = "tracing")]
use crate::tracing::{TraceEvent, TraceLevel, Tracer};

// ============================================================================
// KernelTracer trait - abstracts over tracing so one loop serves both paths
// ============================================================================

/// Trait for optional kernel tracing.
///
/// Methods default to no-ops, so the untraced path compiles to the bare loop.
trait KernelTracer {
    /// Called once before the first step.
    fn trace_start(&mut self, _iterations: u32) {}

    /// Called after each step with the weight that step used.
    fn trace_step(&mut self, _index: u32, _weight: f64, _state: &AgmState) {}

    /// Called right before the estimate is handed to the reporter.
    fn trace_report(&mut self, _value: f64) {}
}

/// No-op tracer for untraced runs.
struct NoopKernelTracer;

impl KernelTracer for NoopKernelTracer {}

/// Wrapper that adapts a `Tracer` to the `KernelTracer` trait.
#[cfg(feature = "tracing")]
struct TracingWrapper<'a, T: Tracer>(&'a mut T);

#[cfg(feature = "tracing")]
impl<T: Tracer> KernelTracer for TracingWrapper<'_, T> {
    fn trace_start(&mut self, iterations: u32) {
        crate::trace_event!(
            self.0,
            TraceLevel::Info,
            TraceEvent::KernelStart { iterations }
        );
    }

    fn trace_step(&mut self, index: u32, weight: f64, state: &AgmState) {
        crate::trace_event!(
            self.0,
            TraceLevel::Debug,
            TraceEvent::Step {
                index,
                weight,
                a: state.a,
                b: state.b,
                t: state.t,
            }
        );
    }

    fn trace_report(&mut self, value: f64) {
        crate::trace_event!(self.0, TraceLevel::Info, TraceEvent::Report { value });
    }
}

// ============================================================================
// State
// ============================================================================

/// Accumulators of one Gauss-Legendre run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgmState {
    /// Arithmetic mean.
    pub a: f64,
    /// Geometric mean.
    pub b: f64,
    /// Variance correction term.
    pub t: f64,
    /// Weight of the next correction, `2^step`.
    ///
    /// Doubling an `f64` is exact up to `2^1023`; past that it is infinite.
    pub weight: f64,
    /// Number of steps applied so far.
    pub step: u32,
}

impl AgmState {
    /// The seed state: `a = 1`, `b = 1 / sqrt(2)`, `t = 0.25`.
    pub fn new() -> Self {
        Self {
            a: 1.0,
            b: 1.0 / libm::sqrt(2.0),
            t: 0.25,
            weight: 1.0,
            step: 0,
        }
    }

    /// Apply one convergence step.
    pub fn advance(&mut self) {
        let a_next = (self.a + self.b) / 2.0;
        let b_next = libm::sqrt(self.a * self.b);
        let delta = self.a - a_next;
        let t_next = self.t - self.weight * (delta * delta);

        self.a = a_next;
        self.b = b_next;
        self.t = t_next;
        self.weight *= 2.0;
        self.step += 1;
    }

    /// The pi estimate for the current accumulators, `(a + b)^2 / (4t)`.
    pub fn estimate(&self) -> f64 {
        let sum = self.a + self.b;
        (sum * sum) / (4.0 * self.t)
    }
}

impl Default for AgmState {
    fn default() -> Self {
        Self::new()
    }
}

/// An estimate together with the number of steps that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Steps applied.
    pub iterations: u32,
    /// Resulting value.
    pub value: f64,
}

impl Estimate {
    /// Absolute distance from `core::f64::consts::PI`.
    pub fn error(&self) -> f64 {
        libm::fabs(self.value - core::f64::consts::PI)
    }
}

/// Unbounded iterator over successive estimates, starting at zero steps.
///
/// ```
/// use wasmpi_core::Estimates;
///
/// let values: Vec<f64> = Estimates::new().take(4).map(|e| e.value).collect();
/// assert_eq!(values.len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Estimates {
    state: AgmState,
}

impl Estimates {
    /// Start from the seed state.
    pub fn new() -> Self {
        Self {
            state: AgmState::new(),
        }
    }
}

impl Iterator for Estimates {
    type Item = Estimate;

    fn next(&mut self) -> Option<Estimate> {
        let current = Estimate {
            iterations: self.state.step,
            value: self.state.estimate(),
        };
        self.state.advance();
        Some(current)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Clamp a caller-supplied iteration count. Negative counts run no steps.
pub fn step_count(iterations: i32) -> u32 {
    u32::try_from(iterations).unwrap_or(0)
}

/// Compute the estimate after `iterations` steps.
pub fn estimate_pi(iterations: u32) -> f64 {
    run(iterations, &mut NoopKernelTracer)
}

/// Run the kernel and report its estimate exactly once.
///
/// A negative `iterations` is treated as zero.
pub fn gauss_legendre<R: Reporter + ?Sized>(iterations: i32, reporter: &mut R) {
    gauss_legendre_inner(iterations, reporter, &mut NoopKernelTracer);
}

/// Run the kernel with tracing support.
///
/// Reports the same value as [`gauss_legendre`].
#[cfg(feature = "tracing")]
pub fn gauss_legendre_traced<R: Reporter + ?Sized, T: Tracer>(
    iterations: i32,
    reporter: &mut R,
    tracer: &mut T,
) {
    gauss_legendre_inner(iterations, reporter, &mut TracingWrapper(tracer));
}

fn gauss_legendre_inner<R: Reporter + ?Sized, KT: KernelTracer>(
    iterations: i32,
    reporter: &mut R,
    tracer: &mut KT,
) {
    let value = run(step_count(iterations), tracer);
    tracer.trace_report(value);
    reporter.report(value);
}

/// Core loop, parameterized over tracing.
fn run<KT: KernelTracer>(iterations: u32, tracer: &mut KT) -> f64 {
    tracer.trace_start(iterations);

    let mut state = AgmState::new();
    for index in 0..iterations {
        let weight = state.weight;
        state.advance();
        tracer.trace_step(index, weight, &state);
    }

    state.estimate()
}
