//! Host reporting boundary.
//!
//! The kernel never returns its estimate to the caller. It hands the value
//! to a [`Reporter`] instead, which inside a WebAssembly module forwards to
//! the host's `env.report` import and elsewhere is whatever sink the caller
//! injects.

/// Value reported by the initializer entry point.
pub const START_SENTINEL: f64 = 42.0;

/// Sink for values surfaced to the embedding environment.
///
/// Any `FnMut(f64)` closure is a reporter, which is how tests capture output.
pub trait Reporter {
    /// Deliver one value to the host.
    fn report(&mut self, value: f64);
}

impl<F: FnMut(f64)> Reporter for F {
    fn report(&mut self, value: f64) {
        self(value);
    }
}

/// A reporter that discards every value.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _value: f64) {}
}

/// Initializer entry point: report [`START_SENTINEL`] once.
///
/// Unrelated to the kernel; it only demonstrates the host lifecycle hook.
pub fn start<R: Reporter + ?Sized>(reporter: &mut R) {
    reporter.report(START_SENTINEL);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingReporter {
        calls: usize,
        last: Option<f64>,
    }

    impl Reporter for CountingReporter {
        fn report(&mut self, value: f64) {
            self.calls += 1;
            self.last = Some(value);
        }
    }

    #[test]
    fn test_start_reports_sentinel() {
        let mut reported = Vec::new();
        start(&mut |value: f64| reported.push(value));
        assert_eq!(reported, vec![42.0]);
    }

    #[test]
    fn test_start_reports_once() {
        let mut reporter = CountingReporter {
            calls: 0,
            last: None,
        };
        start(&mut reporter);
        assert_eq!(reporter.calls, 1);
        assert_eq!(reporter.last, Some(START_SENTINEL));
    }

    #[test]
    fn test_start_through_trait_object() {
        let mut reporter = CountingReporter {
            calls: 0,
            last: None,
        };
        let dynamic: &mut dyn Reporter = &mut reporter;
        start(&mut *dynamic);
        start(&mut *dynamic);
        assert_eq!(reporter.calls, 2);
    }

    #[test]
    fn test_noop_reporter() {
        let mut reporter = NoopReporter;
        start(&mut reporter);
        reporter.report(f64::NAN);
        // Should not panic
    }
}
