//! Integration tests for the kernel and initializer through the public API.

use core::f64::consts::PI;

use wasmpi_core::{estimate_pi, gauss_legendre, start, Estimates, Reporter, START_SENTINEL};

/// Reporter that records every value it receives, as a host console would.
#[derive(Default)]
struct Console {
    lines: Vec<f64>,
}

impl Reporter for Console {
    fn report(&mut self, value: f64) {
        self.lines.push(value);
    }
}

/// Drive the kernel the way a host does: several counts in a row, one report each.
#[test]
fn test_host_session() {
    let mut console = Console::default();
    for iterations in [1, 2, 3] {
        gauss_legendre(iterations, &mut console);
    }

    assert_eq!(console.lines.len(), 3);
    assert!((console.lines[0] - 3.1405792505221686).abs() < 1e-15);
    assert!((console.lines[1] - PI).abs() < 1e-8);
    assert!((console.lines[2] - PI).abs() < 1e-9);
}

#[test]
fn test_zero_iterations() {
    let mut console = Console::default();
    gauss_legendre(0, &mut console);
    assert!((console.lines[0] - 2.914213562373095).abs() < 1e-12);
}

/// The error never grows while the sequence converges.
#[test]
fn test_monotonic_convergence() {
    let errors: Vec<f64> = (0..=4).map(|n| (estimate_pi(n) - PI).abs()).collect();
    for pair in errors.windows(2) {
        assert!(
            pair[1] <= pair[0],
            "error increased: {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_estimates_errors_non_increasing() {
    let estimates: Vec<_> = Estimates::new().take(5).collect();
    assert_eq!(estimates[0].iterations, 0);
    assert_eq!(estimates[4].iterations, 4);
    assert!(estimates.windows(2).all(|w| w[1].error() <= w[0].error()));
}

/// Initializer output does not depend on earlier kernel runs.
#[test]
fn test_initializer_independent_of_kernel() {
    let mut console = Console::default();
    start(&mut console);
    gauss_legendre(5, &mut console);
    gauss_legendre(-3, &mut console);
    start(&mut console);

    assert_eq!(console.lines.len(), 4);
    assert_eq!(console.lines[0], 42.0);
    assert_eq!(console.lines[3], START_SENTINEL);
}

/// Repeated calls are bit-identical; no state leaks between them.
#[test]
fn test_idempotent_reports() {
    for iterations in 0..8 {
        let mut first = Console::default();
        let mut second = Console::default();
        gauss_legendre(iterations, &mut first);
        gauss_legendre(7, &mut Console::default());
        gauss_legendre(iterations, &mut second);
        assert_eq!(first.lines[0].to_bits(), second.lines[0].to_bits());
    }
}
