//! wasmpi-core: Gauss-Legendre pi kernel
//!
//! This crate provides the convergence kernel and the reporting boundary it
//! writes through. It is `no_std` and IO-free so the same code runs inside a
//! WebAssembly module and natively.
//!
//! # Usage
//!
//! ```
//! use wasmpi_core::kernel::gauss_legendre;
//!
//! let mut reported = Vec::new();
//! gauss_legendre(3, &mut |value: f64| reported.push(value));
//! assert!((reported[0] - core::f64::consts::PI).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod kernel;
pub mod report;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use kernel::{estimate_pi, gauss_legendre, step_count, AgmState, Estimate, Estimates};
#[cfg(feature = "tracing")]
pub use kernel::gauss_legendre_traced;
pub use report::{start, NoopReporter, Reporter, START_SENTINEL};
