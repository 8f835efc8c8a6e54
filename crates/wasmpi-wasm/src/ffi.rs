//! FFI exports for WASM host environments.
//!
//! # Imports
//!
//! - `env.report(value: f64)`: receives every value the module surfaces.
//!
//! # Exports
//!
//! - `gauss_legendre(iterations: i32)`: run the kernel, report its estimate once
//! - `_start()`: report the sentinel `42.0`
//!
//! Neither export returns anything; the host observes results only through
//! its `report` import. A host wires it up like:
//!
//! ```text
//! imports = { env: { report: (value) => console.log(value) } }
//! instance.exports._start();            // 42
//! instance.exports.gauss_legendre(3);   // 3.141592653589794
//! ```

use wasmpi_core::kernel;
use wasmpi_core::report::{self, Reporter};

#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "env")]
unsafe extern "C" {
    #[link_name = "report"]
    fn host_report(value: f64);
}

/// Bits of the last value passed through [`HostReporter`] off-wasm.
///
/// Native builds have no host import; the value is parked here instead so
/// the exports stay callable and observable in tests.
#[cfg(not(target_arch = "wasm32"))]
static LAST_REPORTED: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);

/// Reporter that forwards to the host's `env.report` import.
#[derive(Default, Clone, Copy, Debug)]
pub struct HostReporter;

impl Reporter for HostReporter {
    #[cfg(target_arch = "wasm32")]
    fn report(&mut self, value: f64) {
        // SAFETY: `env.report` is supplied by the host at instantiation with
        // signature (f64) -> (); instantiation fails otherwise.
        unsafe { host_report(value) }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn report(&mut self, value: f64) {
        LAST_REPORTED.store(value.to_bits(), core::sync::atomic::Ordering::Relaxed);
    }
}

/// Last value reported on a native build.
#[cfg(not(target_arch = "wasm32"))]
pub fn last_reported() -> f64 {
    f64::from_bits(LAST_REPORTED.load(core::sync::atomic::Ordering::Relaxed))
}

// === Exports ===

/// Run the Gauss-Legendre kernel for `iterations` steps and report the estimate.
///
/// A negative count runs no steps.
#[unsafe(no_mangle)]
pub extern "C" fn gauss_legendre(iterations: i32) {
    kernel::gauss_legendre(iterations, &mut HostReporter);
}

/// Initializer entry point: report `42.0`.
///
/// Exported as `_start` on wasm only; native links already own that symbol.
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "_start"))]
pub extern "C" fn start() {
    report::start(&mut HostReporter);
}
