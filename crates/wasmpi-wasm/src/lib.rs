//! wasmpi-wasm: WASM FFI boundary
//!
//! This crate builds the WebAssembly module: it exports the kernel and the
//! initializer, and imports the host's `env.report` function.
//!
//! Build with `cargo build -p wasmpi-wasm --release --target wasm32-unknown-unknown`.

// Native builds link std for the cdylib's panic machinery.
#![cfg_attr(all(target_arch = "wasm32", not(test)), no_std)]

#[cfg(all(target_arch = "wasm32", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    core::arch::wasm32::unreachable()
}

pub mod ffi;

pub use wasmpi_core;
