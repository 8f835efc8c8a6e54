//! wasmpi-std: Native reporters and CLI utilities
//!
//! This crate provides convenience utilities for running the kernel natively:
//! writer-backed reporters, a stderr trace sink, and regression transcripts.

pub mod sink;
pub mod trace;
pub mod transcript;

pub use wasmpi_core;
