//! Native reporters.
//!
//! [`Reporter::report`] cannot fail, so writer-backed reporters hold on to
//! the first IO error and surface it from [`WriteReporter::finish`].

use std::io::{self, Write};

use wasmpi_core::Reporter;

/// Reporter that keeps every value in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    values: Vec<f64>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values in the order they were reported.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl Reporter for Recorder {
    fn report(&mut self, value: f64) {
        self.values.push(value);
    }
}

/// Reporter that writes each value on its own line.
///
/// Values use Rust's shortest round-trip formatting, so `3.141592653589794`
/// reads back as the same bits.
#[derive(Debug)]
pub struct WriteReporter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

/// Reporter printing to standard output, the native stand-in for a host console.
pub type StdoutReporter = WriteReporter<io::Stdout>;

impl StdoutReporter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WriteReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush and return the writer, or the first error seen while reporting.
    ///
    /// # Errors
    ///
    /// Returns the first write error, or the flush error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn report(&mut self, value: f64) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{value}") {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasmpi_core::{gauss_legendre, start};

    /// Writer that fails every write.
    #[derive(Debug)]
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_recorder_collects_in_order() {
        let mut recorder = Recorder::new();
        start(&mut recorder);
        gauss_legendre(0, &mut recorder);
        assert_eq!(recorder.values().len(), 2);
        assert_eq!(recorder.values()[0], 42.0);
        assert!((recorder.values()[1] - 2.914213562373095).abs() < 1e-12);
    }

    #[test]
    fn test_write_reporter_lines() {
        let mut reporter = WriteReporter::new(Vec::new());
        start(&mut reporter);
        gauss_legendre(3, &mut reporter);
        let out = String::from_utf8(reporter.finish().unwrap()).unwrap();
        assert_eq!(out, "42\n3.141592653589794\n");
    }

    #[test]
    fn test_write_reporter_round_trips_values() {
        let mut reporter = WriteReporter::new(Vec::new());
        gauss_legendre(1, &mut reporter);
        let out = String::from_utf8(reporter.finish().unwrap()).unwrap();
        let parsed: f64 = out.trim().parse().unwrap();
        assert_eq!(parsed.to_bits(), wasmpi_core::estimate_pi(1).to_bits());
    }

    #[test]
    fn test_write_reporter_keeps_first_error() {
        let mut reporter = WriteReporter::new(BrokenPipe);
        gauss_legendre(1, &mut reporter);
        gauss_legendre(2, &mut reporter);
        let err = reporter.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
