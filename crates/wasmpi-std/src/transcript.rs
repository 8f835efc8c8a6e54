//! Regression transcripts of kernel output.
//!
//! A transcript records the estimate for every iteration count `0..=max`.
//! Saving one and verifying it against a later build catches numerical
//! drift, e.g. from a changed square root or a reordered expression.
//!
//! # File Format
//!
//! Transcript files use the `.wpi` extension by convention:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header (40 bytes)                      │
//! │   magic: [u8; 4]        "WMPI"         │
//! │   version: u32          Schema version │
//! │   fingerprint: [u8; 32] SHA-256        │
//! ├────────────────────────────────────────┤
//! │ Payload (postcard-encoded Transcript)  │
//! └────────────────────────────────────────┘
//! ```
//!
//! The fingerprint covers the schema version and the exact bits of every
//! recorded value, and is checked against the payload on load.
//!
//! # Example
//!
//! ```ignore
//! Transcript::record(6).save("kernel.wpi")?;
//!
//! // Later, on another build:
//! let stored = Transcript::load("kernel.wpi")?;
//! let drift = stored.diff(&Transcript::record(stored.max_iterations()));
//! assert!(drift.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use wasmpi_core::{Estimate, Estimates};

/// Current schema version. Bump on any breaking change to the serialized format.
pub const SCHEMA_VERSION: u32 = 1;

/// Magic bytes identifying a wasmpi transcript file.
const MAGIC: [u8; 4] = *b"WMPI";

/// magic(4) + version(4) + fingerprint(32).
const HEADER_LEN: usize = 40;

/// Transcript error.
#[derive(Debug)]
pub enum TranscriptError {
    /// File does not start with expected magic bytes.
    InvalidMagic,
    /// Schema version mismatch.
    VersionMismatch {
        /// Expected version.
        expected: u32,
        /// Found version.
        found: u32,
    },
    /// Stored fingerprint does not match the payload.
    FingerprintMismatch,
    /// Header is truncated.
    TruncatedHeader,
    /// Postcard deserialization failed.
    DeserializationFailed(postcard::Error),
    /// IO error.
    Io(io::Error),
}

impl std::fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected WMPI)"),
            Self::VersionMismatch { expected, found } => {
                write!(f, "version mismatch: expected {expected}, found {found}")
            }
            Self::FingerprintMismatch => write!(f, "fingerprint mismatch"),
            Self::TruncatedHeader => write!(f, "truncated header"),
            Self::DeserializationFailed(e) => write!(f, "postcard deserialization failed: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for TranscriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DeserializationFailed(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TranscriptError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A recorded value that differs from the expected one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    /// Iteration count of the entry.
    pub iterations: u32,
    /// Value in the reference transcript.
    pub expected: f64,
    /// Value in the compared transcript.
    pub found: f64,
}

/// Estimates for iteration counts `0..=max`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<Estimate>,
}

impl Transcript {
    /// Record the current kernel's estimates for `0..=max_iterations`.
    pub fn record(max_iterations: u32) -> Self {
        let len = (max_iterations as usize).saturating_add(1);
        Self {
            entries: Estimates::new().take(len).collect(),
        }
    }

    pub fn entries(&self) -> &[Estimate] {
        &self.entries
    }

    /// Highest recorded iteration count.
    pub fn max_iterations(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.iterations)
    }

    /// SHA-256 over the schema version and every entry's exact bits.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(SCHEMA_VERSION.to_le_bytes());
        for entry in &self.entries {
            hasher.update(entry.iterations.to_le_bytes());
            hasher.update(entry.value.to_bits().to_le_bytes());
        }

        hasher.finalize().into()
    }

    /// Entries whose values differ bit-for-bit from `other`.
    ///
    /// `self` is the reference. Only iteration counts present in both are compared.
    pub fn diff(&self, other: &Transcript) -> Vec<Drift> {
        self.entries
            .iter()
            .zip(&other.entries)
            .filter(|(expected, found)| expected.value.to_bits() != found.value.to_bits())
            .map(|(expected, found)| Drift {
                iterations: expected.iterations,
                expected: expected.value,
                found: found.value,
            })
            .collect()
    }

    /// Serialize to transcript file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload = postcard::to_allocvec(self).expect("serialization should not fail");

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
        bytes.extend_from_slice(&self.fingerprint());
        bytes.extend_from_slice(&payload);

        bytes
    }

    /// Deserialize from transcript file bytes, checking the stored fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The header is shorter than 40 bytes
    /// - Magic bytes don't match
    /// - Schema version doesn't match
    /// - Postcard deserialization fails
    /// - The stored fingerprint doesn't match the payload
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TranscriptError> {
        let stored = read_fingerprint(bytes)?;

        let transcript: Transcript = postcard::from_bytes(&bytes[HEADER_LEN..])
            .map_err(TranscriptError::DeserializationFailed)?;

        if transcript.fingerprint() != stored {
            return Err(TranscriptError::FingerprintMismatch);
        }

        Ok(transcript)
    }

    // === File-based convenience API ===

    /// Save to a transcript file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_bytes())
    }

    /// Load a transcript file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid transcript.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TranscriptError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

/// Get the fingerprint from transcript bytes without decoding the payload.
///
/// # Errors
///
/// Returns an error if the header is invalid.
pub fn read_fingerprint(bytes: &[u8]) -> Result<[u8; 32], TranscriptError> {
    if bytes.len() < HEADER_LEN {
        return Err(TranscriptError::TruncatedHeader);
    }

    if bytes[0..4] != MAGIC {
        return Err(TranscriptError::InvalidMagic);
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SCHEMA_VERSION {
        return Err(TranscriptError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    let mut fp = [0u8; 32];
    fp.copy_from_slice(&bytes[8..HEADER_LEN]);
    Ok(fp)
}

/// Check whether a transcript file matches what the current kernel produces.
///
/// Returns `false` if the file is missing, invalid, or has drifted.
pub fn is_current<P: AsRef<Path>>(path: P) -> bool {
    let Ok(stored) = Transcript::load(path) else {
        return false;
    };

    Transcript::record(stored.max_iterations()).fingerprint() == stored.fingerprint()
}
