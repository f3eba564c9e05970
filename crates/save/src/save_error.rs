// ---------------------------------------------------------------------------
// SaveError: error types for snapshot save/restore
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while writing or restoring a snapshot.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Bitcode encoding failed.
    Encode(String),
    /// Bitcode decoding failed (corrupt or invalid snapshot data).
    Decode(String),
    /// The bytes do not start with the snapshot magic.
    BadMagic([u8; 4]),
    /// Snapshot was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Payload does not hash to the checksum stored in the header.
    ChecksumMismatch { expected: u32, found: u32 },
    /// Fewer bytes than the header (or the declared payload) needs.
    Truncated { len: usize, need: usize },
    /// A required resource was missing from the ECS world or the snapshot.
    MissingResource(String),
    /// Payload length does not fit the header's u32 size field.
    PayloadTooLarge(usize),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::BadMagic(found) => {
                write!(f, "Not a wildfire snapshot (magic bytes {found:02X?})")
            }
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: snapshot is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::ChecksumMismatch { expected, found } => write!(
                f,
                "Snapshot is corrupted: checksum mismatch (expected {expected:#010X}, got {found:#010X})"
            ),
            SaveError::Truncated { len, need } => {
                write!(f, "Snapshot is truncated: {len} bytes, need at least {need}")
            }
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
            SaveError::PayloadTooLarge(len) => {
                write!(f, "Snapshot payload of {len} bytes exceeds the 4 GiB format limit")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
