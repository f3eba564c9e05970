// ---------------------------------------------------------------------------
// file_header – Snapshot header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (24 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "FIRE"
//   [4..8]   Format version (u32)
//   [8..16]  Timestamp (Unix epoch, u64)
//   [16..20] Payload size (u32)
//   [20..24] xxHash32 checksum of the payload (everything after the header)

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a wildfire snapshot.
pub const MAGIC: [u8; 4] = *b"FIRE";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Current header/payload format version.
pub const FORMAT_VERSION: u32 = 1;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub timestamp: u64,
    pub payload_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    /// Create a new header for the given payload.
    pub fn new(data: &[u8]) -> Result<Self, SaveError> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(Self {
            format_version: FORMAT_VERSION,
            timestamp,
            payload_size: payload_size(data.len())?,
            checksum: xxh32(data, XXHASH_SEED),
        })
    }
}

/// The header stores the payload length as a u32.
fn payload_size(len: usize) -> Result<u32, SaveError> {
    u32::try_from(len).map_err(|_| SaveError::PayloadTooLarge(len))
}

/// Returns bytes: [header (24 bytes)] ++ [payload].
pub fn wrap_with_header(data: &[u8]) -> Result<Vec<u8>, SaveError> {
    let header = FileHeader::new(data)?;
    let mut out = Vec::with_capacity(HEADER_SIZE + data.len());

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.payload_size.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());

    out.extend_from_slice(data);
    Ok(out)
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse and validate the header, returning it with the payload slice.
///
/// # Errors
///
/// - `Truncated` if the buffer is shorter than the header or the declared payload
/// - `BadMagic` if the buffer does not start with `FIRE`
/// - `VersionMismatch` if the snapshot comes from a newer build
/// - `ChecksumMismatch` if the payload was modified or damaged
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < HEADER_SIZE {
        if bytes.len() >= 4 && bytes[..4] != MAGIC {
            return Err(SaveError::BadMagic([bytes[0], bytes[1], bytes[2], bytes[3]]));
        }
        return Err(SaveError::Truncated {
            len: bytes.len(),
            need: HEADER_SIZE,
        });
    }
    if bytes[..4] != MAGIC {
        return Err(SaveError::BadMagic([bytes[0], bytes[1], bytes[2], bytes[3]]));
    }

    let format_version = le_u32(bytes, 4);
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&bytes[8..16]);
    let timestamp = u64::from_le_bytes(ts);
    let payload_size = le_u32(bytes, 16);
    let checksum = le_u32(bytes, 20);

    if format_version > FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: FORMAT_VERSION,
            found: format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() < payload_size as usize {
        return Err(SaveError::Truncated {
            len: bytes.len(),
            need: HEADER_SIZE + payload_size as usize,
        });
    }
    let payload = &payload[..payload_size as usize];

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(SaveError::ChecksumMismatch {
            expected: checksum,
            found: computed,
        });
    }

    Ok((
        FileHeader {
            format_version,
            timestamp,
            payload_size,
            checksum,
        },
        payload,
    ))
}
