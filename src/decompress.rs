//! Loading and unwrapping compressed program images.
//!
//! An image file is a 4-byte wrapper magic followed by a zstd stream. The
//! stream decompresses to the section container read by [`crate::container`].

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::{MedeaError, Result};

/// Bytes of wrapper header in front of the compressed stream
pub const MAGIC_LEN: usize = 4;

/// Upper bound on the decompressed container size
pub const DEFAULT_CAPACITY: usize = 2 * 1024 * 1024;

/// An owned byte buffer with the capacity it was produced under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl RawBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        let capacity = bytes.len();
        RawBuffer { bytes, capacity }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The first four bytes as text, with non-printable bytes shown as '.'
    pub fn header(&self) -> String {
        self.bytes
            .iter()
            .take(MAGIC_LEN)
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

/// Read a whole file into memory.
pub fn read_entire_file<P: AsRef<Path>>(path: P) -> Result<RawBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MedeaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} bytes from {}", bytes.len(), path.display());
    Ok(RawBuffer::new(bytes))
}

/// Strip the wrapper magic and decompress the stream behind it.
///
/// Fails if the stream is corrupt or would decompress to more than
/// `capacity` bytes.
pub fn decompress(image: &RawBuffer, magic_len: usize, capacity: usize) -> Result<RawBuffer> {
    if image.len() < magic_len {
        return Err(MedeaError::TooShort {
            len: image.len(),
            needed: magic_len,
        });
    }

    let stream = &image.as_bytes()[magic_len..];
    let bytes = zstd::bulk::decompress(stream, capacity)
        .map_err(|source| MedeaError::Decompress { source })?;
    if bytes.len() > capacity {
        return Err(MedeaError::CapacityExceeded {
            size: bytes.len(),
            capacity,
        });
    }

    info!(
        "Decompressed {} bytes to {} bytes",
        stream.len(),
        bytes.len()
    );
    Ok(RawBuffer { bytes, capacity })
}
