//! Section container found inside a decompressed image.
//!
//! The container is a flat run of sections, each laid out as
//!
//! ```text
//! u8   kind     0 = unknown, 1 = SIN, 2 = SCODE, 3 = SMAIN
//! u16  length   payload size in 16-bit words, little-endian
//! ..   payload  length * 2 bytes
//! ```
//!
//! Regions borrow from the decompressed buffer and never copy it.

use log::{debug, info, warn};
use std::fmt::{Display, Error, Formatter};

use crate::error::{MedeaError, Result};

/// Size of a section header in bytes
pub const SECTION_HEADER_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Unknown = 0,
    /// Input memory
    Input = 1,
    /// Code memory
    Code = 2,
    /// General purpose memory
    Main = 3,
}

impl SectionKind {
    /// Normalise a raw kind byte; anything outside 1..=3 is `Unknown`.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => SectionKind::Input,
            2 => SectionKind::Code,
            3 => SectionKind::Main,
            _ => SectionKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Unknown => "SERROR",
            SectionKind::Input => "SIN",
            SectionKind::Code => "SCODE",
            SectionKind::Main => "SMAIN",
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        f.pad(self.label())
    }
}

/// One section header as seen while walking the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    pub kind: SectionKind,
    /// Kind byte before normalisation
    pub raw_kind: u8,
    /// Byte offset of the header
    pub offset: usize,
    /// Payload length in words
    pub words: u16,
}

impl SectionInfo {
    pub fn byte_size(&self) -> usize {
        self.words as usize * 2
    }

    /// Byte offset of the payload
    pub fn payload_offset(&self) -> usize {
        self.offset + SECTION_HEADER_SIZE
    }

    /// Byte offset just past the payload
    pub fn end(&self) -> usize {
        self.payload_offset() + self.byte_size()
    }
}

impl Display for SectionInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        write!(f, "Section {:<6} [SIZE {}]", self.kind, self.byte_size())
    }
}

/// Read-only view of one named region of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion<'a> {
    kind: SectionKind,
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> MemoryRegion<'a> {
    /// Wrap a payload that starts at byte `offset` of its buffer.
    /// A trailing odd byte is not part of any word and is ignored.
    pub fn new(kind: SectionKind, offset: usize, bytes: &'a [u8]) -> Self {
        let bytes = &bytes[..bytes.len() & !1];
        MemoryRegion {
            kind,
            offset,
            bytes,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Byte offset of the region within the decompressed buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in words
    pub fn len(&self) -> usize {
        self.bytes.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Read the word at `index`, `None` past the end.
    pub fn word(&self, index: usize) -> Option<u16> {
        let start = index.checked_mul(2)?;
        let pair = self.bytes.get(start..start.checked_add(2)?)?;
        Some(u16::from_le_bytes([pair[0], pair[1]]))
    }

    pub fn words(&self) -> impl Iterator<Item = u16> + 'a {
        self.bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }
}

/// The three regions of a loaded program.
#[derive(Debug, Clone, Default)]
pub struct Program<'a> {
    /// Input memory
    pub sin: Option<MemoryRegion<'a>>,
    /// Code memory
    pub scode: Option<MemoryRegion<'a>>,
    /// General purpose memory
    pub smain: Option<MemoryRegion<'a>>,
    sections: Vec<SectionInfo>,
}

impl<'a> Program<'a> {
    /// Walk the container and collect its regions.
    ///
    /// A repeated section kind replaces the earlier region of that kind.
    /// Unknown kinds are skipped but still consume their payload.
    pub fn parse(image: &'a [u8]) -> Result<Program<'a>> {
        let mut program = Program::default();
        let mut cur = 0;

        while cur < image.len() {
            let available = image.len() - cur;
            if available < SECTION_HEADER_SIZE {
                return Err(MedeaError::MalformedSection {
                    offset: cur,
                    needed: SECTION_HEADER_SIZE,
                    available,
                });
            }

            let raw_kind = image[cur];
            let words = u16::from_le_bytes([image[cur + 1], image[cur + 2]]);
            let info = SectionInfo {
                kind: SectionKind::from_byte(raw_kind),
                raw_kind,
                offset: cur,
                words,
            };

            if info.end() > image.len() {
                return Err(MedeaError::MalformedSection {
                    offset: cur,
                    needed: SECTION_HEADER_SIZE + info.byte_size(),
                    available,
                });
            }

            info!(
                "Section {} at {:#06x}: {} words",
                info.kind.label(),
                cur,
                words
            );

            let payload = &image[info.payload_offset()..info.end()];
            let region = MemoryRegion::new(info.kind, info.payload_offset(), payload);
            let slot = match info.kind {
                SectionKind::Input => Some(&mut program.sin),
                SectionKind::Code => Some(&mut program.scode),
                SectionKind::Main => Some(&mut program.smain),
                SectionKind::Unknown => {
                    warn!(
                        "Skipping section with unknown kind {} at {:#06x}",
                        raw_kind, cur
                    );
                    None
                }
            };
            if let Some(slot) = slot {
                if let Some(previous) = slot.replace(region) {
                    warn!(
                        "Section {} at {:#06x} replaces the one at {:#06x}",
                        info.kind.label(),
                        cur,
                        previous.offset() - SECTION_HEADER_SIZE
                    );
                }
            }

            program.sections.push(info);
            cur = info.end();
        }

        debug!(
            "Parsed {} sections from {} bytes",
            program.sections.len(),
            image.len()
        );
        Ok(program)
    }

    pub fn region(&self, kind: SectionKind) -> Option<&MemoryRegion<'a>> {
        match kind {
            SectionKind::Input => self.sin.as_ref(),
            SectionKind::Code => self.scode.as_ref(),
            SectionKind::Main => self.smain.as_ref(),
            SectionKind::Unknown => None,
        }
    }

    /// The code region, or `MissingSection` if the container had none.
    pub fn code(&self) -> Result<&MemoryRegion<'a>> {
        self.scode.as_ref().ok_or(MedeaError::MissingSection {
            kind: SectionKind::Code,
        })
    }

    /// Every section header encountered, in stream order.
    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }
}
