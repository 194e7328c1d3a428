use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::container::SectionKind;

#[derive(Error, Debug)]
pub enum MedeaError {
    #[error("Cannot read image '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image is {len} bytes, need at least {needed} for the wrapper header")]
    TooShort { len: usize, needed: usize },

    #[error("Decompression failed: {source}")]
    Decompress {
        #[source]
        source: io::Error,
    },

    #[error("Decompressed size {size} exceeds capacity {capacity}")]
    CapacityExceeded { size: usize, capacity: usize },

    #[error("Malformed section at byte {offset:#x}: needs {needed} bytes, {available} available")]
    MalformedSection {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Section {kind} not present in container")]
    MissingSection { kind: SectionKind },

    #[error("Truncated instruction at word {cursor:#06x}: needs {needed} words, region has {len}")]
    TruncatedInstruction {
        cursor: usize,
        needed: usize,
        len: usize,
    },

    #[error("Invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl MedeaError {
    /// Pipeline stage that failed, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            MedeaError::Read { .. } | MedeaError::TooShort { .. } => "read",
            MedeaError::Decompress { .. } | MedeaError::CapacityExceeded { .. } => "decompress",
            MedeaError::MalformedSection { .. } => "parse",
            MedeaError::MissingSection { .. } | MedeaError::TruncatedInstruction { .. } => {
                "decode"
            }
            MedeaError::Config { .. } => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, MedeaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_stage_names() {
        let err = MedeaError::TruncatedInstruction {
            cursor: 4,
            needed: 2,
            len: 5,
        };
        assert_eq!(err.stage(), "decode");
        assert!(err.to_string().contains("0x0004"));

        let err = MedeaError::MalformedSection {
            offset: 3,
            needed: 10,
            available: 2,
        };
        assert_eq!(err.stage(), "parse");

        let err = MedeaError::MissingSection {
            kind: SectionKind::Code,
        };
        assert_eq!(err.to_string(), "Section SCODE not present in container");
    }
}
