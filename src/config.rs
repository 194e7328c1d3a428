use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::decompress::{DEFAULT_CAPACITY, MAGIC_LEN};
use crate::error::{MedeaError, Result};

/// Which parts of the report to produce and how to unwrap the image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on the decompressed size in bytes
    pub capacity: usize,
    /// Wrapper header bytes before the compressed stream
    pub magic_len: usize,
    pub summary: bool,
    pub sections: bool,
    pub hexdump: bool,
    pub listing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: DEFAULT_CAPACITY,
            magic_len: MAGIC_LEN,
            summary: true,
            sections: true,
            hexdump: true,
            listing: true,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |message: String| MedeaError::Config {
            path: path.to_path_buf(),
            message,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        Self::from_toml(&text).map_err(|e| config_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.capacity, 2 * 1024 * 1024);
        assert_eq!(config.magic_len, 4);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml("capacity = 4096\nhexdump = false\n").unwrap();
        assert_eq!(config.capacity, 4096);
        assert!(!config.hexdump);
        assert!(config.listing);
        assert!(config.summary);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/medea.toml").unwrap_err();
        assert_eq!(err.stage(), "config");
    }
}
