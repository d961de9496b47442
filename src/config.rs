use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{
    error::{StreamError, StreamResult},
    tokenizer::{
        action::VALID_DEFAULT_SIZES,
        types::{Base, Endianness},
    },
};

/// Initial mode of a stream. Reset returns a stream to this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default = "default_endianness")]
    pub endianness: Endianness,

    #[serde(default = "default_base")]
    pub base: Base,

    /// Default size in bytes, 0 for auto-size.
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            endianness: default_endianness(),
            base: default_base(),
            size: default_size(),
        }
    }
}

impl StreamConfig {
    pub fn from_json(content: &str) -> StreamResult<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| StreamError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> StreamResult<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            StreamError::config(format!(
                "Failed to parse config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StreamResult<()> {
        if !VALID_DEFAULT_SIZES.contains(&self.size) {
            return Err(StreamError::config(format!(
                "Bad size {} for default size. Should be 0, 1, 2, 4 or 8",
                self.size
            )));
        }
        Ok(())
    }
}

fn default_endianness() -> Endianness {
    Endianness::Little
}

fn default_base() -> Base {
    Base::Hex
}

fn default_size() -> u64 {
    0
}
