//! Shared value types.
//!
//! [`Size`] is the one type every layer touches: the CLI parses it from
//! `WIDTHxHEIGHT` flags, the config file stores it as a TOML string, and the
//! imaging backend renders it back into an ImageMagick `-resize` argument.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid size '{0}', expected WIDTHxHEIGHT (e.g. 640x480)")]
pub struct ParseSizeError(String);

/// A target output size in pixels, written as `640x480`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseSizeError(s.to_string()))?;
        let width: u32 = w.trim().parse().map_err(|_| ParseSizeError(s.to_string()))?;
        let height: u32 = h.trim().parse().map_err(|_| ParseSizeError(s.to_string()))?;
        if width == 0 || height == 0 {
            return Err(ParseSizeError(s.to_string()));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<String> for Size {
    type Error = ParseSizeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.to_string()
    }
}
