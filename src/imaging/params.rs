//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`process`](crate::process) (which decides what outputs
//! to produce) and the [`backend`](super::backend) (which runs the actual
//! ImageMagick invocation). This separation allows swapping backends (e.g.
//! for testing with a mock) without changing orchestration logic.

use crate::placement::Placement;
use crate::types::Size;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(70)
    }
}

/// Parameters for a resize + re-encode operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub size: Size,
    pub quality: Quality,
    /// Honor the EXIF orientation tag. On for the main output, off for
    /// derivatives (which are cut from the already-oriented main output).
    pub auto_orient: bool,
}

/// Parameters for compositing the watermark onto a finished output, in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeParams {
    pub watermark: PathBuf,
    /// Image to stamp; overwritten in place.
    pub target: PathBuf,
    pub placement: Placement,
    /// Dissolve percentage (opacity of the watermark layer).
    pub dissolve: u32,
}
