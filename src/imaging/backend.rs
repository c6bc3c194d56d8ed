//! Image processing backend trait.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: resize and composite. The production implementation is
//! [`MagickBackend`](super::magick::MagickBackend), which shells out to
//! ImageMagick; tests use a mock that records the requested operations.

use super::params::{CompositeParams, ResizeParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("conversion failed for {path}: `{invocation}`")]
    ConversionFailed { path: String, invocation: String },
    #[error("watermark composite failed for {path}: `{invocation}`")]
    CompositeFailed { path: String, invocation: String },
}

/// Trait for image processing backends.
///
/// Both operations must be implemented so the orchestration code is
/// backend-agnostic. Each one is a side effect on the filesystem; the
/// backend reports failure instead of silently continuing.
pub trait ImageBackend {
    /// Resize + re-encode `source` into `output`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Blend the watermark onto the target image at the chosen placement,
    /// overwriting the target in place.
    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError>;
}
