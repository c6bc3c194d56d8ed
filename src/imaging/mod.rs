//! Image processing — thin orchestration over ImageMagick.
//!
//! All pixel work is delegated to external tool invocations; this module's
//! job is describing those invocations precisely and reporting when they
//! fail.
//!
//! - **Parameters**: data structures describing an operation
//! - **Backend**: [`ImageBackend`] trait, so tests can run against a mock
//! - **Magick**: the production backend shelling out to `convert`/`composite`

pub mod backend;
pub mod magick;
mod params;

pub use backend::{BackendError, ImageBackend};
pub use magick::MagickBackend;
pub use params::{CompositeParams, Quality, ResizeParams};
