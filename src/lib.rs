//! # Aquamark
//!
//! Batch image converter that resizes photos and stamps a randomly placed,
//! semi-transparent watermark onto each output. Optionally emits thumbnail
//! and secondary-resize derivatives (never watermarked) into fixed
//! subdirectories next to the main outputs:
//!
//! ```text
//! Output/
//! ├── sample1_wm.jpg
//! ├── sample2_wm.jpg
//! ├── Thumbs/
//! │   ├── sample1_wm.jpg
//! │   └── sample2_wm.jpg
//! └── Resizes/
//!     ├── sample1_wm.jpg
//!     └── sample2_wm.jpg
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `aquamark.toml` loading and the stock defaults behind every CLI flag |
//! | [`scan`] | Non-recursive source-directory listing filtered by configured filetypes |
//! | [`naming`] | Output path resolution: append token, collision counters, derivative subdirectories |
//! | [`placement`] | Randomized watermark placement: 8 anchors × 6 offset presets |
//! | [`imaging`] | The ImageMagick seam: invocation building, execution, structured failures |
//! | [`process`] | Per-image pipeline: resize → derivatives → watermark composite |
//! | [`types`] | `Size` — the `WIDTHxHEIGHT` value shared by CLI, config, and backend |
//!
//! # Design Decisions
//!
//! ## ImageMagick Over In-Process Codecs
//!
//! All pixel work is delegated to `convert`/`composite` subprocesses. The
//! crate's own logic is path resolution, placement policy, and
//! orchestration, which keeps it small and codec-agnostic — anything
//! ImageMagick reads, aquamark handles. Exit statuses are checked and
//! surfaced as structured errors rather than ignored.
//!
//! ## Randomized, Non-Reproducible Placement
//!
//! Each image gets an independent uniform draw of anchor and offset preset.
//! No seed flag is exposed: the scatter across a batch is the feature.
//! Tests inject a seeded RNG through the same entry point.
//!
//! ## Collision Avoidance Over Overwrite
//!
//! When the destination names an existing file, the resolver counts up
//! (`photo1.jpg`, `photo2.jpg`, ...) until it finds an unused name. A batch
//! run can therefore never clobber an earlier output. Single-process model —
//! concurrent writers are out of scope.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod placement;
pub mod process;
pub mod scan;
pub mod types;
