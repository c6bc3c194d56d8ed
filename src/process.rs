//! Per-image processing pipeline.
//!
//! One call handles one source image end to end:
//!
//! ```text
//! resolve paths → main resize → thumbnail → secondary resize → watermark
//! ```
//!
//! The ordering is load-bearing: derivatives are cut from the already-resized
//! main output, and the watermark is composited last so it lands on the final
//! main-output geometry and never taints a derivative.
//!
//! A source path that is a directory is a silent no-op (`Ok(None)`) —
//! traversal is the driver's job, not this module's.

use crate::imaging::{BackendError, CompositeParams, ImageBackend, Quality, ResizeParams};
use crate::naming::{ResolveRequest, ResolvedOutputs, resolve_outputs};
use crate::placement::Placement;
use crate::types::Size;
use rand::Rng;
use std::path::Path;
use thiserror::Error;

/// Encoding quality for the main output.
const MAIN_QUALITY: u32 = 70;
/// Encoding quality for thumbnail/resize derivatives.
const DERIVATIVE_QUALITY: u32 = 80;
/// Watermark layer opacity, percent.
const DISSOLVE: u32 = 20;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("image processing failed: {0}")]
    Backend(#[from] BackendError),
}

/// Everything needed to process one source image.
#[derive(Debug, Clone)]
pub struct ProcessRequest<'a> {
    pub source: &'a Path,
    /// Directory, existing file, or fresh explicit filename.
    pub destination: &'a Path,
    pub watermark: &'a Path,
    pub output_size: Size,
    /// Appended to the stem when the destination is a directory.
    pub append: &'a str,
    /// Explicit output base filename, overriding the source's.
    pub explicit_name: Option<&'a str>,
    /// Thumbnail derivative size, when enabled.
    pub thumbnail: Option<Size>,
    /// Secondary resize derivative size, when enabled.
    pub resize: Option<Size>,
    /// Subdirectory name for thumbnails.
    pub thumbnail_dir: &'a str,
    /// Subdirectory name for secondary resizes.
    pub resize_dir: &'a str,
}

/// Report of what one processing call produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub outputs: ResolvedOutputs,
    pub placement: Placement,
}

/// Process one source image: resize, optional derivatives, watermark.
///
/// Returns `Ok(None)` without touching the filesystem when the source is a
/// directory.
pub fn process_image(
    backend: &impl ImageBackend,
    rng: &mut impl Rng,
    req: &ProcessRequest<'_>,
) -> Result<Option<Outcome>, ProcessError> {
    if req.source.is_dir() {
        return Ok(None);
    }

    let outputs = resolve_outputs(&ResolveRequest {
        source: req.source,
        destination: req.destination,
        explicit_name: req.explicit_name,
        append: req.append,
        thumbnail_dir: req.thumbnail.map(|_| req.thumbnail_dir),
        resize_dir: req.resize.map(|_| req.resize_dir),
    });

    backend.resize(&ResizeParams {
        source: req.source.to_path_buf(),
        output: outputs.main.clone(),
        size: req.output_size,
        quality: Quality::new(MAIN_QUALITY),
        auto_orient: true,
    })?;

    // Derivatives are cut from the main output, before it is watermarked.
    if let (Some(size), Some(path)) = (req.thumbnail, &outputs.thumbnail) {
        backend.resize(&ResizeParams {
            source: outputs.main.clone(),
            output: path.clone(),
            size,
            quality: Quality::new(DERIVATIVE_QUALITY),
            auto_orient: false,
        })?;
    }
    if let (Some(size), Some(path)) = (req.resize, &outputs.resize) {
        backend.resize(&ResizeParams {
            source: outputs.main.clone(),
            output: path.clone(),
            size,
            quality: Quality::new(DERIVATIVE_QUALITY),
            auto_orient: false,
        })?;
    }

    let placement = Placement::choose(rng, req.output_size);
    backend.composite(&CompositeParams {
        watermark: req.watermark.to_path_buf(),
        target: outputs.main.clone(),
        placement,
        dissolve: DISSOLVE,
    })?;

    Ok(Some(Outcome { outputs, placement }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use tempfile::TempDir;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn full_request<'a>(source: &'a Path, dest: &'a Path, wm: &'a Path) -> ProcessRequest<'a> {
        ProcessRequest {
            source,
            destination: dest,
            watermark: wm,
            output_size: Size::new(640, 480),
            append: "_wm",
            explicit_name: None,
            thumbnail: Some(Size::new(60, 40)),
            resize: Some(Size::new(200, 400)),
            thumbnail_dir: "Thumbs",
            resize_dir: "Resizes",
        }
    }

    #[test]
    fn directory_source_is_a_silent_noop() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        let backend = MockBackend::new();

        let outcome = process_image(
            &backend,
            &mut rng(),
            &full_request(tmp.path(), &dest, Path::new("wm.png")),
        )
        .unwrap();

        assert!(outcome.is_none());
        assert!(backend.get_operations().is_empty());
        // No directories were created either.
        assert!(!dest.exists());
    }

    #[test]
    fn operations_run_in_pipeline_order() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        fs::write(&source, "").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let backend = MockBackend::new();

        let outcome = process_image(
            &backend,
            &mut rng(),
            &full_request(&source, &dest, Path::new("wm.png")),
        )
        .unwrap()
        .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 4);
        // Main resize first, auto-oriented at quality 70.
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                quality: 70,
                auto_orient: true,
                ..
            }
        ));
        // Then the two derivatives at quality 80, cut from the main output.
        let main = outcome.outputs.main.to_string_lossy().to_string();
        for op in &ops[1..3] {
            match op {
                RecordedOp::Resize {
                    source,
                    quality,
                    auto_orient,
                    ..
                } => {
                    assert_eq!(source, &main);
                    assert_eq!(*quality, 80);
                    assert!(!auto_orient);
                }
                other => panic!("expected derivative resize, got {other:?}"),
            }
        }
        // Watermark compositing is last.
        assert!(matches!(&ops[3], RecordedOp::Composite { .. }));
    }

    #[test]
    fn only_the_main_output_is_watermarked() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        fs::write(&source, "").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let backend = MockBackend::new();

        let outcome = process_image(
            &backend,
            &mut rng(),
            &full_request(&source, &dest, Path::new("wm.png")),
        )
        .unwrap()
        .unwrap();

        let composites: Vec<_> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Composite { target, .. } => Some(target),
                _ => None,
            })
            .collect();
        assert_eq!(
            composites,
            [outcome.outputs.main.to_string_lossy().to_string()]
        );
    }

    #[test]
    fn derivatives_are_skipped_when_disabled() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        fs::write(&source, "").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let backend = MockBackend::new();

        let outcome = process_image(
            &backend,
            &mut rng(),
            &ProcessRequest {
                thumbnail: None,
                resize: None,
                ..full_request(&source, &dest, Path::new("wm.png"))
            },
        )
        .unwrap()
        .unwrap();

        assert!(outcome.outputs.thumbnail.is_none());
        assert!(outcome.outputs.resize.is_none());
        // Just the main resize and the composite.
        assert_eq!(backend.get_operations().len(), 2);
        assert!(!dest.join("Thumbs").exists());
        assert!(!dest.join("Resizes").exists());
    }

    #[test]
    fn composite_carries_dissolve_and_placement() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        fs::write(&source, "").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let backend = MockBackend::new();

        let outcome = process_image(
            &backend,
            &mut rng(),
            &full_request(&source, &dest, Path::new("wm.png")),
        )
        .unwrap()
        .unwrap();

        let ops = backend.get_operations();
        match &ops[3] {
            RecordedOp::Composite {
                gravity,
                geometry,
                dissolve,
                watermark,
                ..
            } => {
                assert_eq!(*dissolve, 20);
                assert_eq!(watermark, "wm.png");
                assert_eq!(*gravity, outcome.placement.anchor.gravity());
                assert_eq!(*geometry, outcome.placement.geometry());
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn backend_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        fs::write(&source, "").unwrap();
        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let backend = MockBackend::failing_after(0);

        let result = process_image(
            &backend,
            &mut rng(),
            &full_request(&source, &dest, Path::new("wm.png")),
        );
        assert!(matches!(
            result,
            Err(ProcessError::Backend(
                BackendError::ConversionFailed { .. }
            ))
        ));
    }
}
