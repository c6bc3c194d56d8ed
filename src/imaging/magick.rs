//! ImageMagick backend.
//!
//! Shells out to the classic `convert` and `composite` binaries. Two
//! invocation shapes exist:
//!
//! - resize: `convert -quality N% [-auto-orient] SRC -resize WxH OUT`
//! - composite: `convert WM -fill grey50 miff:- | composite -dissolve N
//!   -geometry +dx+dy -gravity G - OUT OUT` — the watermark is tinted in a
//!   first process and streamed as MIFF into the compositor, which
//!   overwrites the output in place.
//!
//! Exit statuses are checked; a non-zero status or spawn failure surfaces as
//! a structured [`BackendError`] carrying the offending path and the
//! rendered invocation. In dry-run mode the commands are printed instead of
//! executed.

use super::backend::{BackendError, ImageBackend};
use super::params::{CompositeParams, ResizeParams};
use log::debug;
use std::process::{Command, Stdio};

pub struct MagickBackend {
    dry_run: bool,
}

impl MagickBackend {
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    /// Print invocations instead of executing them.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

impl Default for MagickBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn resize_args(params: &ResizeParams) -> Vec<String> {
    let mut args = vec![
        "-quality".to_string(),
        format!("{}%", params.quality.value()),
    ];
    if params.auto_orient {
        args.push("-auto-orient".to_string());
    }
    args.push(params.source.to_string_lossy().into_owned());
    args.push("-resize".to_string());
    args.push(params.size.to_string());
    args.push(params.output.to_string_lossy().into_owned());
    args
}

/// First half of the composite pipeline: tint the watermark and stream it
/// out as MIFF.
fn tint_args(params: &CompositeParams) -> Vec<String> {
    vec![
        params.watermark.to_string_lossy().into_owned(),
        "-fill".to_string(),
        "grey50".to_string(),
        "miff:-".to_string(),
    ]
}

/// Second half: blend stdin onto the target at the chosen placement.
fn composite_args(params: &CompositeParams) -> Vec<String> {
    let target = params.target.to_string_lossy().into_owned();
    vec![
        "-dissolve".to_string(),
        params.dissolve.to_string(),
        "-geometry".to_string(),
        params.placement.geometry(),
        "-gravity".to_string(),
        params.placement.anchor.gravity().to_string(),
        "-".to_string(),
        target.clone(),
        target,
    ]
}

fn render(program: &str, args: &[String]) -> String {
    let mut out = String::from(program);
    for arg in args {
        out.push(' ');
        if arg.contains(' ') {
            out.push('"');
            out.push_str(arg);
            out.push('"');
        } else {
            out.push_str(arg);
        }
    }
    out
}

impl ImageBackend for MagickBackend {
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let args = resize_args(params);
        let invocation = render("convert", &args);
        if self.dry_run {
            println!("{invocation}");
            return Ok(());
        }
        debug!("{invocation}");

        let failed = || BackendError::ConversionFailed {
            path: params.output.to_string_lossy().to_string(),
            invocation: invocation.clone(),
        };
        let status = Command::new("convert")
            .args(&args)
            .status()
            .map_err(|_| failed())?;
        if !status.success() {
            return Err(failed());
        }
        Ok(())
    }

    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError> {
        let tint = tint_args(params);
        let blend = composite_args(params);
        let invocation = format!(
            "{} | {}",
            render("convert", &tint),
            render("composite", &blend)
        );
        if self.dry_run {
            println!("{invocation}");
            return Ok(());
        }
        debug!("{invocation}");

        let failed = || BackendError::CompositeFailed {
            path: params.target.to_string_lossy().to_string(),
            invocation: invocation.clone(),
        };

        let mut tinter = Command::new("convert")
            .args(&tint)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|_| failed())?;
        let tinted = tinter.stdout.take().ok_or_else(failed)?;

        let status = Command::new("composite")
            .args(&blend)
            .stdin(Stdio::from(tinted))
            .status()
            .map_err(|_| failed())?;
        let tint_status = tinter.wait().map_err(|_| failed())?;

        if !status.success() || !tint_status.success() {
            return Err(failed());
        }
        Ok(())
    }
}
