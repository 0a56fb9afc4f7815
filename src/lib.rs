//! RustBarcode - locate barcode regions in images
//!
//! Bars of a linear barcode show up as many small, strongly elongated dark
//! regions sharing one orientation. This crate detects those regions,
//! clusters them by angle and proximity, and reports one oriented bounding
//! rectangle per barcode. It does not decode payloads.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Locator configuration and its loaders
pub mod config;
/// Dark-region detection feeding the locator
pub mod detector;
/// Error type shared by every stage
pub mod error;
/// Core clustering pipeline (normalize, merge, cluster, group, bound)
pub mod locator;
/// Core data structures (OrientedRect, RawRect, Point, BitMatrix)
pub mod models;
/// Per-run counters and stage timings
pub mod telemetry;
/// Image and JSON loading helpers used by the CLI
pub mod tools;
/// Utility functions (grayscale, sharpening, binarization, geometry)
pub mod utils;

mod pipeline;

pub use config::LocatorConfig;
pub use error::LocateError;
pub use models::{ImageBounds, OrientedRect, Point, RawRect, RectGroup};
pub use telemetry::{LocateTelemetry, RunTimings, StageTiming};

use pipeline::{Run, into_outcome};
use rayon::prelude::*;
use serde::Serialize;
use utils::grayscale::rgb_to_grayscale;

/// Outcome of a locate call: `Ok(None)` means no barcode was found
pub type LocateOutcome = error::Result<Option<Vec<OrientedRect>>>;

/// Borrowed RGB image, 3 bytes per pixel
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Packed RGB bytes
    pub rgb: &'a [u8],
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

/// Everything learned during one run
#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    /// Barcode rectangles, or `None` when nothing qualified
    pub barcodes: Option<Vec<OrientedRect>>,
    /// Stage counters
    pub telemetry: LocateTelemetry,
    /// Stage timings
    pub timings: RunTimings,
}

/// Locate barcodes in an RGB image with the default configuration
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Oriented rectangles around each barcode, `None` when there is none
pub fn locate(image: &[u8], width: usize, height: usize) -> LocateOutcome {
    Locator::new().locate_image(image, width, height)
}

/// Run the clustering core on rectangles from an external region detector.
///
/// `bounds`, when given, clips rectangles and bounding corners to the image.
pub fn locate_rects(
    raw: &[RawRect],
    bounds: Option<ImageBounds>,
    config: &LocatorConfig,
) -> LocateOutcome {
    config.validate()?;
    let mut run = Run::new(config);
    let result = run.locate(raw, bounds);
    run.finish();
    into_outcome(result)
}

/// Locate barcodes in many images, one independent run per image in parallel
pub fn locate_batch(frames: &[Frame<'_>], config: &LocatorConfig) -> Vec<LocateOutcome> {
    if let Err(err) = config.validate() {
        let reason = err.to_string();
        return frames
            .iter()
            .map(|_| Err(LocateError::InvalidConfig(reason.clone())))
            .collect();
    }
    let locator = Locator {
        config: config.clone(),
    };
    frames
        .par_iter()
        .map(|frame| locator.locate_image(frame.rgb, frame.width, frame.height))
        .collect()
}

/// Barcode locator holding a validated configuration
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: LocatorConfig,
}

impl Locator {
    /// Create a locator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locator with a custom configuration
    pub fn with_config(config: LocatorConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate barcodes in an RGB image
    pub fn locate_image(&self, image: &[u8], width: usize, height: usize) -> LocateOutcome {
        self.report_image(image, width, height)
            .map(|report| report.barcodes)
    }

    /// Locate barcodes in a grayscale image (1 byte per pixel)
    pub fn locate_gray(&self, gray: &[u8], width: usize, height: usize) -> LocateOutcome {
        self.report_gray(gray, width, height)
            .map(|report| report.barcodes)
    }

    /// Run the core on externally detected rectangles
    pub fn locate_rects(&self, raw: &[RawRect], bounds: Option<ImageBounds>) -> LocateOutcome {
        self.report_rects(raw, bounds).map(|report| report.barcodes)
    }

    /// First barcode only
    pub fn locate_single(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> error::Result<Option<OrientedRect>> {
        let barcodes = self.locate_image(image, width, height)?;
        Ok(barcodes.and_then(|rects| rects.into_iter().next()))
    }

    /// Full run on an RGB image, with telemetry and timings
    pub fn report_image(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> error::Result<LocateReport> {
        check_buffer(image.len(), width, height, 3)?;
        let gray = rgb_to_grayscale(image, width, height);
        self.report_gray(&gray, width, height)
    }

    /// Full run on a grayscale image, with telemetry and timings
    pub fn report_gray(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> error::Result<LocateReport> {
        check_buffer(gray.len(), width, height, 1)?;
        let mut run = Run::new(&self.config);
        let raw = run.detect_regions(gray, width, height);
        let result = run.locate(&raw, Some(ImageBounds::new(width, height)));
        Self::into_report(run, result)
    }

    /// Core run on external rectangles, with telemetry and timings
    pub fn report_rects(
        &self,
        raw: &[RawRect],
        bounds: Option<ImageBounds>,
    ) -> error::Result<LocateReport> {
        let mut run = Run::new(&self.config);
        let result = run.locate(raw, bounds);
        Self::into_report(run, result)
    }

    fn into_report(
        run: Run<'_>,
        result: error::Result<Vec<OrientedRect>>,
    ) -> error::Result<LocateReport> {
        let (telemetry, timings) = run.finish();
        let barcodes = into_outcome(result)?;
        Ok(LocateReport {
            barcodes,
            telemetry,
            timings,
        })
    }
}

fn check_buffer(len: usize, width: usize, height: usize, channels: usize) -> error::Result<()> {
    let needed = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(channels))
        .ok_or_else(|| LocateError::InvalidImage(format!("{width}x{height} overflows")))?;
    if len < needed {
        return Err(LocateError::InvalidImage(format!(
            "{width}x{height} with {channels} channel(s) needs {needed} bytes, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_empty_image() {
        let image = vec![255u8; 300];
        assert!(locate(&image, 10, 10).unwrap().is_none());
    }

    #[test]
    fn test_short_buffer_is_an_error() {
        let image = vec![0u8; 10];
        assert!(matches!(
            locate(&image, 10, 10),
            Err(LocateError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LocatorConfig {
            merge_divisor: -1.0,
            ..LocatorConfig::default()
        };
        assert!(Locator::with_config(config.clone()).is_err());
        assert!(matches!(
            locate_rects(&[], None, &config),
            Err(LocateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_locate_gray_matches_rgb() {
        let (width, height) = (160, 120);
        let mut gray = vec![255u8; width * height];
        for bar in 0..20 {
            let x0 = 20 + bar * 6;
            for y in 30..90 {
                gray[y * width + x0..y * width + x0 + 3].fill(0);
            }
        }
        let rgb: Vec<u8> = gray.iter().flat_map(|&v| [v, v, v]).collect();

        let locator = Locator::new();
        let from_gray = locator.locate_gray(&gray, width, height).unwrap();
        assert_eq!(from_gray.as_ref().map(Vec::len), Some(1));
        assert_eq!(from_gray, locator.locate_image(&rgb, width, height).unwrap());

        assert!(matches!(
            locator.locate_gray(&gray[..100], width, height),
            Err(LocateError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_report_counts_stages() {
        let report = Locator::new().report_rects(&[], None).unwrap();
        assert!(report.barcodes.is_none());
        assert_eq!(report.telemetry.raw_rects, 0);
        assert!(report.timings.stage("normalization").is_some());
    }
}
