use crate::config::LocatorConfig;
use crate::detector::RegionDetector;
use crate::error::{LocateError, Result};
use crate::locator::{
    bounding_rect, cluster_by_angle, group_candidates, merge_adjacent, normalize_all,
};
use crate::models::{ImageBounds, OrientedRect, RawRect, RectGroup};
use crate::telemetry::{LocateTelemetry, RunTimings, StageClock};
use crate::utils::binarization::otsu_binarize;
use crate::utils::sharpen::sharpen;
use log::debug;

/// State owned by one locate run
pub(crate) struct Run<'a> {
    config: &'a LocatorConfig,
    clock: StageClock,
    pub(crate) telemetry: LocateTelemetry,
}

impl<'a> Run<'a> {
    pub(crate) fn new(config: &'a LocatorConfig) -> Self {
        Self {
            config,
            clock: StageClock::start(config.runtime_reporting),
            telemetry: LocateTelemetry::default(),
        }
    }

    pub(crate) fn finish(self) -> (LocateTelemetry, RunTimings) {
        (self.telemetry, self.clock.finish())
    }

    /// Grayscale pixels to raw detector rectangles
    pub(crate) fn detect_regions(
        &mut self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Vec<RawRect> {
        let prepared;
        let source = if self.config.sharpen {
            prepared = sharpen(gray, width, height);
            &prepared[..]
        } else {
            gray
        };
        let binary = otsu_binarize(source, width, height);
        self.clock.lap("preprocessing");

        let regions = RegionDetector::for_image(self.config, width, height).detect(&binary);
        self.clock.lap("region detection");
        debug!("region detector produced {} rectangles", regions.len());
        regions
    }

    /// Normalize, merge, cluster and select
    pub(crate) fn locate(
        &mut self,
        raw: &[RawRect],
        bounds: Option<ImageBounds>,
    ) -> Result<Vec<OrientedRect>> {
        let config = self.config;
        self.telemetry.raw_rects = raw.len();

        let normalized = normalize_all(raw, config.elongation_threshold, bounds);
        self.telemetry.normalized = normalized.len();
        self.clock.lap("normalization");
        if normalized.len() < config.min_input_rects {
            return Err(LocateError::InputTooSparse {
                found: normalized.len(),
                required: config.min_input_rects,
            });
        }

        let merged = merge_adjacent(normalized, config.merge_divisor, bounds);
        self.telemetry.merged = merged.len();
        self.clock.lap("merging");

        let clusters = cluster_by_angle(merged, config.minimum_group_mass);
        self.telemetry.clusters = clusters.len();
        self.clock.lap("clustering");
        if clusters.is_empty() {
            return Err(LocateError::NoQualifyingCluster);
        }

        let barcodes = self.select_barcodes(&clusters, bounds);
        self.clock.lap("selection");
        let barcodes = barcodes?;
        self.telemetry.barcodes = barcodes.len();
        Ok(barcodes)
    }

    /// One bounding rectangle per qualifying candidate of every cluster.
    /// A cluster without candidates, or a candidate that cannot be bounded,
    /// is skipped without affecting its siblings.
    fn select_barcodes(
        &mut self,
        clusters: &[RectGroup],
        bounds: Option<ImageBounds>,
    ) -> Result<Vec<OrientedRect>> {
        let mut barcodes = Vec::new();
        for (cluster_idx, cluster) in clusters.iter().enumerate() {
            let candidates = match group_candidates(
                cluster,
                self.config.proximity_multiplier,
                self.config.minimum_group_mass,
            ) {
                Ok(candidates) => candidates,
                Err(err) if err.is_no_barcode() => {
                    debug!("cluster {cluster_idx} ({} rects): {err}", cluster.len());
                    continue;
                }
                Err(err) => return Err(err),
            };
            self.telemetry.candidates += candidates.len();

            for candidate in &candidates {
                match bounding_rect(candidate, bounds) {
                    Ok(rect) => barcodes.push(rect),
                    Err(err) if err.is_no_barcode() => {
                        debug!("cluster {cluster_idx}: dropping candidate: {err}");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if barcodes.is_empty() {
            return Err(LocateError::NoQualifyingCandidate);
        }
        Ok(barcodes)
    }
}

/// Map the "no barcode" error kinds to `Ok(None)`; everything else propagates
pub(crate) fn into_outcome(result: Result<Vec<OrientedRect>>) -> Result<Option<Vec<OrientedRect>>> {
    match result {
        Ok(barcodes) => Ok(Some(barcodes)),
        Err(err) if err.is_no_barcode() => {
            debug!("no barcode: {err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
