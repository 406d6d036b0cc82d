use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::detection::{contours, preprocessing};
use crate::error::{Error, Result};
use crate::models::Region;

/// Intermediate images of one extraction, kept for debug output
#[derive(Debug, Clone)]
pub struct ExtractionStages {
    pub grayscale: GrayImage,
    pub blurred: GrayImage,
    pub edges: GrayImage,
    pub regions: Vec<Region>,
}

/// Turns a raster image into candidate tablet regions.
///
/// Stateless apart from its validated configuration, so one extractor can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    config: ExtractorConfig,
}

impl RegionExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Candidate regions of `img` in contour discovery order
    pub fn extract(&self, img: &DynamicImage) -> Result<Vec<Region>> {
        Ok(self.extract_stages(img)?.regions)
    }

    /// Same as [`extract`](Self::extract) but also hands back every intermediate image
    pub fn extract_stages(&self, img: &DynamicImage) -> Result<ExtractionStages> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage { width, height });
        }

        let grayscale = preprocessing::to_grayscale(img);
        let blurred = preprocessing::apply_blur(&grayscale, self.config.kernel_size);
        let edges = preprocessing::detect_edges(
            &blurred,
            self.config.low_threshold,
            self.config.high_threshold,
        );

        let all_contours = contours::find_outer_contours(&edges);
        debug!("Found {} outer contours in {}x{} image", all_contours.len(), width, height);

        let regions: Vec<Region> = all_contours
            .iter()
            .filter(|c| c.area() > self.config.min_region_area)
            .filter_map(|c| c.bounding_box())
            .filter(|r| r.fits_within(width, height))
            .collect();

        debug!(
            "Kept {} regions above {} px² (from {} contours)",
            regions.len(),
            self.config.min_region_area,
            all_contours.len()
        );

        Ok(ExtractionStages {
            grayscale,
            blurred,
            edges,
            regions,
        })
    }
}
