pub mod contours;
pub mod extractor;
pub mod preprocessing;

use image::DynamicImage;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::matching::{MatchContext, MatchPolicy};
use crate::models::{DetectionResult, Region};

pub use extractor::{ExtractionStages, RegionExtractor};

/// Extraction followed by matching, end to end
pub struct DetectionPipeline {
    extractor: RegionExtractor,
    policy: Box<dyn MatchPolicy>,
}

impl DetectionPipeline {
    /// Build a pipeline; configuration errors surface here rather than per call
    pub fn new(config: ExtractorConfig, policy: Box<dyn MatchPolicy>) -> Result<Self> {
        Ok(Self {
            extractor: RegionExtractor::new(config)?,
            policy,
        })
    }

    pub fn extractor(&self) -> &RegionExtractor {
        &self.extractor
    }

    /// Run the full detection pipeline on an image
    pub fn detect(&self, img: &DynamicImage) -> Result<DetectionResult> {
        let regions = self.extractor.extract(img)?;
        Ok(resolve(img, regions, self.policy.as_ref()))
    }

    /// Like [`detect`](Self::detect) but also returns the intermediate images
    pub fn detect_with_stages(&self, img: &DynamicImage) -> Result<(DetectionResult, ExtractionStages)> {
        let stages = self.extractor.extract_stages(img)?;
        let result = resolve(img, stages.regions.clone(), self.policy.as_ref());
        Ok((result, stages))
    }
}

/// Extract candidate regions with a one-off extractor
pub fn extract(img: &DynamicImage, config: &ExtractorConfig) -> Result<Vec<Region>> {
    RegionExtractor::new(config.clone())?.extract(img)
}

/// Extract and match with a one-off extractor
pub fn detect(
    img: &DynamicImage,
    config: &ExtractorConfig,
    policy: &dyn MatchPolicy,
) -> Result<DetectionResult> {
    let regions = extract(img, config)?;
    Ok(resolve(img, regions, policy))
}

fn resolve(img: &DynamicImage, regions: Vec<Region>, policy: &dyn MatchPolicy) -> DetectionResult {
    let Some(context) = MatchContext::new(img, &regions) else {
        debug!("No regions found, skipping {}", policy.name());
        return DetectionResult::empty();
    };

    let key = policy.match_regions(&context);
    debug!(
        "{} resolved {} regions to {:?}",
        policy.name(),
        regions.len(),
        key
    );
    DetectionResult::new(regions, key)
}
