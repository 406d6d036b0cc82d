use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::matching::{MatchContext, MatchPolicy};
use crate::records::RecordStore;

pub const HISTOGRAM_BINS: usize = 16;
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.8;

const HISTOGRAM_WEIGHT: f32 = 0.5;
const COLOR_WEIGHT: f32 = 0.35;
const ASPECT_WEIGHT: f32 = 0.15;

const REFERENCE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Appearance signature of one tablet image
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDescriptor {
    pub mean_rgb: [f32; 3],
    /// Luminance histogram, sums to 1
    pub histogram: [f32; HISTOGRAM_BINS],
    pub aspect_ratio: f32,
}

impl FeatureDescriptor {
    /// `None` for an image with no pixels
    pub fn from_image(img: &DynamicImage) -> Option<Self> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return None;
        }
        let total = (width as u64 * height as u64) as f64;

        let rgb = img.to_rgb8();
        let mut sums = [0u64; 3];
        for pixel in rgb.pixels() {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += channel as u64;
            }
        }
        let mean_rgb = sums.map(|s| (s as f64 / total) as f32);

        let gray = img.to_luma8();
        let mut counts = [0u64; HISTOGRAM_BINS];
        for pixel in gray.pixels() {
            counts[pixel[0] as usize * HISTOGRAM_BINS / 256] += 1;
        }
        let histogram = counts.map(|c| (c as f64 / total) as f32);

        Some(Self {
            mean_rgb,
            histogram,
            aspect_ratio: width as f32 / height as f32,
        })
    }

    /// Weighted blend of histogram overlap, colour closeness and shape closeness, in [0, 1]
    pub fn similarity(&self, other: &FeatureDescriptor) -> f32 {
        let overlap: f32 = self
            .histogram
            .iter()
            .zip(other.histogram.iter())
            .map(|(a, b)| a.min(*b))
            .sum();

        let color_distance = self
            .mean_rgb
            .iter()
            .zip(other.mean_rgb.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt();
        let color = 1.0 - color_distance / (255.0 * 3f32.sqrt());

        let aspect = if self.aspect_ratio <= 0.0 || other.aspect_ratio <= 0.0 {
            0.0
        } else {
            self.aspect_ratio.min(other.aspect_ratio) / self.aspect_ratio.max(other.aspect_ratio)
        };

        (HISTOGRAM_WEIGHT * overlap + COLOR_WEIGHT * color + ASPECT_WEIGHT * aspect).clamp(0.0, 1.0)
    }
}

/// Compares every region against precomputed reference descriptors
#[derive(Debug, Clone)]
pub struct FeatureMatchPolicy {
    references: Vec<(String, FeatureDescriptor)>,
    acceptance_threshold: f32,
}

impl FeatureMatchPolicy {
    pub fn new(acceptance_threshold: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&acceptance_threshold) {
            return Err(Error::config(
                "acceptance_threshold",
                acceptance_threshold,
                "must lie in [0, 1]",
            ));
        }
        Ok(Self {
            references: Vec::new(),
            acceptance_threshold,
        })
    }

    pub fn with_reference(mut self, key: impl Into<String>, descriptor: FeatureDescriptor) -> Self {
        self.references.push((key.into().to_lowercase(), descriptor));
        self
    }

    /// Load `<key>.png|jpg|jpeg` from `dir` for every record in `store`.
    ///
    /// Records without a reference image are skipped.
    pub fn from_reference_dir(
        dir: &Path,
        store: &RecordStore,
        acceptance_threshold: f32,
    ) -> Result<Self> {
        let mut policy = Self::new(acceptance_threshold)?;

        for key in store.keys() {
            let Some(path) = REFERENCE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{key}.{ext}")))
                .find(|p| p.is_file())
            else {
                warn!("No reference image for '{}' in {}", key, dir.display());
                continue;
            };

            let img = image::open(&path)?;
            match FeatureDescriptor::from_image(&img) {
                Some(descriptor) => policy = policy.with_reference(key, descriptor),
                None => warn!("Reference image {} is empty", path.display()),
            }
        }

        debug!("Loaded {} reference descriptors", policy.references.len());
        Ok(policy)
    }

    pub fn acceptance_threshold(&self) -> f32 {
        self.acceptance_threshold
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Best (key, similarity) over every region and reference, before thresholding
    pub fn best_match(&self, context: &MatchContext<'_>) -> Option<(&str, f32)> {
        let mut best: Option<(&str, f32)> = None;

        for (_, roi) in context.sub_images() {
            let Some(descriptor) = FeatureDescriptor::from_image(&roi) else {
                continue;
            };
            for (key, reference) in &self.references {
                let score = descriptor.similarity(reference);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((key.as_str(), score));
                }
            }
        }

        best
    }
}

impl MatchPolicy for FeatureMatchPolicy {
    fn match_regions(&self, context: &MatchContext<'_>) -> Option<String> {
        let (key, score) = self.best_match(context)?;
        debug!("Best reference '{}' scored {:.3}", key, score);
        (score >= self.acceptance_threshold).then(|| key.to_string())
    }

    fn name(&self) -> &str {
        "Feature Match"
    }
}
