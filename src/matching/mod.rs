//! Policies that turn candidate regions into a reference-record key.

pub mod feature;
pub mod stub;

use image::DynamicImage;

use crate::models::Region;

pub use feature::{FeatureDescriptor, FeatureMatchPolicy};
pub use stub::StubPolicy;

/// Everything a policy may look at: the source image and a non-empty region list
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    image: &'a DynamicImage,
    regions: &'a [Region],
}

impl<'a> MatchContext<'a> {
    /// `None` when `regions` is empty; policies are never asked about nothing
    pub fn new(image: &'a DynamicImage, regions: &'a [Region]) -> Option<Self> {
        if regions.is_empty() {
            return None;
        }
        Some(Self { image, regions })
    }

    pub fn image(&self) -> &'a DynamicImage {
        self.image
    }

    pub fn regions(&self) -> &'a [Region] {
        self.regions
    }

    pub fn sub_image(&self, region: &Region) -> Option<DynamicImage> {
        region.crop(self.image)
    }

    /// Cropped sub-image for every region, skipping any that fall outside the image
    pub fn sub_images(&self) -> impl Iterator<Item = (&'a Region, DynamicImage)> + 'a {
        let image = self.image;
        self.regions
            .iter()
            .filter_map(move |r| r.crop(image).map(|roi| (r, roi)))
    }
}

/// Trait that all matching policies must implement
pub trait MatchPolicy: Send + Sync {
    /// Best record key for the candidates, or `None` if nothing clears the policy
    fn match_regions(&self, context: &MatchContext<'_>) -> Option<String>;

    /// Human-readable name for this policy (used in log output)
    fn name(&self) -> &str;
}
