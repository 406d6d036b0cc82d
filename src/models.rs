use image::DynamicImage;
use serde::Serialize;

/// Axis-aligned bounding box of one detected tablet, in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Build a region from inclusive min/max corners
    pub fn from_corners(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// True if the whole box lies inside a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    /// Crop this region out of `img`, clamped to the image extent
    pub fn crop(&self, img: &DynamicImage) -> Option<DynamicImage> {
        if self.x >= img.width() || self.y >= img.height() {
            return None;
        }
        let width = self.width.min(img.width() - self.x);
        let height = self.height.min(img.height() - self.y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(img.crop_imm(self.x, self.y, width, height))
    }
}

/// What a detection run found, without the region list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// No contour survived the area filter
    NoRegions,
    /// Regions were found but the policy accepted none of the known keys
    Unmatched,
    Matched(&'a str),
}

/// Result of one [`DetectionPipeline::detect`](crate::DetectionPipeline::detect) call.
///
/// A matched key is only ever stored alongside a non-empty region list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    matched_key: Option<String>,
    regions: Vec<Region>,
}

impl DetectionResult {
    pub fn empty() -> Self {
        Self {
            matched_key: None,
            regions: Vec::new(),
        }
    }

    /// Pair regions with the policy's answer. A key given with no regions is dropped.
    pub fn new(regions: Vec<Region>, matched_key: Option<String>) -> Self {
        let matched_key = if regions.is_empty() { None } else { matched_key };
        Self {
            matched_key,
            regions,
        }
    }

    pub fn matched_key(&self) -> Option<&str> {
        self.matched_key.as_deref()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn outcome(&self) -> Outcome<'_> {
        match (&self.matched_key, self.regions.is_empty()) {
            (_, true) => Outcome::NoRegions,
            (Some(key), false) => Outcome::Matched(key),
            (None, false) => Outcome::Unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_without_regions_is_dropped() {
        let result = DetectionResult::new(Vec::new(), Some("paracetamol".to_string()));
        assert_eq!(result.matched_key(), None);
        assert_eq!(result.outcome(), Outcome::NoRegions);
    }

    #[test]
    fn outcome_distinguishes_unmatched_from_no_regions() {
        let region = Region::from_corners(10, 10, 19, 29);
        let unmatched = DetectionResult::new(vec![region], None);
        assert_eq!(unmatched.outcome(), Outcome::Unmatched);

        let matched = DetectionResult::new(vec![region], Some("tamoxifen".to_string()));
        assert_eq!(matched.outcome(), Outcome::Matched("tamoxifen"));
    }

    #[test]
    fn corners_are_inclusive() {
        let region = Region::from_corners(140, 140, 259, 259);
        assert_eq!((region.width, region.height), (120, 120));
        assert!(region.fits_within(400, 400));
        assert!(!region.fits_within(259, 400));
    }

    #[test]
    fn crop_is_clamped_to_image() {
        let img = DynamicImage::new_rgb8(50, 50);
        let region = Region { x: 40, y: 40, width: 20, height: 20 };
        let roi = region.crop(&img).unwrap();
        assert_eq!((roi.width(), roi.height()), (10, 10));
        assert!(Region { x: 60, y: 0, width: 5, height: 5 }.crop(&img).is_none());
    }
}
