//! Integration tests for region extraction.
//!
//! Tests cover:
//! - Flat images producing no regions
//! - The single-tablet scenario and its bounding box
//! - Area filtering by enclosed (polygon) area rather than bounding box
//! - Discovery order, idempotence and image-bounds guarantees
//! - Invalid images and invalid configuration

mod common;

use common::*;
use image::{DynamicImage, Rgb};
use tabletscan::{extract, RegionExtractor};

#[test]
fn test_flat_image_has_no_regions() -> anyhow::Result<()> {
    let img = flat_image(100, 100, Rgb([128, 128, 128]));
    let regions = extract(&img, &ExtractorConfig::default())?;
    assert!(regions.is_empty());
    Ok(())
}

#[test]
fn test_single_tablet_bounding_box() -> anyhow::Result<()> {
    let regions = extract(&single_tablet_image(), &ExtractorConfig::default())?;

    assert_eq!(regions.len(), 1, "expected exactly one region, got {regions:?}");
    let region = regions[0];
    assert_near(region.x, 140, 4, "x");
    assert_near(region.y, 140, 4, "y");
    assert_near(region.width, 120, 6, "width");
    assert_near(region.height, 120, 6, "height");
    Ok(())
}

#[test]
fn test_min_area_uses_enclosed_area() -> anyhow::Result<()> {
    // radius 50 encloses roughly 8000 px²
    let img = circles_image(300, 300, &[((150, 150), 50, TABLET_WHITE)]);

    let strict = ExtractorConfig::default().with_min_region_area(10_000.0);
    assert!(extract(&img, &strict)?.is_empty());

    let relaxed = ExtractorConfig::default().with_min_region_area(5_000.0);
    assert_eq!(extract(&img, &relaxed)?.len(), 1);
    Ok(())
}

#[test]
fn test_sparse_bounding_box_is_not_enough() -> anyhow::Result<()> {
    // bounding box covers ~90000 px² but the band itself encloses very little
    let regions = extract(&diagonal_band_image(), &ExtractorConfig::default())?;
    assert!(regions.is_empty(), "thin band should be filtered, got {regions:?}");
    Ok(())
}

#[test]
fn test_regions_follow_raster_discovery_order() -> anyhow::Result<()> {
    let img = circles_image(
        400,
        400,
        &[
            ((100, 300), 60, TABLET_WHITE),
            ((300, 100), 60, TABLET_BLUE),
        ],
    );
    let regions = extract(&img, &ExtractorConfig::default())?;

    assert_eq!(regions.len(), 2);
    assert_near(regions[0].y, 40, 4, "first region y");
    assert_near(regions[0].x, 240, 4, "first region x");
    assert_near(regions[1].y, 240, 4, "second region y");
    assert_near(regions[1].x, 40, 4, "second region x");
    Ok(())
}

#[test]
fn test_regions_stay_inside_image() -> anyhow::Result<()> {
    let img = circles_image(
        320,
        240,
        &[
            ((10, 10), 70, TABLET_WHITE),
            ((310, 230), 80, TABLET_BLUE),
            ((160, 120), 45, TABLET_WHITE),
        ],
    );
    let regions = extract(&img, &ExtractorConfig::default())?;

    assert!(!regions.is_empty());
    for region in &regions {
        assert!(
            region.fits_within(img.width(), img.height()),
            "{region:?} escapes the 320x240 image"
        );
    }
    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> anyhow::Result<()> {
    let img = circles_image(
        400,
        400,
        &[((120, 120), 55, TABLET_WHITE), ((280, 260), 65, TABLET_BLUE)],
    );
    let extractor = RegionExtractor::new(ExtractorConfig::default())?;

    let first = extractor.extract(&img)?;
    let second = extractor.extract(&img)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_grayscale_input_matches_color_input() -> anyhow::Result<()> {
    let color = single_tablet_image();
    let gray = DynamicImage::ImageLuma8(color.to_luma8());
    let config = ExtractorConfig::default();

    assert_eq!(extract(&color, &config)?, extract(&gray, &config)?);
    Ok(())
}

#[test]
fn test_even_kernel_size_still_extracts() -> anyhow::Result<()> {
    let extractor = RegionExtractor::new(ExtractorConfig::default().with_kernel_size(10))?;
    assert_eq!(extractor.config().kernel_size, 11);
    assert_eq!(extractor.extract(&single_tablet_image())?.len(), 1);
    Ok(())
}

#[test]
fn test_empty_image_is_invalid() {
    let err = extract(&DynamicImage::new_rgb8(0, 0), &ExtractorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidImage { width: 0, height: 0 }));
}

#[test]
fn test_inverted_thresholds_are_a_config_error() {
    let config = ExtractorConfig::default().with_thresholds(150.0, 30.0);
    let err = extract(&single_tablet_image(), &config).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_oversized_kernel_is_a_config_error() {
    let config = ExtractorConfig::default().with_kernel_size(u32::MAX);
    let err = RegionExtractor::new(config.clone()).err().expect("kernel should be rejected");
    assert!(err.is_config());

    let err = extract(&flat_image(20, 20, BACKGROUND), &config).unwrap_err();
    assert!(err.is_config());
}
