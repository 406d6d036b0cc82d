#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tabletscan::RecordStore;
use tempfile::NamedTempFile;

pub const BACKGROUND: Rgb<u8> = Rgb([60, 60, 60]);
pub const TABLET_WHITE: Rgb<u8> = Rgb([235, 235, 235]);
pub const TABLET_BLUE: Rgb<u8> = Rgb([150, 210, 255]);

/// Flat image with no structure at all
pub fn flat_image(width: u32, height: u32, color: Rgb<u8>) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, color))
}

/// Filled circles on a flat background
pub fn circles_image(
    width: u32,
    height: u32,
    circles: &[((i32, i32), i32, Rgb<u8>)],
) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    for &(center, radius, color) in circles {
        draw_filled_circle_mut(&mut img, center, radius, color);
    }
    DynamicImage::ImageRgb8(img)
}

/// One white tablet of radius 60 centred in a 400x400 frame
pub fn single_tablet_image() -> DynamicImage {
    circles_image(400, 400, &[((200, 200), 60, TABLET_WHITE)])
}

/// Narrow bright band along the main diagonal: large bounding box, small enclosed area
pub fn diagonal_band_image() -> DynamicImage {
    let mut img = RgbImage::from_pixel(400, 400, BACKGROUND);
    for y in 50..350u32 {
        for x in 50..350u32 {
            if x.abs_diff(y) <= 2 {
                img.put_pixel(x, y, TABLET_WHITE);
            }
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Assert `actual` is within `tolerance` of `expected`
pub fn assert_near(actual: u32, expected: u32, tolerance: u32, what: &str) {
    assert!(
        actual.abs_diff(expected) <= tolerance,
        "{what}: expected {expected} ± {tolerance}, got {actual}"
    );
}

pub const SAMPLE_RECORDS: &str = "\
name,indication,dosage,side_effects
paracetamol,\"Pain relief, fever reduction\",Take 1 to 2 tablets every 4 to 6 hours as needed,\"Rare, but may cause allergic reactions or liver damage at high doses\"
fluconazole,Fungal infections,Varies by infection type; typically 150 mg as a single dose,\"Headache, dizziness, nausea, stomach pain\"
tamoxifen,Breast cancer treatment and prevention,Typically 20 mg once daily,\"Hot flashes, risk of blood clots\"
";

/// Writes `contents` to a temporary .csv file.
/// The file will be automatically cleaned up when dropped.
pub fn write_records_file(contents: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp record file");
    std::fs::write(file.path(), contents).expect("Failed to write record file");
    file
}

pub fn sample_store() -> RecordStore {
    RecordStore::from_reader(SAMPLE_RECORDS.as_bytes()).expect("Sample records should parse")
}
