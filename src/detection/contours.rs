use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use crate::models::Region;

/// Closed boundary of one connected shape in the edge map
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    /// Enclosed area by the shoelace formula over the point sequence
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Axis-aligned bounding box, `None` for an empty contour
    pub fn bounding_box(&self) -> Option<Region> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x < 0 || min_y < 0 {
            return None;
        }
        Some(Region::from_corners(
            min_x as u32,
            min_y as u32,
            max_x as u32,
            max_y as u32,
        ))
    }
}

/// Trace top-level outer borders of the non-zero pixels in `edges`.
///
/// Holes and shapes nested inside another shape are skipped. Contours come back
/// in raster-scan order of their first boundary pixel.
pub fn find_outer_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| Contour { points: c.points })
        .collect()
}

/// Absolute polygon area; fewer than three points enclose nothing
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let n = points.len();
    let mut twice_area = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }

    twice_area.abs() as f64 * 0.5
}
