//! Blob extraction from binary masks.
//!
//! Pipeline shared by marker, hazard, and exit detection:
//! 1. Morphological opening (drop speckle) then closing (fill pinholes)
//! 2. Outer border tracing
//! 3. Polygon area / centroid / bounding box per border
//!
//! Area and centroid come from the traced border polygon (Green's theorem),
//! so a filled `n x n` square reports an area of `(n-1)^2`.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};
use imageproc::point::Point;

use crate::core::{PixelPoint, PixelRect};

/// A connected region found in a mask
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Enclosed polygon area in square pixels
    pub area: f64,
    /// Area-weighted centre of mass (None for zero-area borders)
    pub centroid: Option<PixelPoint>,
    /// Axis-aligned bounding box of the border pixels
    pub bbox: PixelRect,
}

/// Opening followed by closing with a square `kernel x kernel` element.
///
/// Kernels of size 0 or 1 leave the mask unchanged.
pub fn clean_mask(mask: &GrayImage, kernel: u8) -> GrayImage {
    let k = kernel / 2;
    if k == 0 {
        return mask.clone();
    }
    let opened = open(mask, Norm::LInf, k);
    close(&opened, Norm::LInf, k)
}

/// Outer blobs of the mask whose area is at least `min_area`.
///
/// Holes and blobs nested inside holes are not reported. Results keep the
/// border tracing order (raster order of each blob's first pixel).
pub fn extract_blobs(mask: &GrayImage, min_area: f64) -> Vec<Blob> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let blob = blob_from_border(&c.points)?;
            (blob.area >= min_area).then_some(blob)
        })
        .collect()
}

/// Area, centroid and bounding box of a closed border polygon
fn blob_from_border(points: &[Point<i32>]) -> Option<Blob> {
    let first = points.first()?;

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    let mut twice_area = 0.0f64;
    let mut cx_acc = 0.0f64;
    let mut cy_acc = 0.0f64;

    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);

        let (px, py, qx, qy) = (p.x as f64, p.y as f64, q.x as f64, q.y as f64);
        let cross = px * qy - qx * py;
        twice_area += cross;
        cx_acc += (px + qx) * cross;
        cy_acc += (py + qy) * cross;
    }

    let area = twice_area.abs() / 2.0;
    let centroid = if twice_area.abs() > f64::EPSILON {
        Some(PixelPoint::new(
            (cx_acc / (3.0 * twice_area)) as f32,
            (cy_acc / (3.0 * twice_area)) as f32,
        ))
    } else {
        None
    };

    Some(Blob {
        area,
        centroid,
        bbox: PixelRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    fn mask_with_rects(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            let hit = rects
                .iter()
                .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
            Luma([if hit { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_square_blob_metrics() {
        let mask = mask_with_rects(60, 60, &[(10, 20, 21, 11)]);
        let blobs = extract_blobs(&mask, 0.0);

        assert_eq!(blobs.len(), 1);
        let blob = &blobs[0];
        assert_relative_eq!(blob.area, 200.0);
        assert_eq!(blob.bbox, PixelRect::new(10, 20, 21, 11));
        let c = blob.centroid.unwrap();
        assert_relative_eq!(c.x, 20.0, epsilon = 1e-4);
        assert_relative_eq!(c.y, 25.0, epsilon = 1e-4);
    }

    #[test]
    fn test_min_area_filter() {
        let mask = mask_with_rects(100, 100, &[(5, 5, 5, 5), (40, 40, 30, 30)]);
        let blobs = extract_blobs(&mask, 100.0);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].bbox, PixelRect::new(40, 40, 30, 30));
    }

    #[test]
    fn test_holes_not_reported() {
        // Ring: outer 40x40 with 20x20 hole, plus a blob inside the hole
        let mut mask = mask_with_rects(60, 60, &[(10, 10, 40, 40)]);
        for y in 20..40 {
            for x in 20..40 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        for y in 27..33 {
            for x in 27..33 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let blobs = extract_blobs(&mask, 0.0);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].bbox, PixelRect::new(10, 10, 40, 40));
    }

    #[test]
    fn test_clean_mask_removes_speckle_and_fills_pinholes() {
        let mut mask = mask_with_rects(60, 60, &[(10, 10, 30, 30)]);
        // Isolated noise pixel
        mask.put_pixel(50, 50, Luma([255]));
        // Pinhole inside the blob
        mask.put_pixel(25, 25, Luma([0]));

        let cleaned = clean_mask(&mask, 5);
        assert_eq!(cleaned.get_pixel(50, 50).0[0], 0);
        assert_eq!(cleaned.get_pixel(25, 25).0[0], 255);
        assert_eq!(cleaned.get_pixel(20, 20).0[0], 255);
    }

    #[test]
    fn test_kernel_one_is_identity() {
        let mask = mask_with_rects(10, 10, &[(2, 2, 1, 1)]);
        assert_eq!(clean_mask(&mask, 1), mask);
    }
}
