//! Color classification in HSV space.
//!
//! Uses the 8-bit HSV convention common to camera tooling: hue is halved
//! into `0..180`, saturation and value span `0..=255`.

use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// HSV triple, 8-bit convention (H in 0..180)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Hsv {
    /// Hue, 0..180 (degrees / 2)
    pub h: u8,
    /// Saturation, 0..=255
    pub s: u8,
    /// Value (brightness), 0..=255
    pub v: u8,
}

/// Convert an RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> Hsv {
    let [r, g, b] = pixel.0;
    let (r, g, b) = (r as f32, g as f32, b as f32);

    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { delta * 255.0 / v } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h = (h / 2.0).round() as u32 % 180;
    Hsv {
        h: h as u8,
        s: s.round().min(255.0) as u8,
        v: v as u8,
    }
}

/// Inclusive box in HSV space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lower bound [h, s, v], inclusive
    pub lower: [u8; 3],
    /// Upper bound [h, s, v], inclusive
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Create a range from lower and upper bounds
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Does the HSV value fall inside the box?
    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&hsv.h)
            && (self.lower[1]..=self.upper[1]).contains(&hsv.s)
            && (self.lower[2]..=self.upper[2]).contains(&hsv.v)
    }

    /// Every lower bound is at or below its upper bound
    pub fn is_ordered(&self) -> bool {
        self.lower.iter().zip(self.upper.iter()).all(|(lo, hi)| lo <= hi)
    }
}

/// Binary mask (255 = match) of pixels inside any of the ranges.
pub fn mask_in_ranges(frame: &RgbImage, ranges: &[HsvRange]) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let hsv = rgb_to_hsv(*frame.get_pixel(x, y));
        if ranges.iter().any(|r| r.contains(hsv)) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
