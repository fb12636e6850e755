//! Static map image loader.
//!
//! The map is a plain raster: dark pixels are corridor, bright pixels are
//! walls and shop fronts.

use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::contrast::{ThresholdType, threshold};
use log::info;
use std::path::Path;

use crate::error::{Error, Result};

/// Map image plus its wall mask
#[derive(Clone, Debug)]
pub struct StaticMap {
    /// Color image, used as the drawing canvas
    image: RgbImage,
    /// 255 where the map is a wall, 0 where it is corridor
    mask: GrayImage,
}

impl StaticMap {
    /// Load and threshold a map image. A missing or undecodable file is fatal.
    pub fn load<P: AsRef<Path>>(path: P, wall_threshold: u8) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| Error::MapLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let map = Self::from_image(&img, wall_threshold);
        info!(
            "[Map] loaded {} ({}x{}, threshold {})",
            path.display(),
            map.width(),
            map.height(),
            wall_threshold
        );
        Ok(map)
    }

    /// Build from an already-decoded image. Gray level above the threshold is wall.
    pub fn from_image(img: &DynamicImage, wall_threshold: u8) -> Self {
        let mask = threshold(&img.to_luma8(), wall_threshold, ThresholdType::Binary);
        Self {
            image: img.to_rgb8(),
            mask,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn mask(&self) -> &GrayImage {
        &self.mask
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
