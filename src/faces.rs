//! Enemy face images
//!
//! Every enemy shows a square face texture composited from three layers: a
//! shared back image, one face picked at random from the active face set and a
//! shared foreground frame. Face set 0 is reserved and never used for waves.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// A named group of interchangeable face images
#[derive(Debug, Clone)]
pub struct FaceSet {
    pub name: String,
    pub faces: Vec<RgbaImage>,
}

impl FaceSet {
    pub fn new(name: impl Into<String>, faces: Vec<RgbaImage>) -> Self {
        Self {
            name: name.into(),
            faces,
        }
    }
}

/// Images the enemy collection needs to build face textures
#[derive(Debug, Clone)]
pub struct FaceAssets {
    /// Face sets; index 0 is reserved
    pub sets: Vec<FaceSet>,
    /// Drawn first, under the face
    pub back: RgbaImage,
    /// Drawn last, over the face
    pub fore: RgbaImage,
}

impl FaceAssets {
    pub fn new(sets: Vec<FaceSet>, back: RgbaImage, fore: RgbaImage) -> Self {
        assert!(
            sets.len() >= 2,
            "face assets need the reserved set 0 plus at least one playable set"
        );
        assert!(
            sets.iter().skip(1).all(|s| !s.faces.is_empty()),
            "every playable face set needs at least one face"
        );
        Self { sets, back, fore }
    }

    /// Flat-colored placeholder assets for headless runs and tests
    pub fn placeholder() -> Self {
        let solid = |r, g, b, a| RgbaImage::from_pixel(8, 8, Rgba([r, g, b, a]));
        let sets = vec![
            FaceSet::new("reserved", vec![solid(0, 0, 0, 255)]),
            FaceSet::new(
                "warm",
                vec![solid(255, 80, 40, 255), solid(255, 160, 0, 255), solid(200, 40, 90, 255)],
            ),
            FaceSet::new("cool", vec![solid(40, 120, 255, 255), solid(0, 200, 180, 255)]),
        ];
        let back = solid(30, 30, 30, 255);
        let mut fore = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        for x in 0..8 {
            fore.put_pixel(x, 0, Rgba([255, 255, 255, 255]));
            fore.put_pixel(x, 7, Rgba([255, 255, 255, 255]));
        }
        Self::new(sets, back, fore)
    }
}

/// Draw each layer stretched to `size`×`size` over the previous ones
pub fn composite_layers(layers: &[&RgbaImage], size: u32) -> RgbaImage {
    let mut buffer = RgbaImage::new(size, size);
    for layer in layers {
        if layer.dimensions() == (size, size) {
            imageops::overlay(&mut buffer, *layer, 0, 0);
        } else {
            let scaled = imageops::resize(*layer, size, size, FilterType::Nearest);
            imageops::overlay(&mut buffer, &scaled, 0, 0);
        }
    }
    buffer
}
