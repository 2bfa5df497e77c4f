//! Synthetic test images.
#![allow(dead_code)]

use image::{GrayImage, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Uniform random noise, reproducible per seed
pub fn noise_image(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    GrayImage::from_fn(width, height, |_, _| Luma([rng.gen::<u8>()]))
}

/// A gradient background with a few random bright and dark rectangles
pub fn scene_image(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = GrayImage::from_fn(width, height, |x, y| {
        Luma([((x * 96 / width.max(1)) + (y * 64 / height.max(1))) as u8])
    });

    for _ in 0..6 {
        let x0 = rng.gen_range(0..width);
        let y0 = rng.gen_range(0..height);
        let x1 = (x0 + rng.gen_range(4..=width / 3 + 4)).min(width);
        let y1 = (y0 + rng.gen_range(4..=height / 3 + 4)).min(height);
        let value = if rng.gen_bool(0.5) { 240 } else { 15 };
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
    img
}

/// Save an image as PNG inside `dir`
pub fn save_png(img: &GrayImage, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}
