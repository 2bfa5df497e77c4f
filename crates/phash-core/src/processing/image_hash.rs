//! # DCT Image Hash
//!
//! Generates a 64-bit perceptual hash from the low-frequency DCT coefficients of an image.
//!
//! ## Algorithm
//!
//! 1. Widen the grayscale image to `f32` and resize it to 32×32 with a triangle filter
//! 2. Apply a 2D DCT-II
//! 3. Keep the top-left 8×8 block of coefficients, dropping the DC term (63 values)
//! 4. Compare each retained coefficient against their median
//!
//! ## Bit Layout
//!
//! The 8×8 block is read in row-major order with `(0, 0)` skipped, so coefficient
//! `(r, c)` becomes bit `r * 8 + c - 1`. Bits 0..=62 are set when the coefficient is
//! greater than or equal to the median; bit 63 is always zero. Any hash compared against
//! another must come from this same layout.
//!
//! ## Hamming Distance Interpretation
//!
//! - 0-3: Nearly identical images (same image with minor modifications)
//! - 4-10: Similar images (same subject with moderate differences)
//! - >10: Different images; unrelated images sit around 32

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use log::trace;
use ndarray::Array2;
use std::path::Path;

use super::dct::dct_2d;
use crate::error::{Error, Result};
use crate::types::ImageHash;

/// Side of the square the image is resized to before the transform
pub const DCT_INPUT_SIZE: u32 = 32;

/// Side of the low-frequency coefficient block that feeds the hash
pub const DCT_BLOCK_SIZE: usize = 8;

/// Grayscale image with `f32` samples in [0, 1]
pub(crate) type GrayImageF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Widen an 8-bit grayscale image to `f32` samples in [0, 1]
pub(crate) fn to_unit_f32(image: &GrayImage) -> GrayImageF32 {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y)[0] as f32 / 255.0])
    })
}

/// Calculate the DCT perceptual hash of a grayscale image
pub fn dct_image_hash(image: &GrayImage) -> Result<ImageHash> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::HashComputation(format!(
            "cannot hash a {}x{} image",
            width, height
        )));
    }

    let small = image::imageops::resize(
        &to_unit_f32(image),
        DCT_INPUT_SIZE,
        DCT_INPUT_SIZE,
        image::imageops::FilterType::Triangle,
    );

    let side = DCT_INPUT_SIZE as usize;
    let mut matrix = Array2::from_shape_fn((side, side), |(y, x)| {
        small.get_pixel(x as u32, y as u32)[0] * 255.0
    });
    dct_2d(&mut matrix);

    // Row-major over the low-frequency block, DC term skipped
    let coefficients: Vec<f32> = (0..DCT_BLOCK_SIZE)
        .flat_map(|r| (0..DCT_BLOCK_SIZE).map(move |c| (r, c)))
        .skip(1)
        .map(|(r, c)| matrix[[r, c]])
        .collect();

    let mut sorted = coefficients.clone();
    sorted.sort_by(f32::total_cmp);
    let median = sorted[sorted.len() / 2];

    let hash = coefficients
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c >= median)
        .fold(0u64, |hash, (bit, _)| hash | (1u64 << bit));

    trace!(
        "DCT hash of {}x{} image: {:016x} (median {:.3})",
        width,
        height,
        hash,
        median
    );

    Ok(ImageHash(hash))
}

/// Calculate a DCT perceptual hash from an image in memory
pub fn image_hash_from_img(img: &DynamicImage) -> Result<ImageHash> {
    dct_image_hash(&img.to_luma8())
}

/// Calculate a DCT perceptual hash from an image file
pub fn image_hash_from_file<P: AsRef<Path>>(path: P) -> Result<ImageHash> {
    let img = image::open(path)?;
    image_hash_from_img(&img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((x * 7 + y * 13 + (x * y) % 31) % 256) as u8])
        })
    }

    #[test]
    fn test_zero_dimension_fails() {
        let empty = GrayImage::new(0, 10);
        assert!(matches!(
            dct_image_hash(&empty),
            Err(Error::HashComputation(_))
        ));
    }

    #[test]
    fn test_top_bit_is_never_set() {
        for (w, h) in [(32, 32), (100, 40), (7, 300)] {
            let hash = dct_image_hash(&pattern(w, h)).unwrap();
            assert_eq!(hash.0 >> 63, 0);
        }
    }

    #[test]
    fn test_at_least_half_of_the_bits_are_set() {
        // Every coefficient at or above the median sets a bit
        let hash = dct_image_hash(&pattern(64, 64)).unwrap();
        assert!(hash.0.count_ones() >= 32);
    }

    #[test]
    fn test_tiny_images_are_hashable() {
        let one = GrayImage::from_pixel(1, 1, Luma([200]));
        assert!(dct_image_hash(&one).is_ok());
    }

    #[test]
    fn test_dynamic_image_matches_gray() {
        let gray = pattern(48, 48);
        let dynamic = DynamicImage::ImageLuma8(gray.clone());
        assert_eq!(
            image_hash_from_img(&dynamic).unwrap(),
            dct_image_hash(&gray).unwrap()
        );
    }
}
