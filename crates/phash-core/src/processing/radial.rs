//! # Radial Digest
//!
//! Builds a rotation-comparable [`Digest`] from intensity profiles sampled along lines
//! through the image centre.
//!
//! The image is Gaussian-blurred, gamma-corrected, then sampled along `num_lines`
//! lines at angles `k * 180 / num_lines` degrees (line 0 is horizontal). Each
//! profile has one sample per unit of radius out to the circumscribed circle. A
//! sample at radius `r` averages the two points at distance `r` on either side of the
//! centre, which makes a profile independent of the direction its line is walked.
//! Points falling outside the image contribute zero.

use image::GrayImage;
use log::debug;
use std::path::Path;

use super::image_hash::{to_unit_f32, GrayImageF32};
use crate::error::{Error, Result};
use crate::types::Digest;

/// Smallest width or height accepted for a digest
pub const MIN_DIGEST_DIMENSION: u32 = 8;

pub const DEFAULT_SIGMA: f64 = 1.0;
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_NUM_LINES: usize = 180;

/// Parameters of the radial digest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialDigestBuilder {
    /// Standard deviation of the Gaussian blur; zero disables blurring
    pub sigma: f64,

    /// Exponent applied to intensities normalised to [0, 1]
    pub gamma: f64,

    /// Number of projection lines over [0°, 180°)
    pub num_lines: usize,
}

impl Default for RadialDigestBuilder {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            gamma: DEFAULT_GAMMA,
            num_lines: DEFAULT_NUM_LINES,
        }
    }
}

impl RadialDigestBuilder {
    pub fn new(sigma: f64, gamma: f64, num_lines: usize) -> Self {
        Self {
            sigma,
            gamma,
            num_lines,
        }
    }

    fn validate(&self, width: u32, height: u32) -> Result<()> {
        if width < MIN_DIGEST_DIMENSION || height < MIN_DIGEST_DIMENSION {
            return Err(Error::Digest(format!(
                "image is {}x{}, both sides must be at least {}",
                width, height, MIN_DIGEST_DIMENSION
            )));
        }
        if self.num_lines == 0 {
            return Err(Error::Digest(
                "at least one projection line is required".to_string(),
            ));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::Digest(format!("invalid sigma {}", self.sigma)));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::Digest(format!("invalid gamma {}", self.gamma)));
        }
        Ok(())
    }

    /// Build the digest of a grayscale image, labelled with `id`
    pub fn build(&self, id: impl Into<String>, image: &GrayImage) -> Result<Digest> {
        let (width, height) = image.dimensions();
        self.validate(width, height)?;

        let mut working = to_unit_f32(image);
        if self.sigma > 0.0 {
            working = image::imageops::blur(&working, self.sigma as f32);
        }

        let plane = gamma_corrected(&working, self.gamma);
        let radius = profile_len(width, height);

        let coefficients: Vec<Vec<f64>> = (0..self.num_lines)
            .map(|line| {
                let theta = std::f64::consts::PI * line as f64 / self.num_lines as f64;
                plane.profile(theta, radius)
            })
            .collect();

        let digest = Digest::new(id, coefficients)?;
        debug!(
            "Built digest {} (sigma {}, gamma {})",
            digest.shape(),
            self.sigma,
            self.gamma
        );
        Ok(digest)
    }
}

/// Number of samples in each profile of a `width`x`height` image
pub fn profile_len(width: u32, height: u32) -> usize {
    let (w, h) = (width as f64, height as f64);
    ((w * w + h * h).sqrt() / 2.0).ceil() as usize
}

/// Build an unlabelled digest
pub fn image_digest(image: &GrayImage, sigma: f64, gamma: f64, num_lines: usize) -> Result<Digest> {
    RadialDigestBuilder::new(sigma, gamma, num_lines).build(String::new(), image)
}

/// Build a digest from an image file, labelled with its path
pub fn image_digest_from_file<P: AsRef<Path>>(
    path: P,
    sigma: f64,
    gamma: f64,
    num_lines: usize,
) -> Result<Digest> {
    let path = path.as_ref();
    let img = image::open(path)?.to_luma8();
    RadialDigestBuilder::new(sigma, gamma, num_lines).build(path.display().to_string(), &img)
}

/// Gamma-corrected intensities in [0, 255], row-major
struct Plane {
    width: usize,
    height: usize,
    pixels: Vec<f64>,
}

fn gamma_corrected(image: &GrayImageF32, gamma: f64) -> Plane {
    let pixels = image
        .pixels()
        .map(|p| (p[0] as f64).clamp(0.0, 1.0).powf(gamma) * 255.0)
        .collect();

    Plane {
        width: image.width() as usize,
        height: image.height() as usize,
        pixels,
    }
}

impl Plane {
    fn at(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Bilinear sample, zero outside the image
    fn sample(&self, x: f64, y: f64) -> f64 {
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (xi, yi) = (x0 as i64, y0 as i64);

        self.at(xi, yi) * (1.0 - fx) * (1.0 - fy)
            + self.at(xi + 1, yi) * fx * (1.0 - fy)
            + self.at(xi, yi + 1) * (1.0 - fx) * fy
            + self.at(xi + 1, yi + 1) * fx * fy
    }

    fn profile(&self, theta: f64, len: usize) -> Vec<f64> {
        let cx = (self.width as f64 - 1.0) / 2.0;
        let cy = (self.height as f64 - 1.0) / 2.0;
        let (sin, cos) = theta.sin_cos();

        (0..len)
            .map(|r| {
                let (dx, dy) = (r as f64 * cos, r as f64 * sin);
                (self.sample(cx + dx, cy + dy) + self.sample(cx - dx, cy - dy)) / 2.0
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn disc(size: u32) -> GrayImage {
        let c = (size as f64 - 1.0) / 2.0;
        GrayImage::from_fn(size, size, |x, y| {
            let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt();
            Luma([if d < size as f64 / 4.0 { 255 } else { 40 }])
        })
    }

    #[test]
    fn test_digest_shape() {
        let digest = image_digest(&disc(64), 1.0, 1.0, 36).unwrap();
        assert_eq!(digest.size(), 36);
        assert_eq!(digest.profile_len(), profile_len(64, 64));
        assert_eq!(profile_len(64, 64), 46);
    }

    #[test]
    fn test_rejects_small_images() {
        let tiny = GrayImage::new(MIN_DIGEST_DIMENSION - 1, 64);
        assert!(matches!(
            image_digest(&tiny, 1.0, 1.0, 180),
            Err(Error::Digest(_))
        ));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let img = disc(32);
        assert!(image_digest(&img, 1.0, 1.0, 0).is_err());
        assert!(image_digest(&img, -1.0, 1.0, 10).is_err());
        assert!(image_digest(&img, 1.0, 0.0, 10).is_err());
        assert!(image_digest(&img, f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn test_symmetric_disc_has_identical_profiles() {
        let digest = image_digest(&disc(65), 0.0, 1.0, 8).unwrap();
        let first = &digest.coefficients()[0];
        let quarter = &digest.coefficients()[4];
        for (a, b) in first.iter().zip(quarter) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_outside_samples_are_zero() {
        let white = GrayImage::from_pixel(16, 16, Luma([255]));
        let digest = image_digest(&white, 0.0, 1.0, 4).unwrap();
        let horizontal = &digest.coefficients()[0];
        assert!((horizontal[0] - 255.0).abs() < 1e-6);
        assert_eq!(*horizontal.last().unwrap(), 0.0);
    }

    #[test]
    fn test_gamma_darkens_mid_tones() {
        let grey = GrayImage::from_pixel(16, 16, Luma([128]));
        let linear = image_digest(&grey, 0.0, 1.0, 2).unwrap();
        let squared = image_digest(&grey, 0.0, 2.0, 2).unwrap();
        assert!(squared.coefficients()[0][0] < linear.coefficients()[0][0]);
    }
}
