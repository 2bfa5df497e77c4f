use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A 64-bit DCT perceptual hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageHash(pub u64);

impl ImageHash {
    /// Calculate the Hamming distance between two perceptual hashes
    pub fn distance(&self, other: &ImageHash) -> u32 {
        crate::comparison::hamming_distance(self.0, other.0)
    }

    /// Check if two images are perceptually similar based on a threshold
    pub fn is_similar(&self, other: &ImageHash, threshold: u32) -> bool {
        self.distance(other) <= threshold
    }

    /// Get the underlying 64-bit hash value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ImageHash {
    fn from(value: u64) -> Self {
        ImageHash(value)
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hashes of sampled video frames, in temporal order
pub type VideoHashSequence = Vec<ImageHash>;

/// One 32-bit hash per audio analysis block
pub type AudioHashSequence = Vec<u32>;

/// A radial projection digest of an image.
///
/// Each coefficient is the projection profile of one line through the image
/// centre; line `k` lies at `k * 180 / size()` degrees. All profiles of a
/// digest have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDigest")]
pub struct Digest {
    id: String,
    coefficients: Vec<Vec<f64>>,
}

/// Unchecked wire form of a [`Digest`]
#[derive(Deserialize)]
struct RawDigest {
    id: String,
    coefficients: Vec<Vec<f64>>,
}

impl TryFrom<RawDigest> for Digest {
    type Error = Error;

    fn try_from(raw: RawDigest) -> Result<Self> {
        Digest::new(raw.id, raw.coefficients)
    }
}

impl Digest {
    /// Create a digest, rejecting profiles of unequal length
    pub fn new(id: impl Into<String>, coefficients: Vec<Vec<f64>>) -> Result<Self> {
        let id = id.into();
        if let Some(first) = coefficients.first() {
            let expected = first.len();
            if let Some((line, profile)) = coefficients
                .iter()
                .enumerate()
                .find(|(_, p)| p.len() != expected)
            {
                return Err(Error::Digest(format!(
                    "digest '{}': line {} has {} samples, expected {}",
                    id,
                    line,
                    profile.len(),
                    expected
                )));
            }
        }

        Ok(Self { id, coefficients })
    }

    /// Label used for traceability only
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    /// Number of projection lines
    pub fn size(&self) -> usize {
        self.coefficients.len()
    }

    /// Number of samples in each projection profile
    pub fn profile_len(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    /// Shape descriptor used in mismatch errors
    pub(crate) fn shape(&self) -> String {
        format!("'{}' ({}x{})", self.id, self.size(), self.profile_len())
    }
}

/// Outcome of correlating two digests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Peak correlation coefficient over all line shifts, in [-1, 1]
    pub peak: f64,

    /// Line shift of the second digest at which the peak occurs
    pub offset: usize,

    /// Whether `peak` reached the threshold
    pub is_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_hash_display_is_padded_hex() {
        assert_eq!(ImageHash(0xab).to_string(), "00000000000000ab");
        assert_eq!(ImageHash(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn test_image_hash_similarity() {
        let a = ImageHash(0b1011);
        let b = ImageHash(0b0000);
        assert_eq!(a.distance(&b), 3);
        assert!(a.is_similar(&b, 3));
        assert!(!a.is_similar(&b, 2));
    }

    #[test]
    fn test_digest_rejects_ragged_profiles() {
        let result = Digest::new("ragged", vec![vec![1.0, 2.0], vec![1.0]]);
        assert!(matches!(result, Err(Error::Digest(_))));
    }

    #[test]
    fn test_digest_shape() {
        let digest = Digest::new("d", vec![vec![0.0; 5]; 3]).unwrap();
        assert_eq!(digest.id(), "d");
        assert_eq!(digest.size(), 3);
        assert_eq!(digest.profile_len(), 5);
        assert_eq!(digest.size(), digest.coefficients().len());
    }

    #[test]
    fn test_deserialized_digest_is_checked() {
        let ragged = r#"{"id":"x","coefficients":[[1.0,2.0,3.0],[4.0]]}"#;
        assert!(serde_json::from_str::<Digest>(ragged).is_err());

        let digest = Digest::new("ok", vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(serde_json::from_str::<Digest>(&json).unwrap(), digest);
    }
}
