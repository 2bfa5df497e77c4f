//! Comparison of hash sequences from the video and audio hashers

use log::debug;

use super::hamming_distance;
use crate::error::{Error, Result};
use crate::types::ImageHash;

/// Similarity of two video hash sequences in [0, 1].
///
/// Frames match when their hamming distance is at most `threshold`. The score is the
/// length of the longest common subsequence of matching frames over the length of the
/// shorter sequence, so a clip embedded in a longer video still scores 1.0.
pub fn video_similarity(a: &[ImageHash], b: &[ImageHash], threshold: u32) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for frame_a in a {
        for (j, frame_b) in b.iter().enumerate() {
            current[j + 1] = if frame_a.distance(frame_b) <= threshold {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let common = previous[b.len()];
    common as f64 / a.len().min(b.len()) as f64
}

/// Slide the shorter audio hash sequence over the longer one and score each offset.
///
/// At every offset the shorter sequence is cut into consecutive windows of
/// `block_size` hashes and the bit error rate (BER) of each window is measured. The
/// offset scores `1 - BER` of its best window when that BER is at most `threshold`,
/// and 0.0 otherwise. The result has one entry per offset.
pub fn audio_match_confidence(
    a: &[u32],
    b: &[u32],
    threshold: f64,
    block_size: usize,
) -> Result<Vec<f64>> {
    if block_size == 0 {
        return Err(Error::Configuration(
            "block size must be positive".to_string(),
        ));
    }

    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.len() < block_size {
        return Err(Error::InsufficientData {
            needed: block_size,
            got: short.len(),
        });
    }

    let bits_per_window = (32 * block_size) as f64;
    let confidences: Vec<f64> = (0..=long.len() - short.len())
        .map(|offset| {
            let aligned = &long[offset..offset + short.len()];
            let best_ber = short
                .chunks_exact(block_size)
                .zip(aligned.chunks_exact(block_size))
                .map(|(x, y)| {
                    let errors: u32 = x
                        .iter()
                        .zip(y)
                        .map(|(p, q)| hamming_distance(*p as u64, *q as u64))
                        .sum();
                    errors as f64 / bits_per_window
                })
                .fold(f64::INFINITY, f64::min);

            if best_ber <= threshold {
                1.0 - best_ber
            } else {
                0.0
            }
        })
        .collect();

    debug!(
        "Audio match over {} offsets, best confidence {:.3}",
        confidences.len(),
        confidences.iter().cloned().fold(0.0, f64::max)
    );

    Ok(confidences)
}
