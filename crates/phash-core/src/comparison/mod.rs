//! Comparison of hashes and digests produced by [`crate::processing`]
mod correlation;
mod hamming;
mod sequence;

pub use correlation::{cross_correlate, DEFAULT_THRESHOLD};
pub use hamming::{hamming_distance, DEFAULT_HAMMING_THRESHOLD};
pub use sequence::{audio_match_confidence, video_similarity};
