//! Perceptual hashing and similarity comparison.
//!
//! This library provides the building blocks for near-duplicate detection:
//! - DCT image hashes compared by Hamming distance
//! - Radial projection digests compared by rotation-tolerant cross-correlation
//! - Per-frame video hashes and spectral audio hashes, with sequence comparison
//! - Parallel batch hashing of image files
//!
//! Every algorithm is a pure function of its input and safe to call from many threads.
//! Decoding video and audio is left to the caller.

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use comparison::{
    audio_match_confidence, cross_correlate, hamming_distance, video_similarity,
    DEFAULT_HAMMING_THRESHOLD, DEFAULT_THRESHOLD,
};
pub use config::*;
pub use error::{Error, Result};
pub use processing::{
    dct_image_hash, digest_files, hash_audio, hash_files, hash_video, image_digest,
    image_digest_from_file, image_hash_from_file, image_hash_from_img, FrameSequence,
    FrameSource, RadialDigestBuilder,
};
pub use types::*;

// -- Public Modules --
pub mod comparison;
pub mod config;
pub mod logging;
pub mod processing;
pub mod types;
