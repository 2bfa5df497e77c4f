//! Per-frame DCT hashing of video.
//!
//! Decoding belongs to the caller: frames come from a [`FrameSource`]. Sampling is
//! expressed in frames per second; a source lasting `d` seconds sampled at `fps`
//! yields `floor(d * fps)` hashes taken at `i / fps` seconds.

use image::GrayImage;
use log::{debug, warn};
use std::time::Duration;

use super::image_hash::dct_image_hash;
use crate::error::{Error, Result};
use crate::types::{ImageHash, VideoHashSequence};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

const MAX_PREALLOCATED: u128 = 4096;

/// Tolerance, in frames, for timestamps rounded to whole nanoseconds
const FRAME_EPSILON: f64 = 1e-6;

/// Timestamp of sample `index`, rounded up to the next nanosecond so it never
/// falls before `index / fps`
fn sample_time(index: u128, fps: u128) -> Duration {
    let nanos = (index * NANOS_PER_SECOND).div_ceil(fps);
    Duration::new(
        (nanos / NANOS_PER_SECOND) as u64,
        (nanos % NANOS_PER_SECOND) as u32,
    )
}

/// A decoded video that can produce a grayscale frame at any timestamp
pub trait FrameSource {
    /// Total playback duration
    fn duration(&self) -> Duration;

    /// The frame displayed at `timestamp`. Failures are reported as [`Error::Decode`].
    fn frame_at(&mut self, timestamp: Duration) -> Result<GrayImage>;
}

/// Hash a video by sampling `frames_per_second` frames for every second of playback
pub fn hash_video<S: FrameSource + ?Sized>(
    source: &mut S,
    frames_per_second: u32,
) -> Result<VideoHashSequence> {
    if frames_per_second == 0 {
        return Err(Error::Configuration(
            "video sampling rate must be at least one frame per second".to_string(),
        ));
    }

    let fps = frames_per_second as u128;
    let samples = source.duration().as_nanos() * fps / NANOS_PER_SECOND;
    debug!(
        "Hashing {} frames from {:.2?} of video",
        samples,
        source.duration()
    );

    // The reported duration is not trusted for preallocation
    let mut hashes = Vec::with_capacity(samples.min(MAX_PREALLOCATED) as usize);
    for index in 0..samples {
        let timestamp = sample_time(index, fps);

        let frame = source.frame_at(timestamp).map_err(|e| match e {
            Error::Decode(_) => e,
            other => Error::Decode(format!("frame at {:.3?}: {}", timestamp, other)),
        })?;

        let hash = dct_image_hash(&frame).map_err(|e| {
            warn!("Frame at {:.3?} could not be hashed: {}", timestamp, e);
            e
        })?;
        hashes.push(hash);
    }

    Ok(hashes)
}

/// Pre-decoded frames played back at a fixed frame rate
#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<GrayImage>,
    frame_rate: f64,
}

impl FrameSequence {
    pub fn new(frames: Vec<GrayImage>, frame_rate: f64) -> Result<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(Error::Configuration(format!(
                "invalid frame rate {}",
                frame_rate
            )));
        }
        Ok(Self { frames, frame_rate })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for FrameSequence {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames.len() as f64 / self.frame_rate)
    }

    fn frame_at(&mut self, timestamp: Duration) -> Result<GrayImage> {
        let position = timestamp.as_secs_f64() * self.frame_rate;
        let index = (position + FRAME_EPSILON).floor() as usize;
        self.frames
            .get(index.min(self.frames.len().saturating_sub(1)))
            .cloned()
            .ok_or_else(|| Error::Decode(format!("no frame at {:.3?}", timestamp)))
    }
}

/// Hash every frame of a pre-decoded sequence without resampling
pub fn hash_frames(frames: &[GrayImage]) -> Result<Vec<ImageHash>> {
    frames.iter().map(dct_image_hash).collect()
}
