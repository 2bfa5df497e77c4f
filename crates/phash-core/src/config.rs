use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::comparison::{DEFAULT_HAMMING_THRESHOLD, DEFAULT_THRESHOLD};
use crate::error::{Error, Result};
use crate::processing::radial::{
    RadialDigestBuilder, DEFAULT_GAMMA, DEFAULT_NUM_LINES, DEFAULT_SIGMA,
};

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parameters shared by the hashing and comparison operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gaussian blur standard deviation for radial digests
    pub sigma: f64,

    /// Gamma exponent for radial digests
    pub gamma: f64,

    /// Number of projection lines for radial digests
    pub num_lines: usize,

    /// Peak correlation at or above which digests match
    pub correlation_threshold: f64,

    /// Hamming distance at or below which DCT hashes are duplicates
    pub hamming_threshold: u32,

    /// Frames sampled per second of video
    pub video_frames_per_second: u32,

    /// Sample rate of PCM buffers handed to the audio hasher
    pub audio_sample_rate: u32,

    /// Samples per audio analysis block
    pub audio_block_size: usize,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            gamma: DEFAULT_GAMMA,
            num_lines: DEFAULT_NUM_LINES,
            correlation_threshold: DEFAULT_THRESHOLD,
            hamming_threshold: DEFAULT_HAMMING_THRESHOLD,
            video_frames_per_second: 1,
            audio_sample_rate: 8000,
            audio_block_size: 4096,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::Configuration(format!(
                "sigma must be a non-negative number, got {}",
                self.sigma
            )));
        }

        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::Configuration(format!(
                "gamma must be a positive number, got {}",
                self.gamma
            )));
        }

        if self.num_lines == 0 {
            return Err(Error::Configuration(
                "num_lines must be at least 1".to_string(),
            ));
        }

        if !(-1.0..=1.0).contains(&self.correlation_threshold) {
            return Err(Error::Configuration(
                "Correlation threshold must be between -1 and 1".to_string(),
            ));
        }

        if self.hamming_threshold > 64 {
            return Err(Error::Configuration(
                "Hamming threshold must be between 0 and 64".to_string(),
            ));
        }

        if self.video_frames_per_second == 0
            || self.audio_sample_rate == 0
            || self.audio_block_size == 0
        {
            return Err(Error::Configuration(
                "Sampling rates and block sizes must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Radial digest parameters from this configuration
    pub fn digest_builder(&self) -> RadialDigestBuilder {
        RadialDigestBuilder::new(self.sigma, self.gamma, self.num_lines)
    }
}
