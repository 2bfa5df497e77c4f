use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the phash library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image file could not be opened or decoded
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Image is degenerate and cannot be hashed
    #[error("Hash computation failed: {0}")]
    HashComputation(String),

    /// Image or parameters unusable for a radial digest
    #[error("Digest error: {0}")]
    Digest(String),

    /// Two digests do not have the same shape
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: String, right: String },

    /// Upstream media decoder failed to produce a frame or samples
    #[error("Decode error: {0}")]
    Decode(String),

    /// Not enough input to fill one analysis block
    #[error("Insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
