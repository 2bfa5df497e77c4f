// Core modules
mod dct;

pub mod audio;
pub mod batch;
pub mod image_hash;
pub mod radial;
pub mod video;

// Reexport core functionality
pub use audio::hash_audio;
pub use batch::{digest_files, hash_files, FileDigest, FileHash};
pub use dct::{dct_1d, dct_2d};
pub use image_hash::{dct_image_hash, image_hash_from_file, image_hash_from_img};
pub use radial::{image_digest, image_digest_from_file, RadialDigestBuilder};
pub use video::{hash_frames, hash_video, FrameSequence, FrameSource};
