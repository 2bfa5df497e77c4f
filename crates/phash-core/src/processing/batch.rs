//! Parallel hashing of many image files.
//!
//! Each file is an independent call on the global `rayon` pool. One file failing never
//! aborts the batch: every entry carries its own result, and results come back in
//! input order.

use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::image_hash::image_hash_from_file;
use super::radial::RadialDigestBuilder;
use crate::error::{Error, Result};
use crate::logging::log_hash_error;
use crate::types::{Digest, ImageHash};

/// DCT hash of one file
#[derive(Debug)]
pub struct FileHash {
    pub path: PathBuf,
    pub hash: Result<ImageHash>,
}

/// Radial digest of one file
#[derive(Debug)]
pub struct FileDigest {
    pub path: PathBuf,
    pub digest: Result<Digest>,
}

/// Compute DCT hashes for a set of image files in parallel
pub fn hash_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<FileHash> {
    let start = Instant::now();

    let results: Vec<FileHash> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let hash = image_hash_from_file(path);
            if let Err(e) = &hash {
                log_hash_error(path, e);
            }
            FileHash {
                path: path.to_path_buf(),
                hash,
            }
        })
        .collect();

    let failed = results.iter().filter(|r| r.hash.is_err()).count();
    info!(
        "Hashed {} files ({} failed) in {:.2?}",
        results.len(),
        failed,
        start.elapsed()
    );

    results
}

/// Build radial digests for a set of image files in parallel
pub fn digest_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    builder: &RadialDigestBuilder,
) -> Vec<FileDigest> {
    let start = Instant::now();

    let results: Vec<FileDigest> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let digest = image::open(path)
                .map_err(Error::from)
                .and_then(|img| builder.build(path.display().to_string(), &img.to_luma8()));
            if let Err(e) = &digest {
                log_hash_error(path, e);
            }
            FileDigest {
                path: path.to_path_buf(),
                digest,
            }
        })
        .collect();

    info!(
        "Built {} digests in {:.2?}",
        results.len(),
        start.elapsed()
    );

    results
}
