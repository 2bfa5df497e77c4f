//! Spectral fingerprinting of PCM audio.
//!
//! Samples are cut into consecutive blocks of `block_size` (a trailing partial block is
//! dropped). Each block is Hamming-windowed and passed through a DCT-II, and the
//! spectral energy is summed in 33 logarithmically spaced bands between 300 Hz and
//! 3 kHz. Bit `j` of a block's 32-bit hash is set when the energy difference between
//! bands `j` and `j + 1` grew compared to the previous block.

use log::debug;

use super::dct::dct_1d;
use crate::error::{Error, Result};
use crate::types::AudioHashSequence;

/// Number of energy bands; adjacent pairs give the 32 hash bits
pub const NUM_BANDS: usize = 33;

pub const MIN_FREQUENCY: f64 = 300.0;
pub const MAX_FREQUENCY: f64 = 3000.0;

fn hamming_window(len: usize) -> Vec<f32> {
    if len == 1 {
        return vec![1.0];
    }
    let span = (len - 1) as f32;
    (0..len)
        .map(|n| 0.54 - 0.46 * (2.0 * std::f32::consts::PI * n as f32 / span).cos())
        .collect()
}

/// Band holding `frequency`, if it lies inside the analysed range
fn band_of(frequency: f64) -> Option<usize> {
    if !(MIN_FREQUENCY..MAX_FREQUENCY).contains(&frequency) {
        return None;
    }
    let position = (frequency / MIN_FREQUENCY).ln() / (MAX_FREQUENCY / MIN_FREQUENCY).ln();
    Some(((position * NUM_BANDS as f64) as usize).min(NUM_BANDS - 1))
}

/// Compute one 32-bit hash per block of PCM samples
pub fn hash_audio(
    samples: &[f32],
    sample_rate: u32,
    block_size: usize,
) -> Result<AudioHashSequence> {
    if block_size == 0 || sample_rate == 0 {
        return Err(Error::Configuration(format!(
            "audio needs a positive sample rate and block size, got {} Hz / {} samples",
            sample_rate, block_size
        )));
    }
    if samples.len() < block_size {
        return Err(Error::InsufficientData {
            needed: block_size,
            got: samples.len(),
        });
    }

    let window = hamming_window(block_size);
    let bin_width = sample_rate as f64 / (2.0 * block_size as f64);
    let bands: Vec<Option<usize>> = (0..block_size)
        .map(|k| band_of(k as f64 * bin_width))
        .collect();

    let mut previous = [0.0f64; NUM_BANDS];
    let mut hashes = Vec::with_capacity(samples.len() / block_size);
    let mut buffer = vec![0.0f32; block_size];

    for block in samples.chunks_exact(block_size) {
        buffer
            .iter_mut()
            .zip(block.iter().zip(&window))
            .for_each(|(b, (s, w))| *b = s * w);
        dct_1d(&mut buffer);

        let mut energy = [0.0f64; NUM_BANDS];
        for (coefficient, band) in buffer.iter().zip(&bands) {
            if let Some(band) = band {
                energy[*band] += (*coefficient as f64).powi(2);
            }
        }

        let hash = (0..NUM_BANDS - 1)
            .filter(|&j| {
                (energy[j] - energy[j + 1]) - (previous[j] - previous[j + 1]) > 0.0
            })
            .fold(0u32, |hash, j| hash | (1u32 << j));

        hashes.push(hash);
        previous = energy;
    }

    debug!(
        "Hashed {} audio blocks of {} samples at {} Hz",
        hashes.len(),
        block_size,
        sample_rate
    );

    Ok(hashes)
}
