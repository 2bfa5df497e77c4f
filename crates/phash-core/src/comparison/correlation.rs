//! Rotation-tolerant comparison of radial digests.
//!
//! Rotating an image by `s * 180 / N` degrees moves its projection line `i` to line
//! `i + s`. The correlator therefore tries every circular line shift of the second
//! digest and keeps the best Pearson coefficient over all lines at that shift.
//!
//! Samples beyond the image edge are zero in every digest. Pairs where either side
//! is zero are left out of the coefficient, otherwise that shared border would make
//! any two images of the same size look alike.

use log::debug;

use crate::error::{Error, Result};
use crate::types::{Correlation, Digest};

/// Peak coefficient at or above which two digests are considered a match
pub const DEFAULT_THRESHOLD: f64 = 0.90;

fn check_shapes(a: &Digest, b: &Digest) -> Result<()> {
    let ragged = a
        .coefficients()
        .iter()
        .zip(b.coefficients())
        .any(|(x, y)| x.len() != y.len());

    if a.size() == 0 || a.size() != b.size() || ragged {
        return Err(Error::DimensionMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

/// Running sums over the paired samples at one shift
#[derive(Default)]
struct Moments {
    count: f64,
    sum_a: f64,
    sum_b: f64,
    sum_aa: f64,
    sum_bb: f64,
    sum_ab: f64,
}

impl Moments {
    fn add(&mut self, p: f64, q: f64) {
        self.count += 1.0;
        self.sum_a += p;
        self.sum_b += q;
        self.sum_aa += p * p;
        self.sum_bb += q * q;
        self.sum_ab += p * q;
    }

    /// Pearson coefficient of the paired samples
    fn coefficient(&self) -> f64 {
        if self.count == 0.0 {
            return 0.0;
        }

        let n = self.count;
        let var_a = (self.sum_aa - self.sum_a * self.sum_a / n).max(0.0);
        let var_b = (self.sum_bb - self.sum_b * self.sum_b / n).max(0.0);
        let cov = self.sum_ab - self.sum_a * self.sum_b / n;

        // Relative tolerance, a flat profile still accumulates rounding noise
        let flat = |var: f64, sum_sq: f64| var <= sum_sq * 1e-12;
        match (flat(var_a, self.sum_aa), flat(var_b, self.sum_bb)) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => (cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0),
        }
    }
}

fn is_blank(digest: &Digest) -> bool {
    digest.coefficients().iter().flatten().all(|&v| v == 0.0)
}

/// Correlate two digests over all circular line shifts
pub fn cross_correlate(a: &Digest, b: &Digest, threshold: f64) -> Result<Correlation> {
    check_shapes(a, b)?;

    let lines = a.size();

    // Two blank images are identical; a blank image shares no samples with anything else
    let blank = (is_blank(a), is_blank(b));
    let coefficient_at = |shift: usize| -> f64 {
        match blank {
            (true, true) => return 1.0,
            (true, false) | (false, true) => return 0.0,
            (false, false) => {}
        }

        let mut moments = Moments::default();
        for i in 0..lines {
            let x = &a.coefficients()[i];
            let y = &b.coefficients()[(i + shift) % lines];
            for (&p, &q) in x.iter().zip(y) {
                if p != 0.0 && q != 0.0 {
                    moments.add(p, q);
                }
            }
        }
        moments.coefficient()
    };

    let (offset, peak) = (0..lines)
        .map(|shift| (shift, coefficient_at(shift)))
        .fold((0, f64::NEG_INFINITY), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    let correlation = Correlation {
        peak,
        offset,
        is_match: peak >= threshold,
    };

    debug!(
        "Correlated {} with {}: peak {:.4} at shift {} (match: {})",
        a.shape(),
        b.shape(),
        correlation.peak,
        correlation.offset,
        correlation.is_match
    );

    Ok(correlation)
}
