//! Discrete cosine transform helpers built on `rustdct`.
//!
//! Transforms are unnormalised DCT-II: `X[k] = sum(x[n] * cos(pi / N * (n + 0.5) * k))`.
//! Callers only compare coefficients against each other, so no scaling is applied.
//! Every call plans its own transform; nothing is cached between calls.

use ndarray::{aview1, Array2};
use rustdct::DctPlanner;

/// Apply a 2D DCT-II in place, rows first, then columns
pub fn dct_2d(matrix: &mut Array2<f32>) {
    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut planner = DctPlanner::new();

    let row_dct = planner.plan_dct2(cols);
    let mut buffer = vec![0.0f32; cols];
    for mut row in matrix.rows_mut() {
        buffer.iter_mut().zip(row.iter()).for_each(|(b, v)| *b = *v);
        row_dct.process_dct2(&mut buffer);
        row.assign(&aview1(&buffer));
    }

    let col_dct = planner.plan_dct2(rows);
    let mut buffer = vec![0.0f32; rows];
    for mut column in matrix.columns_mut() {
        buffer.iter_mut().zip(column.iter()).for_each(|(b, v)| *b = *v);
        col_dct.process_dct2(&mut buffer);
        column.assign(&aview1(&buffer));
    }
}

/// Apply a 1D DCT-II in place
pub fn dct_1d(signal: &mut [f32]) {
    if signal.is_empty() {
        return;
    }
    DctPlanner::new().plan_dct2(signal.len()).process_dct2(signal);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_dc_term_of_constant_signal() {
        let mut signal = vec![2.0f32; 16];
        dct_1d(&mut signal);
        assert!((signal[0] - 32.0).abs() < EPS);
        assert!(signal[1..].iter().all(|c| c.abs() < EPS));
    }

    #[test]
    fn test_single_cosine_lands_in_its_bin() {
        let n = 32;
        let mut signal: Vec<f32> = (0..n)
            .map(|i| (std::f32::consts::PI / n as f32 * (i as f32 + 0.5) * 3.0).cos())
            .collect();
        dct_1d(&mut signal);

        let peak = signal
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(3));
    }

    #[test]
    fn test_2d_constant_matrix_has_only_dc() {
        let mut matrix = Array2::from_elem((8, 8), 1.0f32);
        dct_2d(&mut matrix);
        assert!((matrix[[0, 0]] - 64.0).abs() < EPS);
        for ((r, c), value) in matrix.indexed_iter() {
            if (r, c) != (0, 0) {
                assert!(value.abs() < EPS, "({}, {}) = {}", r, c, value);
            }
        }
    }

    #[test]
    fn test_2d_matches_separable_rows_then_columns() {
        let mut matrix = Array2::from_shape_fn((4, 6), |(r, c)| (r * 6 + c) as f32);
        let original = matrix.clone();
        dct_2d(&mut matrix);

        // Coefficient (1, 0) only depends on the row sums' vertical variation
        let row_sums: Vec<f32> = original.rows().into_iter().map(|r| r.sum()).collect();
        let mut expected = row_sums.clone();
        dct_1d(&mut expected);
        assert!((matrix[[1, 0]] - expected[1]).abs() < 1e-2);
    }
}
