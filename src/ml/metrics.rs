//! Evaluation metrics
//!
//! - MSE for continuous fit quality
//! - Quadratic-weighted Cohen's kappa for ordinal agreement, computed on
//!   integer-rounded predictions with the classical observed/expected
//!   weighted-matrix formula

use ndarray::Array1;

/// Metrics calculator
pub struct Metrics;

impl Metrics {
    /// Mean Squared Error
    pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "Arrays must have same length");

        if y_true.is_empty() {
            return 0.0;
        }

        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum::<f64>()
            / y_true.len() as f64
    }

    /// Round continuous score estimates to the nearest integer rating
    pub fn round_to_ratings(values: &[f64]) -> Vec<i64> {
        values.iter().map(|v| v.round() as i64).collect()
    }

    /// Quadratic-weighted Cohen's kappa between integer ratings.
    ///
    /// Disagreement between classes `i` and `j` is weighted by
    /// `(i - j)^2 / (k - 1)^2` over the observed rating range; kappa is
    /// `1 - sum(w * observed) / sum(w * expected)` where the expected matrix
    /// is the outer product of the two marginal histograms. Perfect
    /// agreement yields 1.0; systematic maximal disagreement is <= 0.
    pub fn quadratic_weighted_kappa(y_true: &[i64], y_pred: &[i64]) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "Arrays must have same length");

        let n = y_true.len();
        if n == 0 {
            return 0.0;
        }

        let min_rating = y_true.iter().chain(y_pred.iter()).min().copied().unwrap();
        let max_rating = y_true.iter().chain(y_pred.iter()).max().copied().unwrap();
        let k = (max_rating - min_rating + 1) as usize;

        // A single observed class means full agreement by definition
        if k == 1 {
            return 1.0;
        }

        // Observed agreement matrix and marginal histograms
        let mut observed = vec![vec![0.0f64; k]; k];
        let mut hist_true = vec![0.0f64; k];
        let mut hist_pred = vec![0.0f64; k];

        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            let ti = (t - min_rating) as usize;
            let pi = (p - min_rating) as usize;
            observed[ti][pi] += 1.0;
            hist_true[ti] += 1.0;
            hist_pred[pi] += 1.0;
        }

        let denom = ((k - 1) * (k - 1)) as f64;
        let mut weighted_observed = 0.0;
        let mut weighted_expected = 0.0;

        for i in 0..k {
            for j in 0..k {
                let weight = ((i as f64 - j as f64).powi(2)) / denom;
                let expected = hist_true[i] * hist_pred[j] / n as f64;
                weighted_observed += weight * observed[i][j];
                weighted_expected += weight * expected;
            }
        }

        if weighted_expected == 0.0 {
            return 1.0;
        }

        1.0 - weighted_observed / weighted_expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mse() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 3.0];
        assert_eq!(Metrics::mse(&y_true, &y_pred), 0.0);

        let y_off = array![2.0, 3.0, 4.0];
        assert!((Metrics::mse(&y_true, &y_off) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_to_ratings() {
        assert_eq!(Metrics::round_to_ratings(&[1.4, 2.5, 3.6]), vec![1, 3, 4]);
    }

    #[test]
    fn test_kappa_perfect_agreement_is_one() {
        let ratings = vec![2, 4, 6, 2, 4, 6, 3, 5];
        let kappa = Metrics::quadratic_weighted_kappa(&ratings, &ratings);
        assert!((kappa - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kappa_maximal_discordance_is_not_positive() {
        // Predictions always at the opposite end of the scale
        let y_true = vec![0, 0, 0, 0, 4, 4, 4, 4];
        let y_pred = vec![4, 4, 4, 4, 0, 0, 0, 0];
        let kappa = Metrics::quadratic_weighted_kappa(&y_true, &y_pred);
        assert!(kappa <= 0.0);
    }

    #[test]
    fn test_kappa_known_value() {
        // Hand-checked small example: one off-by-one disagreement out of
        // four ratings on a 0..=2 scale
        let y_true = vec![0, 1, 2, 2];
        let y_pred = vec![0, 1, 2, 1];
        let kappa = Metrics::quadratic_weighted_kappa(&y_true, &y_pred);
        assert!(kappa > 0.0 && kappa < 1.0);
    }

    #[test]
    fn test_kappa_single_class_degenerate() {
        let y_true = vec![3, 3, 3];
        let y_pred = vec![3, 3, 3];
        assert_eq!(Metrics::quadratic_weighted_kappa(&y_true, &y_pred), 1.0);
    }
}
