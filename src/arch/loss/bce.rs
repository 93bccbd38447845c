use ndarray::{Array1, ArrayView1, Zip};

use super::LossFn;

/// Predictions are clipped to `[EPSILON, 1 - EPSILON]` before taking logarithms.
const EPSILON: f32 = 1e-7;

/// Binary cross-entropy, averaged over the batch.
///
/// Expects `y_pred` to hold probabilities and `y` labels in `{0, 1}`.
#[derive(Default, Clone, Copy, Debug)]
pub struct BinaryCrossEntropy;

impl BinaryCrossEntropy {
    /// Returns a new `BinaryCrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

fn clip(p: f32) -> f32 {
    p.clamp(EPSILON, 1. - EPSILON)
}

impl LossFn for BinaryCrossEntropy {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        if y_pred.is_empty() {
            return 0.0;
        }

        let total: f32 = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0, |acc, &p, &t| {
                let p = clip(p);
                acc - (t * p.ln() + (1. - t) * (1. - p).ln())
            });

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        let n = y_pred.len() as f32;

        Zip::from(&y_pred).and(&y).map_collect(|&p, &t| {
            let p = clip(p);
            (p - t) / (p * (1. - p)) / n
        })
    }

    /// `(p - y) / n` on the unclipped probabilities: the sigmoid's derivative cancels
    /// the denominator of `loss_prime`, so the gradient keeps its size when `z` saturates.
    fn sigmoid_delta(
        &self,
        y_pred: ArrayView1<f32>,
        y: ArrayView1<f32>,
        _z: ArrayView1<f32>,
    ) -> Array1<f32> {
        let n = y_pred.len() as f32;
        Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&p, &t| (p - t) / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn confident_right_answers_cost_almost_nothing() {
        let y_pred = array![0.999_f32, 0.001];
        let y = array![1.0_f32, 0.0];

        let loss = BinaryCrossEntropy.loss(y_pred.view(), y.view());
        assert!(loss >= 0.0 && loss < 0.01, "got {loss}");
    }

    #[test]
    fn half_probability_costs_ln2() {
        let y_pred = array![0.5_f32, 0.5];
        let y = array![1.0_f32, 0.0];

        let loss = BinaryCrossEntropy.loss(y_pred.view(), y.view());
        assert!((loss - std::f32::consts::LN_2).abs() < 1e-6, "got {loss}");
    }

    #[test]
    fn saturated_predictions_stay_finite() {
        let y_pred = array![1.0_f32, 0.0];
        let y = array![0.0_f32, 1.0];

        assert!(BinaryCrossEntropy.loss(y_pred.view(), y.view()).is_finite());
        assert!(BinaryCrossEntropy
            .loss_prime(y_pred.view(), y.view())
            .iter()
            .all(|d| d.is_finite()));
    }

    #[test]
    fn sigmoid_delta_is_the_mean_residual() {
        let y_pred = array![1.0_f32, 0.25];
        let y = array![0.0_f32, 1.0];
        let z = array![40.0_f32, -1.1];

        let delta = BinaryCrossEntropy.sigmoid_delta(y_pred.view(), y.view(), z.view());
        assert_eq!(delta, array![0.5_f32, -0.375]);
    }
}
