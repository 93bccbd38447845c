use ndarray::{Array1, ArrayView1, Zip};

use super::LossFn;

/// Mean squared error, `mean((p - y)^2)`.
#[derive(Default, Clone, Copy, Debug)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        if y_pred.is_empty() {
            return 0.0;
        }

        let total: f32 = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0, |acc, &p, &t| acc + (p - t).powi(2));

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        let scale = 2.0 / y_pred.len() as f32;
        Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&p, &t| (p - t) * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mse_of_a_batch() {
        let y_pred = array![0.5_f32, 1.0];
        let y = array![0.0_f32, 1.0];

        assert_eq!(Mse.loss(y_pred.view(), y.view()), 0.125);
        assert_eq!(Mse.loss_prime(y_pred.view(), y.view()), array![0.5_f32, 0.0]);
    }
}
