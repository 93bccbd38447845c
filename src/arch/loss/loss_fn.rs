use ndarray::{Array1, ArrayView1, Zip};

use crate::arch::activations::Sigmoid;

/// A loss over a batch of scalar predictions.
pub trait LossFn {
    /// The mean loss of the batch.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32;

    /// The derivative of `loss` with respect to every prediction.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32>;

    /// The derivative of `loss` with respect to every score `z`, where
    /// `y_pred = sigmoid(z)`.
    ///
    /// Defaults to the chain rule, `loss_prime ⊙ sigmoid'(z)`. Losses with a closed
    /// form that survives a saturated sigmoid should override it.
    fn sigmoid_delta(
        &self,
        y_pred: ArrayView1<f32>,
        y: ArrayView1<f32>,
        z: ArrayView1<f32>,
    ) -> Array1<f32> {
        let sigmoid = Sigmoid::new();
        let mut delta = self.loss_prime(y_pred, y);
        Zip::from(&mut delta)
            .and(&z)
            .for_each(|d, &z| *d *= sigmoid.df(z));

        delta
    }
}
