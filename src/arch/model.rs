use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::Result;

/// The capability a `BatchTrainer` needs from a model.
///
/// A `Model` does not own its parameters: they live in a flat slice owned by the
/// trainer and are handed in on every call. It also knows nothing about datasets,
/// batching or update rules.
pub trait Model {
    /// Returns the amount of scalar parameters in the model.
    fn size(&self) -> usize;

    /// Returns the amount of features the model expects per sample.
    fn input_dim(&self) -> usize;

    /// Computes the mean loss over a batch and its gradient with respect to the
    /// parameters.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The batch features, one sample per row.
    /// * `y` - The batch labels.
    /// * `grad` - A buffer of `size()` elements, **overwritten** with the gradient.
    ///
    /// # Returns
    /// The batch loss, or `TrainErr::DimensionMismatch` if any of the shapes disagree
    /// with the model.
    fn loss_and_grad(
        &self,
        params: &[f32],
        x: ArrayView2<f32>,
        y: ArrayView1<f32>,
        grad: &mut [f32],
    ) -> Result<f32>;

    /// Predicts a `0`/`1` label for every row of `x`.
    fn predict(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>>;
}
