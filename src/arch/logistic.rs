use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut1};

use super::{
    activations::Sigmoid,
    loss::{BinaryCrossEntropy, LossFn},
    Model,
};
use crate::{Result, TrainErr};

/// Output probabilities strictly above this value are labelled `1`.
const THRESHOLD: f32 = 0.5;

/// Logistic regression: a linear score followed by a sigmoid.
///
/// The parameters are laid out as the `dim` weights followed by the bias.
#[derive(Clone, Debug)]
pub struct LogisticRegression<L: LossFn = BinaryCrossEntropy> {
    dim: usize,
    act_fn: Sigmoid,
    loss_fn: L,
}

impl LogisticRegression<BinaryCrossEntropy> {
    /// Creates a new `LogisticRegression` trained against binary cross-entropy.
    ///
    /// # Arguments
    /// * `dim` - The amount of input features.
    pub fn new(dim: usize) -> Self {
        Self::with_loss(dim, BinaryCrossEntropy)
    }
}

impl<L: LossFn> LogisticRegression<L> {
    /// Creates a new `LogisticRegression` trained against the given loss.
    pub fn with_loss(dim: usize, loss_fn: L) -> Self {
        Self {
            dim,
            act_fn: Sigmoid::new(),
            loss_fn,
        }
    }

    /// Computes the output probability of every row of `x`.
    pub fn probabilities(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let z = self.scores(params, x)?;
        Ok(z.mapv(|z| self.act_fn.f(z)))
    }

    fn scores(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>> {
        self.check_params(params.len())?;
        self.check_features(x.ncols())?;

        let (w, b) = self.view_params(params);
        Ok(x.dot(&w) + b)
    }

    fn check_params(&self, got: usize) -> Result<()> {
        if got != self.size() {
            return Err(TrainErr::DimensionMismatch {
                what: "parameters",
                got,
                expected: self.size(),
            });
        }

        Ok(())
    }

    fn check_features(&self, got: usize) -> Result<()> {
        if got != self.dim {
            return Err(TrainErr::DimensionMismatch {
                what: "batch features",
                got,
                expected: self.dim,
            });
        }

        Ok(())
    }

    /// Gives a view of the raw parameter slice as the weights and bias.
    fn view_params<'a>(&self, params: &'a [f32]) -> (ArrayView1<'a, f32>, f32) {
        let (w, b) = params.split_at(self.dim);
        (ArrayView1::from(w), b[0])
    }

    /// Gives a view of the raw gradient slice as the weight and bias gradients.
    fn view_grad<'a>(&self, grad: &'a mut [f32]) -> (ArrayViewMut1<'a, f32>, &'a mut f32) {
        let (dw, db) = grad.split_at_mut(self.dim);
        (ArrayViewMut1::from(dw), &mut db[0])
    }
}

impl<L: LossFn> Model for LogisticRegression<L> {
    fn size(&self) -> usize {
        self.dim + 1
    }

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn loss_and_grad(
        &self,
        params: &[f32],
        x: ArrayView2<f32>,
        y: ArrayView1<f32>,
        grad: &mut [f32],
    ) -> Result<f32> {
        self.check_params(grad.len())?;
        if y.len() != x.nrows() {
            return Err(TrainErr::DimensionMismatch {
                what: "batch labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let z = self.scores(params, x)?;
        let y_pred = z.mapv(|z| self.act_fn.f(z));
        let loss = self.loss_fn.loss(y_pred.view(), y);

        let d = self.loss_fn.sigmoid_delta(y_pred.view(), y, z.view());

        let (mut dw, db) = self.view_grad(grad);
        dw.assign(&x.t().dot(&d));
        *db = d.sum();

        Ok(loss)
    }

    fn predict(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let p = self.probabilities(params, x)?;
        Ok(p.mapv(|p| if p > THRESHOLD { 1.0 } else { 0.0 }))
    }
}
