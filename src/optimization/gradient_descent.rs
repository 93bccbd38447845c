use super::Optimizer;
use crate::{Result, TrainErr};

/// Gradient descent with a fixed learning rate.
#[derive(Clone, Copy, Debug)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    ///
    /// # Returns
    /// An error if the learning rate is not a positive finite number.
    pub fn new(learning_rate: f32) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(TrainErr::invalid_config(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }

        Ok(Self { learning_rate })
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, `p <- p - lr * g`.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;

        params
            .iter_mut()
            .zip(grad)
            .for_each(|(p, g)| *p -= lr * g);
    }
}
