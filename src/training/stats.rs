use ndarray::{ArrayView1, Zip};

/// Statistics produced by a single training epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochStats {
    epoch: usize,
    loss: f32,
    accuracy: f32,
    batches: usize,
    samples: usize,
}

impl EpochStats {
    /// Creates a new `EpochStats`.
    ///
    /// # Args
    /// * `epoch` - Zero-based index of the epoch.
    /// * `loss` - Mean of the batch losses recorded during the epoch.
    /// * `accuracy` - Accuracy on the evaluation set after the epoch.
    /// * `batches` - Number of batches processed.
    /// * `samples` - Total number of samples processed.
    pub fn new(epoch: usize, loss: f32, accuracy: f32, batches: usize, samples: usize) -> Self {
        Self {
            epoch,
            loss,
            accuracy,
            batches,
            samples,
        }
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Returns the mean batch loss of the epoch.
    pub fn loss(&self) -> f32 {
        self.loss
    }

    /// Returns the evaluation accuracy, in `[0, 1]`.
    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// The fraction of predictions equal to the ground truth.
///
/// Returns `0` for empty inputs.
///
/// # Panics
/// If `y_pred` and `y` have different lengths.
pub fn accuracy(y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
    if y.is_empty() {
        return 0.0;
    }

    let correct = Zip::from(&y_pred)
        .and(&y)
        .fold(0usize, |acc, p, t| acc + usize::from(p == t));

    correct as f32 / y.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accuracy_counts_matches() {
        let y_pred = array![1.0_f32, 0.0, 1.0, 1.0];
        let y = array![1.0_f32, 1.0, 1.0, 0.0];

        assert_eq!(accuracy(y_pred.view(), y.view()), 0.5);
    }

    #[test]
    fn accuracy_of_nothing_is_zero() {
        let empty = ndarray::Array1::<f32>::zeros(0);
        assert_eq!(accuracy(empty.view(), empty.view()), 0.0);
    }
}
