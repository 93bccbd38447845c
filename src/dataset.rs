use std::num::NonZeroUsize;

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{seq::SliceRandom, Rng};

use crate::{Result, TrainErr};

/// A batch of samples: the features and their labels.
pub type Batch<'a> = (ArrayView2<'a, f32>, ArrayView1<'a, f32>);

/// An in-memory labelled dataset for binary classification.
///
/// Row `i` of `x` holds the features of the `i`-th sample and `y[i]` its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The features, one sample per row.
    /// * `y` - The binary labels, one per row of `x`.
    ///
    /// # Returns
    /// The dataset, or an error if the amount of rows and labels differ or a
    /// label is neither `0` nor `1`.
    pub fn new(x: Array2<f32>, y: Array1<f32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(TrainErr::DimensionMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if let Some((index, &value)) = y
            .iter()
            .enumerate()
            .find(|(_, &v)| v != 0.0 && v != 1.0)
        {
            return Err(TrainErr::InvalidLabel { index, value });
        }

        Ok(Self { x, y })
    }

    /// Builds a dataset from a row-major feature buffer.
    ///
    /// # Arguments
    /// * `data` - The features of every sample, laid out one sample after the other.
    /// * `dim` - The amount of features per sample.
    /// * `labels` - The label of every sample.
    pub fn from_rows(data: Vec<f32>, dim: usize, labels: Vec<f32>) -> Result<Self> {
        let rows = labels.len();
        let got = data.len();
        let x = Array2::from_shape_vec((rows, dim), data).map_err(|_| {
            TrainErr::DimensionMismatch {
                what: "feature buffer",
                got,
                expected: rows * dim,
            }
        })?;

        Self::new(x, Array1::from_vec(labels))
    }

    /// The amount of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// The amount of features per sample.
    pub fn dim(&self) -> usize {
        self.x.ncols()
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.y.view()
    }

    /// Reorders the samples following a fresh uniformly random permutation.
    ///
    /// Features and labels are permuted together, so every sample keeps its label.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut permutation: Vec<usize> = (0..self.len()).collect();
        permutation.shuffle(rng);

        self.x = self.x.select(Axis(0), &permutation);
        self.y = self.y.select(Axis(0), &permutation);
    }

    /// Slices the dataset into consecutive batches.
    ///
    /// Yields `ceil(len / batch_size)` batches, all of them of `batch_size` samples
    /// except possibly the last one.
    pub fn batches(&self, batch_size: NonZeroUsize) -> impl Iterator<Item = Batch<'_>> {
        let size = batch_size.get();

        self.x
            .axis_chunks_iter(Axis(0), size)
            .zip(self.y.axis_chunks_iter(Axis(0), size))
    }

    /// Splits the dataset into a training set and a held-out evaluation set.
    ///
    /// The last `eval_fraction` of the samples (rounded, at least one) go to the
    /// evaluation set. Shuffle beforehand if the samples are ordered.
    ///
    /// # Returns
    /// A `(train, eval)` tuple, or an error if the fraction is not in `(0, 1)` or
    /// there are not enough samples to fill both sets.
    pub fn split(self, eval_fraction: f32) -> Result<(Dataset, Dataset)> {
        if !(eval_fraction > 0.0 && eval_fraction < 1.0) {
            return Err(TrainErr::invalid_config(format!(
                "eval fraction must be in (0, 1), got {eval_fraction}"
            )));
        }

        let n = self.len();
        if n < 2 {
            return Err(TrainErr::invalid_config(format!(
                "cannot split {n} samples into train and eval sets"
            )));
        }

        let n_eval = ((n as f32 * eval_fraction).round() as usize).clamp(1, n - 1);
        let n_train = n - n_eval;

        let train = Dataset {
            x: self.x.slice(s![..n_train, ..]).to_owned(),
            y: self.y.slice(s![..n_train]).to_owned(),
        };
        let eval = Dataset {
            x: self.x.slice(s![n_train.., ..]).to_owned(),
            y: self.y.slice(s![n_train..]).to_owned(),
        };

        Ok((train, eval))
    }

    /// The per-feature mean over all samples; zeros if the dataset is empty.
    pub fn feature_mean(&self) -> Array1<f32> {
        self.x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(self.dim()))
    }

    /// Subtracts `mean` from every sample.
    ///
    /// Compute the mean on the training set and center both sets with it.
    pub fn center(&mut self, mean: ArrayView1<f32>) -> Result<()> {
        if mean.len() != self.dim() {
            return Err(TrainErr::DimensionMismatch {
                what: "feature mean",
                got: mean.len(),
                expected: self.dim(),
            });
        }

        self.x -= &mean;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};

    fn indexed(n: usize) -> Dataset {
        let x = Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f32);
        let y = Array1::from_shape_fn(n, |i| (i % 2) as f32);
        Dataset::new(x, y).unwrap()
    }

    fn batch_sizes(dataset: &Dataset, batch_size: usize) -> Vec<usize> {
        let batch_size = NonZeroUsize::new(batch_size).unwrap();
        dataset.batches(batch_size).map(|(x, _)| x.nrows()).collect()
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let x = Array2::<f32>::zeros((3, 2));
        let y = Array1::<f32>::zeros(2);

        assert_eq!(
            Dataset::new(x, y),
            Err(TrainErr::DimensionMismatch {
                what: "labels",
                got: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn non_binary_labels_are_rejected() {
        let x = Array2::<f32>::zeros((3, 1));
        let y = array![0.0, 1.0, 0.5];

        assert_eq!(
            Dataset::new(x, y),
            Err(TrainErr::InvalidLabel {
                index: 2,
                value: 0.5
            })
        );
    }

    #[test]
    fn from_rows_checks_the_buffer_length() {
        let err = Dataset::from_rows(vec![1.0, 2.0, 3.0], 2, vec![0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            TrainErr::DimensionMismatch {
                what: "feature buffer",
                got: 3,
                expected: 4,
            }
        );
    }

    #[test]
    fn even_batches() {
        assert_eq!(batch_sizes(&indexed(128), 64), [64, 64]);
    }

    #[test]
    fn last_batch_is_short() {
        assert_eq!(batch_sizes(&indexed(130), 64), [64, 64, 2]);
    }

    #[test]
    fn batch_larger_than_dataset() {
        assert_eq!(batch_sizes(&indexed(5), 64), [5]);
    }

    #[test]
    fn batches_keep_labels_aligned() {
        let dataset = indexed(7);

        for (x, y) in dataset.batches(NonZeroUsize::new(3).unwrap()) {
            for (row, &label) in x.rows().into_iter().zip(y) {
                let idx = (row[0] / 2.0) as usize;
                assert_eq!(label, (idx % 2) as f32);
            }
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut dataset = indexed(50);
        let mut rng = StdRng::seed_from_u64(7);
        dataset.shuffle(&mut rng);

        let mut seen: Vec<usize> = dataset
            .x()
            .column(0)
            .iter()
            .map(|&v| (v / 2.0) as usize)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());

        for (row, &label) in dataset.x().rows().into_iter().zip(dataset.y()) {
            let idx = (row[0] / 2.0) as usize;
            assert_eq!(row[1], row[0] + 1.0);
            assert_eq!(label, (idx % 2) as f32);
        }
    }

    #[test]
    fn split_keeps_every_sample() {
        let (train, eval) = indexed(10).split(0.2).unwrap();

        assert_eq!(train.len(), 8);
        assert_eq!(eval.len(), 2);
        assert_eq!(eval.x()[[0, 0]], 16.0);
    }

    #[test]
    fn split_rejects_bad_fractions() {
        assert!(matches!(
            indexed(10).split(1.0),
            Err(TrainErr::InvalidConfiguration(_))
        ));
        assert!(matches!(
            indexed(1).split(0.5),
            Err(TrainErr::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn centering_removes_the_mean() {
        let mut dataset = Dataset::new(array![[1.0, 4.0], [3.0, 8.0]], array![0.0, 1.0]).unwrap();
        let mean = dataset.feature_mean();
        assert_eq!(mean, array![2.0_f32, 6.0]);

        dataset.center(mean.view()).unwrap();
        assert_eq!(dataset.x(), array![[-1.0_f32, -2.0], [1.0, 2.0]]);
    }

    #[test]
    fn centering_checks_the_dimension() {
        let mut dataset = indexed(3);
        assert!(dataset.center(array![1.0].view()).is_err());
    }
}
