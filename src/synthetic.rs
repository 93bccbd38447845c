use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{dataset::Dataset, Result, TrainErr};

/// Samples a linearly separable-ish two-class dataset.
///
/// Every feature of a class `0` sample is drawn from `N(-separation / 2, 1)` and
/// every feature of a class `1` sample from `N(separation / 2, 1)`. Classes are
/// interleaved: even rows are class `0`, odd rows class `1`.
///
/// # Arguments
/// * `n_per_class` - Amount of samples of each class.
/// * `dim` - Amount of features per sample.
/// * `separation` - Distance between the two class means along every axis.
/// * `rng` - A random number generator.
pub fn two_blobs<R>(
    n_per_class: usize,
    dim: usize,
    separation: f32,
    rng: &mut R,
) -> Result<Dataset>
where
    R: Rng + ?Sized,
{
    if dim == 0 {
        return Err(TrainErr::invalid_config("samples need at least one feature"));
    }
    if !separation.is_finite() {
        return Err(TrainErr::invalid_config(format!(
            "class separation must be finite, got {separation}"
        )));
    }

    let half = separation / 2.0;
    let negative = Normal::new(-half, 1.0)?;
    let positive = Normal::new(half, 1.0)?;

    let n = 2 * n_per_class;
    let y = Array1::from_shape_fn(n, |i| (i % 2) as f32);
    let x = Array2::from_shape_fn((n, dim), |(i, _)| {
        if i % 2 == 0 {
            negative.sample(rng)
        } else {
            positive.sample(rng)
        }
    });

    Dataset::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn blobs_are_balanced_and_separated() {
        let mut rng = StdRng::seed_from_u64(11);
        let dataset = two_blobs(500, 3, 4.0, &mut rng).unwrap();

        assert_eq!(dataset.len(), 1000);
        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.y().sum(), 500.0);

        let means = dataset.x().sum_axis(Axis(1)) / 3.0;
        let (mut neg, mut pos) = (0.0, 0.0);
        for (m, &label) in means.iter().zip(dataset.y()) {
            if label == 0.0 {
                neg += m;
            } else {
                pos += m;
            }
        }

        assert!(neg / 500.0 < -1.5, "class 0 mean {}", neg / 500.0);
        assert!(pos / 500.0 > 1.5, "class 1 mean {}", pos / 500.0);
    }

    #[test]
    fn zero_features_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(two_blobs(10, 0, 1.0, &mut rng).is_err());
    }

    #[test]
    fn non_finite_separation_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            two_blobs(10, 2, f32::NAN, &mut rng),
            Err(TrainErr::InvalidConfiguration(_))
        ));
    }
}
