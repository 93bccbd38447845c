use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::{arch::Model, Result};

/// Builds the run's random number generator.
///
/// # Arguments
/// * `seed` - A fixed seed for reproducible runs, or `None` to seed from the OS.
pub fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draws a starting parameter vector for `model`.
///
/// The first `input_dim()` parameters (the weights) are sampled from `U[-1, 1)`,
/// the remaining ones (the bias) start at zero.
pub fn init_params<M, R>(model: &M, rng: &mut R) -> Result<Vec<f32>>
where
    M: Model,
    R: Rng + ?Sized,
{
    let uniform = Uniform::new(-1.0_f32, 1.0)?;
    let n_weights = model.input_dim().min(model.size());

    let mut params = vec![0.0; model.size()];
    params[..n_weights]
        .iter_mut()
        .for_each(|w| *w = uniform.sample(rng));

    Ok(params)
}
