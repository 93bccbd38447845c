use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{Result, TrainErr};

/// The hyperparameters of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Full passes over the training set.
    pub epochs: usize,
    /// Maximum amount of samples per parameter update.
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Seeds the shuffling and initialization RNG; `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 64,
            learning_rate: 0.1,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Checks that the epoch count and batch size are usable.
    ///
    /// # Returns
    /// The `(epochs, batch_size)` pair as non-zero values, or
    /// `TrainErr::InvalidConfiguration` if either of them is zero.
    pub fn validate(&self) -> Result<(NonZeroUsize, NonZeroUsize)> {
        let epochs = NonZeroUsize::new(self.epochs)
            .ok_or_else(|| TrainErr::invalid_config("epochs must be greater than zero"))?;
        let batch_size = NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| TrainErr::invalid_config("batch size must be greater than zero"))?;

        Ok((epochs, batch_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{ "epochs": 3, "seed": 9 }"#;
        let config: TrainerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config,
            TrainerConfig {
                epochs: 3,
                batch_size: 64,
                learning_rate: 0.1,
                seed: Some(9),
            }
        );
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let config = TrainerConfig {
            batch_size: 0,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(TrainErr::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_epochs_is_invalid() {
        let config = TrainerConfig {
            epochs: 0,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(TrainErr::InvalidConfiguration(_))
        ));
    }
}
