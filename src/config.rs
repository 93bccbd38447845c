use std::{fs, path::Path};

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    arch::{
        loss::{BinaryCrossEntropy, Mse},
        LogisticRegression, Model,
    },
    dataset::Dataset,
    synthetic,
    training::{self, EpochStats, TrainerConfig},
    Result, TrainErr,
};

/// The loss the logistic regression is trained against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFnConfig {
    #[default]
    BinaryCrossEntropy,
    Mse,
}

/// How the demo dataset is generated and split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub samples_per_class: usize,
    pub dim: usize,
    pub separation: f32,
    /// Fraction of the samples held out for evaluation.
    pub eval_fraction: f32,
    /// Subtract the training set's feature mean from both sets.
    pub center: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            samples_per_class: 1000,
            dim: 16,
            separation: 1.0,
            eval_fraction: 0.2,
            center: true,
        }
    }
}

/// A full run: data, loss and trainer hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub trainer: TrainerConfig,
    pub data: DataConfig,
    pub loss: LossFnConfig,
    /// Amount of evaluation samples whose prediction is reported after training.
    pub preview: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trainer: TrainerConfig::default(),
            data: DataConfig::default(),
            loss: LossFnConfig::default(),
            preview: 10,
        }
    }
}

impl RunConfig {
    /// Reads a `RunConfig` from a JSON file.
    ///
    /// # Errors
    /// Returns `TrainErr::Io` if the file cannot be read and `TrainErr::Parse` if
    /// it is not a valid `RunConfig`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TrainErr::Io(format!("cannot read '{}': {e}", path.display())))?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Generates, splits and optionally centers the demo dataset.
    ///
    /// # Returns
    /// A `(train, eval)` tuple.
    pub fn datasets(&self) -> Result<(Dataset, Dataset)> {
        let DataConfig {
            samples_per_class,
            dim,
            separation,
            eval_fraction,
            center,
        } = self.data;

        let mut rng = training::generate_rng(self.trainer.seed);
        let mut dataset = synthetic::two_blobs(samples_per_class, dim, separation, &mut rng)?;
        dataset.shuffle(&mut rng);

        let (mut train, mut eval) = dataset.split(eval_fraction)?;
        if center {
            let mean = train.feature_mean();
            train.center(mean.view())?;
            eval.center(mean.view())?;
        }

        Ok((train, eval))
    }

    /// Trains a logistic regression with the configured loss.
    ///
    /// # Returns
    /// The trained parameters and the per-epoch statistics.
    pub fn train(
        &self,
        train: &mut Dataset,
        eval: &Dataset,
    ) -> Result<(Vec<f32>, Vec<EpochStats>)> {
        let dim = train.dim();

        match self.loss {
            LossFnConfig::BinaryCrossEntropy => training::train(
                train,
                eval,
                self.trainer,
                LogisticRegression::with_loss(dim, BinaryCrossEntropy),
            ),
            LossFnConfig::Mse => training::train(
                train,
                eval,
                self.trainer,
                LogisticRegression::with_loss(dim, Mse),
            ),
        }
    }

    /// Labels every row of `x` with the model `train` produced.
    pub fn predict(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array1<f32>> {
        let dim = x.ncols();

        match self.loss {
            LossFnConfig::BinaryCrossEntropy => {
                LogisticRegression::with_loss(dim, BinaryCrossEntropy).predict(params, x)
            }
            LossFnConfig::Mse => LogisticRegression::with_loss(dim, Mse).predict(params, x),
        }
    }
}
