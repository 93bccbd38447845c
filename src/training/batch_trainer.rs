use std::num::NonZeroUsize;

use log::{debug, info, trace};
use rand::rngs::StdRng;

use super::{accuracy, generate_rng, init_params, EpochStats, TrainerConfig};
use crate::{
    arch::Model,
    dataset::Dataset,
    optimization::{GradientDescent, Optimizer},
    Result, TrainErr,
};

/// Trains a model with mini-batch gradient descent.
///
/// The trainer owns the parameters for the whole run: they are only handed to the
/// model by reference and mutated in place after every batch.
pub struct BatchTrainer<M, O = GradientDescent>
where
    M: Model,
    O: Optimizer,
{
    model: M,
    optimizer: O,
    params: Vec<f32>,
    grad: Vec<f32>,

    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
    rng: StdRng,
}

impl<M: Model> BatchTrainer<M, GradientDescent> {
    /// Returns a new `BatchTrainer` using gradient descent with the configured learning rate.
    ///
    /// # Arguments
    /// * `config` - The run's hyperparameters.
    /// * `model` - The model to train.
    /// * `params` - The starting parameters, `model.size()` of them.
    ///
    /// # Returns
    /// `TrainErr::InvalidConfiguration` if a hyperparameter is unusable or
    /// `TrainErr::DimensionMismatch` if `params` does not fit the model.
    pub fn new(config: TrainerConfig, model: M, params: Vec<f32>) -> Result<Self> {
        let optimizer = GradientDescent::new(config.learning_rate)?;
        Self::with_optimizer(config, model, optimizer, params)
    }
}

impl<M, O> BatchTrainer<M, O>
where
    M: Model,
    O: Optimizer,
{
    /// Returns a new `BatchTrainer` with a custom update rule.
    ///
    /// `config.learning_rate` is ignored, the optimizer carries its own.
    pub fn with_optimizer(
        config: TrainerConfig,
        model: M,
        optimizer: O,
        params: Vec<f32>,
    ) -> Result<Self> {
        let (epochs, batch_size) = config.validate()?;

        if params.len() != model.size() {
            return Err(TrainErr::DimensionMismatch {
                what: "parameters",
                got: params.len(),
                expected: model.size(),
            });
        }

        Ok(Self {
            grad: vec![0.0; params.len()],
            model,
            optimizer,
            params,
            epochs,
            batch_size,
            rng: generate_rng(config.seed),
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// The current parameters.
    pub fn params(&self) -> &[f32] {
        &self.params
    }

    /// Consumes the trainer, returning the trained parameters.
    pub fn into_params(self) -> Vec<f32> {
        self.params
    }

    /// Runs every configured epoch over `train`, evaluating on `eval` after each one.
    ///
    /// `train` is reshuffled in place at the start of every epoch.
    ///
    /// # Returns
    /// The statistics of every epoch, or the first error found. Empty datasets and
    /// datasets whose width the model cannot take are rejected before any batch is
    /// processed.
    pub fn fit(&mut self, train: &mut Dataset, eval: &Dataset) -> Result<Vec<EpochStats>> {
        if train.is_empty() {
            return Err(TrainErr::invalid_config("the training set is empty"));
        }
        if eval.is_empty() {
            return Err(TrainErr::invalid_config("the evaluation set is empty"));
        }
        self.check_width("batch features", train)?;
        self.check_width("evaluation features", eval)?;

        let epochs = self.epochs.get();
        let mut history = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let stats = self.epoch(epoch, train, eval)?;

            info!(
                epoch = epoch;
                "Loss - {:.4}  Accuracy - {:.4}",
                stats.loss(),
                stats.accuracy()
            );

            history.push(stats);
        }

        Ok(history)
    }

    /// Computes the accuracy of the current parameters on `eval`.
    pub fn evaluate(&self, eval: &Dataset) -> Result<f32> {
        if eval.is_empty() {
            return Err(TrainErr::invalid_config("the evaluation set is empty"));
        }

        let y_pred = self.model.predict(&self.params, eval.x())?;
        if y_pred.len() != eval.len() {
            return Err(TrainErr::DimensionMismatch {
                what: "predictions",
                got: y_pred.len(),
                expected: eval.len(),
            });
        }

        Ok(accuracy(y_pred.view(), eval.y()))
    }

    fn check_width(&self, what: &'static str, dataset: &Dataset) -> Result<()> {
        let expected = self.model.input_dim();
        if dataset.dim() != expected {
            return Err(TrainErr::DimensionMismatch {
                what,
                got: dataset.dim(),
                expected,
            });
        }

        Ok(())
    }

    // NOTE: the epoch loss is the plain mean of the batch losses, so a short last
    // batch weighs as much as a full one.
    fn epoch(&mut self, epoch: usize, train: &mut Dataset, eval: &Dataset) -> Result<EpochStats> {
        train.shuffle(&mut self.rng);

        let mut total_loss = 0.0;
        let mut batches = 0;
        let mut samples = 0;

        for (x, y) in train.batches(self.batch_size) {
            let loss = self
                .model
                .loss_and_grad(&self.params, x, y, &mut self.grad)?;
            self.optimizer.update_params(&mut self.params, &self.grad);

            trace!(epoch = epoch, batch = batches; "batch loss {loss}");

            total_loss += loss;
            batches += 1;
            samples += x.nrows();
        }

        let loss = total_loss / batches as f32;
        let accuracy = self.evaluate(eval)?;
        debug!(epoch = epoch, batches = batches, samples = samples; "epoch finished");

        Ok(EpochStats::new(epoch, loss, accuracy, batches, samples))
    }
}

/// Trains `model` from freshly initialized parameters.
///
/// Weights start uniformly in `[-1, 1)` and the bias at zero; see `init_params`.
///
/// # Returns
/// The trained parameters along with the per-epoch statistics.
pub fn train<M: Model>(
    train: &mut Dataset,
    eval: &Dataset,
    config: TrainerConfig,
    model: M,
) -> Result<(Vec<f32>, Vec<EpochStats>)> {
    config.validate()?;

    // initialization and shuffling draw from distinct streams
    let mut rng = generate_rng(config.seed.map(|seed| seed.wrapping_add(1)));
    let params = init_params(&model, &mut rng)?;

    let mut trainer = BatchTrainer::new(config, model, params)?;
    let history = trainer.fit(train, eval)?;

    Ok((trainer.into_params(), history))
}
