mod batch_trainer;
mod config;
mod init;
mod stats;

pub use batch_trainer::{train, BatchTrainer};
pub use config::TrainerConfig;
pub use init::{generate_rng, init_params};
pub use stats::{accuracy, EpochStats};
