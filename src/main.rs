use std::env;

use anyhow::Context;
use log::info;

use batch_trainer::config::RunConfig;

const LABELS: [&str; 2] = ["negative", "positive"];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => RunConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => RunConfig::default(),
    };
    info!("running with {config:?}");

    let (mut train, eval) = config.datasets().context("building the datasets")?;
    info!(
        "dataset is ready: {} training and {} evaluation samples of dimension {}",
        train.len(),
        eval.len(),
        train.dim()
    );

    let (params, history) = config
        .train(&mut train, &eval)
        .context("training the model")?;

    if let Some(last) = history.last() {
        info!(
            "finished after {} epochs: Loss - {:.4}  Accuracy - {:.4}",
            history.len(),
            last.loss(),
            last.accuracy()
        );
    }

    let n = config.preview.min(eval.len());
    if n > 0 {
        let preds = config.predict(&params, eval.x().slice(ndarray::s![..n, ..]))?;

        for (truth, pred) in eval.y().iter().zip(&preds) {
            println!(
                "Ground Truth: {}, Prediction {}",
                LABELS[*truth as usize], LABELS[*pred as usize]
            );
        }
    }

    let (w, b) = params.split_at(eval.dim());
    println!("weights: {w:?}");
    println!("bias: {b:?}");

    Ok(())
}
