//! Command-line front end: generate toy datasets, train and test a network
//! from a JSON run configuration, or run one of the built-in demos.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` (or `trace` for
//! per-batch losses) to see more.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgewise_nn::data::{read_table_from_path, split, write_table_to_path};
use edgewise_nn::train::LearnerCore;
use edgewise_nn::{Learner, Network, Problem, RunConfig, Table, Tester, Trainer, Validator};

#[derive(Parser)]
#[command(name = "edgewise-nn")]
#[command(about = "Feed-forward neural networks built edge by edge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a built-in problem and write it as CSV
    Generate {
        problem: Problem,

        /// Number of datapoints (defaults to the problem's usual size)
        #[arg(short = 'n', long)]
        datapoints: Option<usize>,

        #[arg(short, long)]
        out: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Split a CSV dataset, then train, validate and test on it
    Run {
        /// JSON run configuration
        #[arg(short, long)]
        config: PathBuf,

        /// CSV dataset: a header row, feature columns, then the label column
        #[arg(short, long)]
        data: PathBuf,

        #[arg(short, long, default_value = "output")]
        out_dir: PathBuf,

        /// Overrides the seed of the run configuration
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a built-in problem and learn it with its stock configuration
    Demo {
        problem: Problem,

        #[arg(long)]
        seed: Option<u64>,

        /// Overrides the stock number of epochs
        #[arg(long)]
        epochs: Option<usize>,

        #[arg(short, long, default_value = "output")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Generate { problem, datapoints, out, seed } => {
            let mut rng = make_rng(seed);
            let n = datapoints.unwrap_or_else(|| problem.default_datapoints());
            let table = problem.generate(n, &mut rng)?;
            write_table_to_path(&out, &table)
                .with_context(|| format!("writing {}", out.display()))?;
            info!("wrote {n} {problem} datapoints to {}", out.display());
        }
        Commands::Run { config, data, out_dir, seed } => {
            let run_config = RunConfig::load_json(&config.to_string_lossy())
                .with_context(|| format!("loading run configuration {}", config.display()))?;
            let table = read_table_from_path(&data)
                .with_context(|| format!("reading dataset {}", data.display()))?;
            let mut rng = make_rng(seed.or(run_config.seed));
            run_experiment(&run_config, table, &out_dir, &mut rng)?;
        }
        Commands::Demo { problem, seed, epochs, out_dir } => {
            let mut rng = make_rng(seed);
            let mut run_config = problem.run_config();
            if let Some(epochs) = epochs {
                run_config.train.epochs = epochs;
            }
            let table = problem.generate(problem.default_datapoints(), &mut rng)?;
            info!("demo {problem}: {} datapoints", table.num_rows());
            run_experiment(&run_config, table, &out_dir, &mut rng)?;
        }
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_experiment(config: &RunConfig, data: Table<String>, out_dir: &Path, rng: &mut StdRng) -> Result<()> {
    let mut parts = split(&data, &config.proportions)?.into_iter();
    let Some(training) = parts.next() else {
        bail!("no training data");
    };
    let validation = parts.next().filter(|part| non_empty(part, "validation"));
    let testing = parts.next().filter(|part| non_empty(part, "testing"));

    let mut network = Network::new(config.network.clone(), rng)?;
    let validator = validation
        .map(|part| {
            Validator::with_partitioning(
                &network,
                part,
                config.train.validation_batch_size,
                config.train.weighted_evaluation,
                config.train.num_bins,
            )
        })
        .transpose()?;
    let mut trainer = Trainer::from_config(&network, training, &config.train, validator)?;
    trainer.run(&mut network, rng)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    trainer.loss_history().save_json(&out_dir.join("loss_history.json").to_string_lossy())?;
    write_predictions(trainer.core(), &out_dir.join("training_predictions.csv"))?;

    if let Some(part) = testing {
        let mut tester = Tester::with_partitioning(
            &network,
            part,
            config.train.testing_batch_size,
            config.train.weighted_evaluation,
            config.train.num_bins,
        )?;
        let loss = tester.run(&mut network, rng)?;
        write_predictions(tester.core(), &out_dir.join("testing_predictions.csv"))?;

        println!("testing loss: {loss:.4}");
        if !network.is_regressor() {
            let confusion = tester.confusion()?;
            println!("{confusion}");
            for (name, score) in confusion.dice_scores() {
                println!("dice {name}: {score:.4}");
            }
            println!("mean dice: {:.4}", confusion.mean_dice());
        }
    }
    info!("results written to {}", out_dir.display());
    Ok(())
}

fn non_empty(part: &Table<String>, phase: &str) -> bool {
    if part.num_rows() == 0 {
        warn!("{phase} split is empty, skipping {phase}");
        return false;
    }
    true
}

/// True against predicted names for classification, values for regression.
fn write_predictions(core: &LearnerCore, path: &Path) -> Result<()> {
    match core.categorical_frame() {
        Some(frame) => write_table_to_path(path, frame)?,
        None => write_table_to_path(path, core.frame())?,
    }
    Ok(())
}
