//! Trains the reference digit discriminator from CSV data.
//!
//! Expects one image per line in the data file (comma-separated grayscale
//! values, 20x20 pixels flattened to 400 columns) and one `0`/`1` label per
//! line in the labels file. Writes the trained weights and the per-iteration
//! MSE curve next to the working directory.
//!
//! Run with:
//!   cargo run --bin train-digits -- data.csv labels.csv [model-out] [config.json]

use std::env;
use std::process;

use pyrite_nn::{
    evaluate, load_dataset, train_with_early_stopping, Activation, Network, StopReason, Topology,
    TrainConfig,
};

const INPUT_WIDTH: usize = 400;
const HIDDEN_WIDTH: usize = 10;
const OUTPUT_WIDTH: usize = 1;
const LEARNING_RATE: f64 = 0.01;
const TRAIN_SPLIT: f64 = 0.6;
const HISTORY_PATH: &str = "mse_history.csv";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        eprintln!(
            "Usage: {} <data.csv> <labels.csv> [model-out] [config.json]",
            args[0]
        );
        process::exit(2);
    }
    let data_path = &args[1];
    let labels_path = &args[2];
    let model_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("model_weights.txt");

    let config = match args.get(4) {
        Some(path) => TrainConfig::load_json(path).unwrap_or_else(|e| {
            eprintln!("Error loading training config '{path}': {e}");
            process::exit(1);
        }),
        None => TrainConfig::default(),
    };

    // --- Load and split the dataset ---
    let dataset = load_dataset(data_path, labels_path, INPUT_WIDTH).unwrap_or_else(|e| {
        eprintln!("Error loading dataset: {e}");
        process::exit(1);
    });
    println!("Loaded {} samples.", dataset.len());

    let (train_set, validation_set) = dataset.split(TRAIN_SPLIT);
    println!(
        "Split into {} training and {} validation samples.",
        train_set.len(),
        validation_set.len()
    );

    // --- Build and train the network ---
    let topology = Topology::with_hidden(INPUT_WIDTH, HIDDEN_WIDTH, OUTPUT_WIDTH)
        .expect("reference topology is valid");
    let mut network = Network::new(topology, Activation::Sigmoid, LEARNING_RATE)
        .expect("reference learning rate is valid");

    println!(
        "Training a {:?} network (sigmoid, lr = {}) for up to {} iterations...",
        network.topology().layers(),
        LEARNING_RATE,
        config.max_iterations
    );

    let report = train_with_early_stopping(&mut network, &train_set, &validation_set, &config)
        .unwrap_or_else(|e| {
            eprintln!("Error during training: {e}");
            process::exit(1);
        });

    match report.stop_reason {
        StopReason::ThresholdReached => println!(
            "Stopped after {} iterations: validation MSE reached {}.",
            report.history.len(),
            config.mse_threshold
        ),
        StopReason::PatienceExhausted => println!(
            "Stopped after {} iterations: no validation improvement for {} iterations.",
            report.history.len(),
            config.patience
        ),
        StopReason::MaxIterationsReached => println!(
            "Stopped after the full {} iterations.",
            report.history.len()
        ),
    }
    if let Some(last) = report.history.last() {
        println!(
            "Final MSE: {:.6} (train), {:.6} (validation).",
            last.train_mse, last.validation_mse
        );
    }

    // --- Report, export, save ---
    let evaluation = evaluate(&network, &validation_set).unwrap_or_else(|e| {
        eprintln!("Error evaluating the model: {e}");
        process::exit(1);
    });
    println!(
        "Validation accuracy: {:.2}% ({}/{} correct).",
        evaluation.accuracy() * 100.0,
        evaluation.correct,
        evaluation.total
    );

    report.history.export_csv(HISTORY_PATH).unwrap_or_else(|e| {
        eprintln!("Error writing '{HISTORY_PATH}': {e}");
        process::exit(1);
    });
    println!("MSE history written to {HISTORY_PATH}.");

    network.save_weights(model_path).unwrap_or_else(|e| {
        eprintln!("Error saving model weights: {e}");
        process::exit(1);
    });
    println!("Model weights written to {model_path}.");
}
