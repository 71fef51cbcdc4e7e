//! Classifies a single digit image read from standard input.
//!
//! Reads one line of comma-separated grayscale values (one per pixel of the
//! flattened image), runs it through the trained network and prints the
//! predicted class: `1` if the output crosses 0.5, `0` otherwise.
//!
//! Run with:
//!   echo "0,12,255,..." | cargo run --bin classify-digit -- [model-path]

use std::env;
use std::io::{self, BufRead};
use std::process;

use pyrite_nn::{Activation, Network};

const LEARNING_RATE: f64 = 0.01;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [model-path]", args[0]);
        process::exit(2);
    }
    let model_path = args.get(1).map(String::as_str).unwrap_or("model_weights.txt");

    let network = Network::load_from(model_path, Activation::Sigmoid, LEARNING_RATE)
        .unwrap_or_else(|e| {
            eprintln!("Error loading model weights: {e}");
            process::exit(1);
        });
    let expected = network.topology().input_size();

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).unwrap_or_else(|e| {
        eprintln!("Error reading input: {e}");
        process::exit(1);
    });

    let values: Vec<&str> = line.trim().split(',').collect();
    if values.len() != expected {
        eprintln!(
            "Error: expected {} comma-separated values, got {}",
            expected,
            values.len()
        );
        process::exit(1);
    }

    let mut pixels = Vec::with_capacity(expected);
    for value in values {
        match value.trim().parse::<f64>() {
            Ok(v) => pixels.push(v / 255.0),
            Err(_) => {
                eprintln!("Error: invalid value in input: {value}");
                process::exit(1);
            }
        }
    }

    let output = network.guess(&pixels).unwrap_or_else(|e| {
        eprintln!("Error running the network: {e}");
        process::exit(1);
    });

    let prediction = if output[0] >= 0.5 { 1 } else { 0 };
    println!("{prediction}");
}
