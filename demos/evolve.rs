//! Evolves a population of networks to solve XOR with no backpropagation:
//! selection by MSE, elite survival, then mutated blends of elite pairs.
//!
//! Run with:
//!   cargo run --example evolve

use rand::prelude::*;
use rand::rngs::StdRng;

use pyrite_nn::{mean_squared_error, Activation, Dataset, Network, Topology};

const POPULATION: usize = 30;
const GENERATIONS: usize = 300;
const ELITES: usize = 6;
const MUTATION_RATE: f64 = 0.08;

fn score(population: Vec<Network>, dataset: &Dataset) -> Vec<(f64, Network)> {
    let mut scored: Vec<(f64, Network)> = population
        .into_iter()
        .map(|network| {
            let mse = mean_squared_error(&network, dataset).expect("samples match topology");
            (mse, network)
        })
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("mse is never NaN"));
    scored
}

fn main() {
    let mut rng = StdRng::seed_from_u64(7);

    let dataset = Dataset {
        inputs: vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        targets: vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    };

    let topology = Topology::with_hidden(2, 4, 1).expect("valid topology");
    let mut population: Vec<Network> = (0..POPULATION)
        .map(|_| {
            Network::with_rng(topology.clone(), Activation::Tanh, 0.1, &mut rng)
                .expect("valid learning rate")
        })
        .collect();

    for generation in 0..GENERATIONS {
        let scored = score(population, &dataset);
        if generation % 30 == 0 {
            println!("Generation {generation}: best mse = {:.6}", scored[0].0);
        }

        // Elites survive unchanged; the rest of the next generation are
        // mutated even blends of two elites.
        let elites: Vec<Network> = scored
            .into_iter()
            .take(ELITES)
            .map(|(_, network)| network)
            .collect();
        population = elites.clone();
        while population.len() < POPULATION {
            let a = &elites[rng.gen_range(0..ELITES)];
            let b = &elites[rng.gen_range(0..ELITES)];
            let mut child = a.merge(b, 0.5).expect("elites share the topology");
            child.mutate(MUTATION_RATE, &mut rng);
            population.push(child);
        }
    }

    let scored = score(population, &dataset);
    let (best_mse, best) = &scored[0];
    println!("\nBest network after {GENERATIONS} generations: mse = {best_mse:.6}");
    for (input, target) in dataset.samples() {
        let output = best.guess(input).expect("samples match topology");
        println!(
            "Input: {:?} -> Output: {:.4} (target {})",
            input, output[0], target[0]
        );
    }
}
