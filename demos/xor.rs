use pyrite_nn::{mean_squared_error, Activation, Dataset, Network, Topology};

fn main() {
    let topology = Topology::with_hidden(2, 3, 1).expect("valid topology");
    let mut network =
        Network::new(topology, Activation::Sigmoid, 0.5).expect("valid learning rate");

    let dataset = Dataset {
        inputs: vec![
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ],
        targets: vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]],
    };

    let iterations = 20000;

    for iteration in 0..iterations {
        for (input, target) in dataset.samples() {
            network.train(input, target).expect("samples match topology");
        }
        if iteration % 2000 == 0 {
            let mse = mean_squared_error(&network, &dataset).expect("samples match topology");
            println!("Iteration {iteration}: mse = {mse:.6}");
        }
    }

    for (input, _) in dataset.samples() {
        let output = network.guess(input).expect("samples match topology");
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
}
