use rand::Rng;

use crate::error::Error;
use crate::network::network::Network;

impl Network {
    /// Blends two equally-shaped networks element by element:
    /// `ratio * self + (1 - ratio) * other` for every weight and bias.
    ///
    /// The result keeps `self`'s activation and learning rate and owns
    /// freshly allocated parameters. `ratio` is not validated; values
    /// outside [0, 1] extrapolate linearly.
    pub fn merge(&self, other: &Network, ratio: f64) -> Result<Network, Error> {
        if self.topology != other.topology {
            return Err(Error::TopologyMismatch {
                expected: self.topology.layers().to_vec(),
                actual: other.topology.layers().to_vec(),
            });
        }

        let weights = self
            .weights
            .iter()
            .zip(other.weights.iter())
            .map(|(a, b)| a.zip_map(b, |x, y| ratio * x + (1.0 - ratio) * y))
            .collect();

        let biases = self
            .biases
            .iter()
            .zip(other.biases.iter())
            .map(|(a, b)| {
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| ratio * x + (1.0 - ratio) * y)
                    .collect()
            })
            .collect();

        Ok(Network {
            topology: self.topology.clone(),
            weights,
            biases,
            activation: self.activation,
            learning_rate: self.learning_rate,
        })
    }

    /// Re-rolls each weight and bias independently with probability `rate`.
    ///
    /// Replacement values are drawn uniformly from [-1, 1], the same range
    /// used at construction. `rate <= 0` changes nothing and `rate >= 1`
    /// replaces every parameter.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        for matrix in &mut self.weights {
            for row in &mut matrix.data {
                for value in row {
                    if rng.gen::<f64>() < rate {
                        *value = rng.gen::<f64>() * 2.0 - 1.0;
                    }
                }
            }
        }
        for bias in &mut self.biases {
            for value in bias {
                if rng.gen::<f64>() < rate {
                    *value = rng.gen::<f64>() * 2.0 - 1.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use rand::rngs::StdRng;

    use crate::activation::activation::Activation;
    use crate::error::Error;
    use crate::network::network::Network;
    use crate::network::topology::Topology;

    fn seeded(layers: &[usize], seed: u64) -> Network {
        let topology = Topology::new(layers.to_vec()).unwrap();
        Network::with_rng(topology, Activation::Sigmoid, 0.1, &mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn merge_with_ratio_one_equals_self() {
        let a = seeded(&[4, 5, 1], 1);
        let b = seeded(&[4, 5, 1], 2);

        let merged = a.merge(&b, 1.0).unwrap();
        assert_eq!(merged.weights(), a.weights());
        assert_eq!(merged.biases(), a.biases());
    }

    #[test]
    fn merge_with_ratio_zero_equals_other() {
        let a = seeded(&[4, 5, 1], 3);
        let b = seeded(&[4, 5, 1], 4);

        let merged = a.merge(&b, 0.0).unwrap();
        assert_eq!(merged.weights(), b.weights());
        assert_eq!(merged.biases(), b.biases());
    }

    #[test]
    fn merge_averages_elements_at_half_ratio() {
        let a = seeded(&[3, 4, 2], 5);
        let b = seeded(&[3, 4, 2], 6);

        let merged = a.merge(&b, 0.5).unwrap();
        let expected = 0.5 * a.weights()[0].data[1][2] + 0.5 * b.weights()[0].data[1][2];
        assert!((merged.weights()[0].data[1][2] - expected).abs() < 1e-12);

        let expected_bias = 0.5 * a.biases()[1][0] + 0.5 * b.biases()[1][0];
        assert!((merged.biases()[1][0] - expected_bias).abs() < 1e-12);
    }

    #[test]
    fn merge_keeps_topology_and_configuration_of_self() {
        let mut a = seeded(&[4, 5, 1], 7);
        a.set_activation(Activation::Tanh);
        a.set_learning_rate(0.3).unwrap();
        let b = seeded(&[4, 5, 1], 8);

        let merged = a.merge(&b, 0.25).unwrap();
        assert_eq!(merged.topology(), a.topology());
        assert_eq!(merged.activation(), Activation::Tanh);
        assert_eq!(merged.learning_rate(), 0.3);
    }

    #[test]
    fn merge_rejects_different_topologies() {
        let a = seeded(&[4, 5, 1], 9);
        let b = seeded(&[4, 6, 1], 10);

        match a.merge(&b, 0.5) {
            Err(Error::TopologyMismatch { expected, actual }) => {
                assert_eq!(expected, vec![4, 5, 1]);
                assert_eq!(actual, vec![4, 6, 1]);
            }
            other => panic!("expected TopologyMismatch, got {other:?}"),
        }
    }

    #[test]
    fn mutate_with_zero_rate_is_a_no_op() {
        let mut network = seeded(&[4, 5, 1], 11);
        let before = network.clone();

        network.mutate(0.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(network.weights(), before.weights());
        assert_eq!(network.biases(), before.biases());
    }

    #[test]
    fn mutate_with_full_rate_rerolls_every_parameter_in_range() {
        let mut network = seeded(&[4, 5, 1], 12);
        let before = network.clone();

        network.mutate(1.0, &mut StdRng::seed_from_u64(100));

        let changed = network
            .weights()
            .iter()
            .zip(before.weights().iter())
            .any(|(a, b)| a != b);
        assert!(changed, "a full-rate mutation should move the weights");

        let in_range = network
            .weights()
            .iter()
            .flat_map(|m| m.data.iter().flatten())
            .chain(network.biases().iter().flatten())
            .all(|&v| (-1.0..=1.0).contains(&v));
        assert!(in_range);
    }

    #[test]
    fn mutation_of_a_clone_leaves_the_original_untouched() {
        let original = seeded(&[4, 5, 1], 13);
        let mut copy = original.clone();

        assert_eq!(copy.weights(), original.weights());
        assert_eq!(copy.biases(), original.biases());
        assert_eq!(copy.activation(), original.activation());
        assert_eq!(copy.topology(), original.topology());

        copy.mutate(1.0, &mut StdRng::seed_from_u64(101));
        let diverged = copy
            .weights()
            .iter()
            .zip(original.weights().iter())
            .any(|(a, b)| a != b);
        assert!(diverged, "the clone should have moved away from the original");
    }
}
