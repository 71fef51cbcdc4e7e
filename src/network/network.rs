use rand::prelude::*;

use crate::activation::activation::Activation;
use crate::error::Error;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// A feed-forward network that exclusively owns its parameters.
///
/// Weight matrix `t` has shape `layers[t+1] x layers[t]` and bias vector `t`
/// has length `layers[t+1]`, so layer `t+1`'s activations are
/// `activation(weights[t] * a_t + biases[t])`. One activation and one
/// learning rate apply to the whole network.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) topology: Topology,
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Vec<f64>>,
    pub(crate) activation: Activation,
    pub(crate) learning_rate: f64,
}

impl Network {
    /// Builds a network with parameters drawn uniformly from [-1, 1].
    pub fn new(
        topology: Topology,
        activation: Activation,
        learning_rate: f64,
    ) -> Result<Network, Error> {
        Network::with_rng(topology, activation, learning_rate, &mut rand::thread_rng())
    }

    /// Same as `new`, drawing the initial parameters from `rng` so that
    /// construction is reproducible.
    pub fn with_rng<R: Rng>(
        topology: Topology,
        activation: Activation,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network, Error> {
        check_learning_rate(learning_rate)?;

        let mut weights = Vec::with_capacity(topology.transitions());
        let mut biases = Vec::with_capacity(topology.transitions());
        for t in 0..topology.transitions() {
            let fan_in = topology.layers()[t];
            let fan_out = topology.layers()[t + 1];
            weights.push(Matrix::random(fan_out, fan_in, rng));
            biases.push((0..fan_out).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect());
        }

        Ok(Network {
            topology,
            weights,
            biases,
            activation,
            learning_rate,
        })
    }

    /// Assembles a network from already-validated parameters. The codec is
    /// the only caller; shapes are its responsibility.
    pub(crate) fn from_parts(
        topology: Topology,
        weights: Vec<Matrix>,
        biases: Vec<Vec<f64>>,
        activation: Activation,
        learning_rate: f64,
    ) -> Result<Network, Error> {
        check_learning_rate(learning_rate)?;
        debug_assert_eq!(weights.len(), topology.transitions());
        debug_assert_eq!(biases.len(), topology.transitions());

        Ok(Network {
            topology,
            weights,
            biases,
            activation,
            learning_rate,
        })
    }

    // -----------------------------------------------------------------------
    // Inference and training
    // -----------------------------------------------------------------------

    /// Runs a forward pass and returns the output layer's activations.
    ///
    /// # Arguments
    /// - `input` - one sample; its length must equal the input layer width
    pub fn guess(&self, input: &[f64]) -> Result<Vec<f64>, Error> {
        if input.len() != self.topology.input_size() {
            return Err(Error::InputSizeMismatch {
                expected: self.topology.input_size(),
                actual: input.len(),
            });
        }

        let mut current = input.to_vec();
        for t in 0..self.topology.transitions() {
            current = self
                .affine(t, &current)
                .into_iter()
                .map(|z| self.activation.function(z))
                .collect();
        }

        Ok(current)
    }

    /// Performs one online gradient-descent step from a single sample.
    ///
    /// # Arguments
    /// - `input`  - one sample, length must equal the input layer width
    /// - `target` - desired output, length must equal the output layer width
    ///
    /// Both lengths are checked before any parameter is touched; on a
    /// mismatch the network is left exactly as it was.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<(), Error> {
        if input.len() != self.topology.input_size() {
            return Err(Error::InputSizeMismatch {
                expected: self.topology.input_size(),
                actual: input.len(),
            });
        }
        if target.len() != self.topology.output_size() {
            return Err(Error::TargetSizeMismatch {
                expected: self.topology.output_size(),
                actual: target.len(),
            });
        }

        let transitions = self.topology.transitions();

        // Forward pass, keeping every pre-activation and activation for the
        // backward sweep.
        let mut activations: Vec<Vec<f64>> = Vec::with_capacity(transitions + 1);
        let mut pre_activations: Vec<Vec<f64>> = Vec::with_capacity(transitions);
        activations.push(input.to_vec());
        for t in 0..transitions {
            let z = self.affine(t, &activations[t]);
            let a = z.iter().map(|&zi| self.activation.function(zi)).collect();
            pre_activations.push(z);
            activations.push(a);
        }

        // Output error, then one chain-rule step per transition, walking
        // backwards.
        let mut error: Vec<f64> = target
            .iter()
            .zip(activations[transitions].iter())
            .map(|(t, o)| t - o)
            .collect();

        for t in (0..transitions).rev() {
            let delta: Vec<f64> = error
                .iter()
                .zip(pre_activations[t].iter())
                .map(|(e, &z)| e * self.activation.derivative(z))
                .collect();

            // The previous layer's error must see this transition's weights
            // as they were before the update below.
            if t > 0 {
                error = self.weights[t].transposed_mul_vec(&delta);
            }

            self.weights[t].add_scaled_outer(&delta, &activations[t], self.learning_rate);
            for (b, d) in self.biases[t].iter_mut().zip(delta.iter()) {
                *b += self.learning_rate * d;
            }
        }

        Ok(())
    }

    /// Pre-activation of layer `t + 1`: `weights[t] * input + biases[t]`.
    fn affine(&self, t: usize, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights[t].mul_vec(input);
        for (zi, b) in z.iter_mut().zip(self.biases[t].iter()) {
            *zi += b;
        }
        z
    }

    // -----------------------------------------------------------------------
    // Accessors and configuration
    // -----------------------------------------------------------------------

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    /// Selects the activation by its case-insensitive name. An unknown name
    /// fails and leaves the current selection unchanged.
    pub fn set_activation_name(&mut self, name: &str) -> Result<(), Error> {
        self.activation = Activation::from_name(name)?;
        Ok(())
    }

    /// Replaces the learning rate; rejects values that are not finite and
    /// positive, leaving the current rate in place.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), Error> {
        check_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }
}

fn check_learning_rate(value: f64) -> Result<(), Error> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidLearningRate { value });
    }
    Ok(())
}
