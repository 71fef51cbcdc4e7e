use std::f64::consts::E;

use crate::error::Error;

/// Element-wise nonlinearity applied to every non-input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Tanh,
    ReLU,
    Identity,
}

impl Activation {
    /// Resolves a case-insensitive name to an activation.
    ///
    /// Accepted names are `sigmoid`, `tanh`, `relu` and `identity`.
    pub fn from_name(name: &str) -> Result<Activation, Error> {
        match name.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::ReLU),
            "identity" => Ok(Activation::Identity),
            _ => Err(Error::UnknownActivation {
                name: name.to_string(),
            }),
        }
    }

    /// Canonical lowercase name, accepted back by `from_name`.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
            Activation::Identity => "identity",
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Identity => x,
        }
    }

    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Identity => 1.0,
        }
    }
}
