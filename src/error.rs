use std::fmt;
use std::io;

/// All errors surfaced by the engine.
#[derive(Debug)]
pub enum Error {
    /// Fewer than two layers, or a layer of width zero.
    InvalidTopology { layers: Vec<usize> },
    /// Activation name that does not resolve to a known variant.
    UnknownActivation { name: String },
    /// Input length does not match the input layer width.
    InputSizeMismatch { expected: usize, actual: usize },
    /// Target length does not match the output layer width.
    TargetSizeMismatch { expected: usize, actual: usize },
    /// Operation across two networks of different shapes.
    TopologyMismatch { expected: Vec<usize>, actual: Vec<usize> },
    /// Learning rate that is zero, negative, or not finite.
    InvalidLearningRate { value: f64 },
    /// File I/O failure while saving or loading weights.
    Io { path: String, source: io::Error },
    /// Weights file that does not parse or is internally inconsistent.
    MalformedWeights {
        path: String,
        line: usize,
        detail: String,
    },
}

impl Error {
    pub(crate) fn io(path: &str, source: io::Error) -> Error {
        Error::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTopology { layers } => {
                write!(
                    f,
                    "invalid topology {layers:?}: need at least two layers, every width >= 1"
                )
            }
            Self::UnknownActivation { name } => write!(f, "unknown activation '{name}'"),
            Self::InputSizeMismatch { expected, actual } => {
                write!(f, "input size mismatch: expected {expected}, got {actual}")
            }
            Self::TargetSizeMismatch { expected, actual } => {
                write!(f, "target size mismatch: expected {expected}, got {actual}")
            }
            Self::TopologyMismatch { expected, actual } => {
                write!(f, "topology mismatch: expected {expected:?}, got {actual:?}")
            }
            Self::InvalidLearningRate { value } => {
                write!(f, "invalid learning rate {value}: must be finite and > 0")
            }
            Self::Io { path, source } => write!(f, "io error on '{path}': {source}"),
            Self::MalformedWeights { path, line, detail } => {
                write!(f, "malformed weights file '{path}' at line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
