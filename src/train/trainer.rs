use log::info;

use crate::data::dataset::Dataset;
use crate::error::Error;
use crate::network::network::Network;
use crate::train::history::{IterationStats, TrainingHistory};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Why `train_with_early_stopping` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The validation MSE reached the configured threshold.
    ThresholdReached,
    /// The validation MSE failed to improve for `patience` consecutive
    /// iterations.
    PatienceExhausted,
    /// The iteration budget ran out.
    MaxIterationsReached,
}

/// Result of a training run: the per-iteration error curve and why the
/// run stopped.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub history: TrainingHistory,
    pub stop_reason: StopReason,
}

/// Trains `network` sample by sample, stopping early on the validation MSE.
///
/// One iteration is a full pass over `train_set` in row order with one
/// online update per sample. After each iteration both set MSEs are
/// recorded. The run stops when the validation MSE drops to
/// `config.mse_threshold` or below, when it has not improved for
/// `config.patience` consecutive iterations, or when `config.max_iterations`
/// passes have completed.
///
/// # Arguments
/// - `network`        - modified in place
/// - `train_set`      - samples used for the parameter updates
/// - `validation_set` - held-out samples driving the stop decisions
/// - `config`         - iteration budget, threshold and patience
pub fn train_with_early_stopping(
    network: &mut Network,
    train_set: &Dataset,
    validation_set: &Dataset,
    config: &TrainConfig,
) -> Result<TrainingReport, Error> {
    let mut history = TrainingHistory::new();
    let mut best_validation_mse = f64::MAX;
    let mut patience_counter = 0usize;
    let mut stop_reason = StopReason::MaxIterationsReached;

    for iteration in 1..=config.max_iterations {
        for (input, target) in train_set.samples() {
            network.train(input, target)?;
        }

        let train_mse = mean_squared_error(network, train_set)?;
        let validation_mse = mean_squared_error(network, validation_set)?;
        history.push(IterationStats {
            iteration,
            train_mse,
            validation_mse,
        });

        info!(
            "iteration {}/{}: train mse {:.6}, validation mse {:.6}",
            iteration, config.max_iterations, train_mse, validation_mse
        );

        if validation_mse < best_validation_mse {
            best_validation_mse = validation_mse;
            patience_counter = 0;
        } else {
            patience_counter += 1;
        }

        if validation_mse <= config.mse_threshold {
            info!(
                "early stop: validation mse reached threshold {}",
                config.mse_threshold
            );
            stop_reason = StopReason::ThresholdReached;
            break;
        }
        if patience_counter >= config.patience {
            info!(
                "early stop: no validation improvement for {} iterations",
                config.patience
            );
            stop_reason = StopReason::PatienceExhausted;
            break;
        }
    }

    Ok(TrainingReport {
        history,
        stop_reason,
    })
}

/// Mean squared error of `network` over `data`, averaged over samples and
/// output components. An empty dataset yields 0.0.
pub fn mean_squared_error(network: &Network, data: &Dataset) -> Result<f64, Error> {
    if data.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for (input, target) in data.samples() {
        let output = network.guess(input)?;
        let sample: f64 = output
            .iter()
            .zip(target.iter())
            .map(|(o, t)| (o - t) * (o - t))
            .sum::<f64>()
            / output.len() as f64;
        total += sample;
    }

    Ok(total / data.len() as f64)
}

/// Correct-prediction count from thresholding the first output at 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
}

impl EvaluationReport {
    /// Fraction of correct predictions in [0, 1]; 0.0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Classifies every sample by thresholding the first output component at
/// 0.5 and counts matches against the first target component. Intended for
/// binary single-output datasets like the digit task.
pub fn evaluate(network: &Network, data: &Dataset) -> Result<EvaluationReport, Error> {
    let mut correct = 0usize;
    for (input, target) in data.samples() {
        let output = network.guess(input)?;
        let predicted = if output[0] >= 0.5 { 1.0 } else { 0.0 };
        if predicted == target[0] {
            correct += 1;
        }
    }

    Ok(EvaluationReport {
        total: data.len(),
        correct,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
