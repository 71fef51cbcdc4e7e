use serde::{Deserialize, Serialize};

/// Hyperparameters for `train_with_early_stopping`.
///
/// # Fields
/// - `max_iterations` - upper bound on full passes over the training set
/// - `mse_threshold`  - stop once the validation MSE reaches this value or less
/// - `patience`       - consecutive non-improving iterations tolerated before stopping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub max_iterations: usize,
    pub mse_threshold: f64,
    pub patience: usize,
}

impl TrainConfig {
    pub fn new(max_iterations: usize, mse_threshold: f64, patience: usize) -> Self {
        TrainConfig {
            max_iterations,
            mse_threshold,
            patience,
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `TrainConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for TrainConfig {
    /// The digit-classifier run: up to 2000 passes, stop at a validation
    /// MSE of 0.001, give up after 10 stale iterations.
    fn default() -> Self {
        TrainConfig::new(2000, 0.001, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("pyrite_config_{}_{}.json", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn default_matches_the_reference_run() {
        let config = TrainConfig::default();
        assert_eq!(config.max_iterations, 2000);
        assert_eq!(config.mse_threshold, 0.001);
        assert_eq!(config.patience, 10);
    }

    #[test]
    fn json_round_trip_preserves_every_field() {
        let config = TrainConfig::new(500, 0.05, 3);
        let path = temp_path("round_trip");

        config.save_json(&path).unwrap();
        let loaded = TrainConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_json_rejects_malformed_files() {
        let path = temp_path("garbage");
        std::fs::write(&path, "max_iterations: lots").unwrap();
        let result = TrainConfig::load_json(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
