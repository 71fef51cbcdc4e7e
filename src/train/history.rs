use std::fs::File;
use std::io::{BufWriter, Write};

/// One record per completed training iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Mean squared error over the training set after this iteration.
    pub train_mse: f64,
    /// Mean squared error over the validation set after this iteration.
    pub validation_mse: f64,
}

/// Per-iteration error curve collected by the training driver and handed
/// back to the caller; nothing is accumulated globally.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    records: Vec<IterationStats>,
}

impl TrainingHistory {
    pub fn new() -> TrainingHistory {
        TrainingHistory::default()
    }

    pub(crate) fn push(&mut self, stats: IterationStats) {
        self.records.push(stats);
    }

    pub fn records(&self) -> &[IterationStats] {
        &self.records
    }

    pub fn last(&self) -> Option<&IterationStats> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the curve as CSV, one row per iteration under an
    /// `iteration,train_mse,validation_mse` header.
    pub fn export_csv(&self, path: &str) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "iteration,train_mse,validation_mse")?;
        for stats in &self.records {
            writeln!(
                writer,
                "{},{},{}",
                stats.iteration, stats.train_mse, stats.validation_mse
            )?;
        }

        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("pyrite_history_{}_{}.csv", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    fn sample_history() -> TrainingHistory {
        let mut history = TrainingHistory::new();
        history.push(IterationStats {
            iteration: 1,
            train_mse: 0.25,
            validation_mse: 0.5,
        });
        history.push(IterationStats {
            iteration: 2,
            train_mse: 0.125,
            validation_mse: 0.4,
        });
        history
    }

    #[test]
    fn records_are_kept_in_insertion_order() {
        let history = sample_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].iteration, 1);
        assert_eq!(history.last().unwrap().iteration, 2);
    }

    #[test]
    fn export_writes_a_header_and_one_row_per_iteration() {
        let history = sample_history();
        let path = temp_path("export");

        history.export_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "iteration,train_mse,validation_mse");
        assert_eq!(lines[1], "1,0.25,0.5");
        assert_eq!(lines[2], "2,0.125,0.4");
    }

    #[test]
    fn an_empty_history_exports_only_the_header() {
        let history = TrainingHistory::new();
        let path = temp_path("empty");

        history.export_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text.trim_end(), "iteration,train_mse,validation_mse");
    }
}
