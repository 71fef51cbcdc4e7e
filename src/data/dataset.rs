use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use log::info;

/// Error produced while reading or validating a dataset, with the offending
/// file and line in the message.
#[derive(Debug)]
pub struct DatasetError(pub String);

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DatasetError {}

/// Samples ready for training: one input row per target row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Iterates over (input, target) pairs.
    pub fn samples(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .map(|row| row.as_slice())
            .zip(self.targets.iter().map(|row| row.as_slice()))
    }

    /// Splits by index, the first `ratio` share of rows becoming the left
    /// part. Row order is preserved; nothing is shuffled.
    pub fn split(mut self, ratio: f64) -> (Dataset, Dataset) {
        let boundary = ((self.len() as f64 * ratio) as usize).min(self.len());
        let right_inputs = self.inputs.split_off(boundary);
        let right_targets = self.targets.split_off(boundary);
        (
            self,
            Dataset {
                inputs: right_inputs,
                targets: right_targets,
            },
        )
    }
}

/// Loads a feature CSV and a label file as one dataset.
///
/// Each `data_path` line must hold exactly `input_width` comma-separated
/// numeric values and the matching `labels_path` line a single `0` or `1`.
/// Feature values are clamped below at zero and scaled by 1/255; each label
/// becomes a one-element target vector.
///
/// # Arguments
/// - `data_path`   - CSV of feature rows
/// - `labels_path` - one label per feature row
/// - `input_width` - required number of values per feature row
pub fn load_dataset(
    data_path: &str,
    labels_path: &str,
    input_width: usize,
) -> Result<Dataset, DatasetError> {
    let data_reader = open(data_path)?;
    let label_reader = open(labels_path)?;

    let mut data_lines = data_reader.lines();
    let mut label_lines = label_reader.lines();

    let mut inputs: Vec<Vec<f64>> = Vec::new();
    let mut targets: Vec<Vec<f64>> = Vec::new();
    let mut line_no = 0usize;

    loop {
        let data_line = match data_lines.next() {
            Some(line) => {
                line.map_err(|e| DatasetError(format!("failed reading '{data_path}': {e}")))?
            }
            None => break,
        };
        line_no += 1;

        let label_line = match label_lines.next() {
            Some(line) => {
                line.map_err(|e| DatasetError(format!("failed reading '{labels_path}': {e}")))?
            }
            None => {
                return Err(DatasetError(format!(
                    "'{labels_path}' has fewer lines than '{data_path}'"
                )))
            }
        };

        let cells: Vec<&str> = data_line.split(',').collect();
        if cells.len() != input_width {
            return Err(DatasetError(format!(
                "line {line_no}: expected {input_width} values in '{data_path}', got {}",
                cells.len()
            )));
        }

        let mut row = Vec::with_capacity(input_width);
        for cell in cells {
            let value: f64 = cell.trim().parse().map_err(|_| {
                DatasetError(format!(
                    "line {line_no}: '{}' is not a valid number",
                    cell.trim()
                ))
            })?;
            row.push(value.max(0.0) / 255.0);
        }

        let label: i64 = label_line.trim().parse().map_err(|_| {
            DatasetError(format!(
                "line {line_no}: invalid label '{}' in '{labels_path}'",
                label_line.trim()
            ))
        })?;
        if label != 0 && label != 1 {
            return Err(DatasetError(format!(
                "line {line_no}: label must be 0 or 1, got {label}"
            )));
        }

        inputs.push(row);
        targets.push(vec![label as f64]);
    }

    if label_lines.next().is_some() {
        return Err(DatasetError(format!(
            "'{labels_path}' has more lines than '{data_path}'"
        )));
    }
    if inputs.is_empty() {
        return Err(DatasetError(format!("'{data_path}' contains no samples")));
    }

    info!(
        "loaded {} samples of width {} from '{}'",
        inputs.len(),
        input_width,
        data_path
    );

    Ok(Dataset { inputs, targets })
}

fn open(path: &str) -> Result<BufReader<File>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError(format!("cannot open '{path}': {e}")))?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pair(name: &str, data: &str, labels: &str) -> (String, String) {
        let dir = std::env::temp_dir();
        let data_path = dir
            .join(format!("pyrite_data_{}_{}.csv", std::process::id(), name))
            .to_string_lossy()
            .into_owned();
        let labels_path = dir
            .join(format!("pyrite_labels_{}_{}.csv", std::process::id(), name))
            .to_string_lossy()
            .into_owned();
        std::fs::write(&data_path, data).unwrap();
        std::fs::write(&labels_path, labels).unwrap();
        (data_path, labels_path)
    }

    fn cleanup(paths: (String, String)) {
        std::fs::remove_file(paths.0).ok();
        std::fs::remove_file(paths.1).ok();
    }

    #[test]
    fn loads_and_normalizes_paired_files() {
        let paths = temp_pair(
            "valid",
            "255,0,51,127.5\n-3,255,255,255\n0,0,0,0\n",
            "0\n1\n1\n",
        );
        let dataset = load_dataset(&paths.0, &paths.1, 4).unwrap();
        cleanup(paths);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.inputs[0], vec![1.0, 0.0, 0.2, 0.5]);
        // Negative values clamp to zero before scaling.
        assert_eq!(dataset.inputs[1][0], 0.0);
        assert_eq!(dataset.targets, vec![vec![0.0], vec![1.0], vec![1.0]]);
    }

    #[test]
    fn reports_the_line_of_a_wrong_width_row() {
        let paths = temp_pair("width", "1,2,3\n1,2\n", "0\n1\n");
        let err = load_dataset(&paths.0, &paths.1, 3).unwrap_err();
        cleanup(paths);

        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn reports_non_numeric_feature_values() {
        let paths = temp_pair("feature", "1,x,3\n", "0\n");
        let err = load_dataset(&paths.0, &paths.1, 3).unwrap_err();
        cleanup(paths);

        assert!(err.to_string().contains("'x' is not a valid number"));
    }

    #[test]
    fn rejects_labels_other_than_zero_and_one() {
        let paths = temp_pair("label_range", "1,2,3\n", "2\n");
        let err = load_dataset(&paths.0, &paths.1, 3).unwrap_err();
        cleanup(paths);

        assert!(err.to_string().contains("label must be 0 or 1"));
    }

    #[test]
    fn rejects_non_numeric_labels() {
        let paths = temp_pair("label_text", "1,2,3\n", "yes\n");
        let err = load_dataset(&paths.0, &paths.1, 3).unwrap_err();
        cleanup(paths);

        assert!(err.to_string().contains("invalid label 'yes'"));
    }

    #[test]
    fn label_and_data_row_counts_must_match() {
        let short = temp_pair("short", "1,2,3\n4,5,6\n", "0\n");
        let err = load_dataset(&short.0, &short.1, 3).unwrap_err();
        cleanup(short);
        assert!(err.to_string().contains("fewer lines"));

        let long = temp_pair("long", "1,2,3\n", "0\n1\n");
        let err = load_dataset(&long.0, &long.1, 3).unwrap_err();
        cleanup(long);
        assert!(err.to_string().contains("more lines"));
    }

    #[test]
    fn empty_files_are_rejected() {
        let paths = temp_pair("empty", "", "");
        let err = load_dataset(&paths.0, &paths.1, 3).unwrap_err();
        cleanup(paths);

        assert!(err.to_string().contains("no samples"));
    }

    #[test]
    fn missing_files_are_reported_with_their_path() {
        let err = load_dataset("/nonexistent/data.csv", "/nonexistent/labels.csv", 3).unwrap_err();
        assert!(err.to_string().contains("cannot open"));
        assert!(err.to_string().contains("/nonexistent/data.csv"));
    }

    #[test]
    fn split_divides_by_index_without_shuffling() {
        let dataset = Dataset {
            inputs: (0..10).map(|i| vec![i as f64]).collect(),
            targets: (0..10).map(|_| vec![0.0]).collect(),
        };

        let (train, validation) = dataset.split(0.8);
        assert_eq!(train.len(), 8);
        assert_eq!(validation.len(), 2);
        assert_eq!(train.inputs[0], vec![0.0]);
        assert_eq!(validation.inputs[0], vec![8.0]);
    }

    #[test]
    fn split_handles_extreme_ratios() {
        let dataset = Dataset {
            inputs: (0..10).map(|i| vec![i as f64]).collect(),
            targets: (0..10).map(|_| vec![1.0]).collect(),
        };
        let (train, validation) = dataset.clone().split(1.0);
        assert_eq!((train.len(), validation.len()), (10, 0));

        let (train, validation) = dataset.split(0.0);
        assert_eq!((train.len(), validation.len()), (0, 10));
    }

    #[test]
    fn samples_pairs_inputs_with_targets() {
        let dataset = Dataset {
            inputs: vec![vec![1.0], vec![2.0]],
            targets: vec![vec![0.0], vec![1.0]],
        };
        let pairs: Vec<_> = dataset.samples().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], (&[2.0][..], &[1.0][..]));
    }
}
