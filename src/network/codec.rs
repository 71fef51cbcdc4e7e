//! Text persistence for network parameters.
//!
//! Layout, one block per layer transition:
//!
//! ```text
//! pyrite weights v1
//! topology 400 10 1
//! weights 0 10x400
//! <400 space-separated values, one line per matrix row>
//! biases 0 10
//! <10 space-separated values on one line>
//! weights 1 1x10
//! ...
//! ```
//!
//! Values are written with `f64`'s shortest round-trip formatting, so a load
//! restores every parameter exactly.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use crate::activation::activation::Activation;
use crate::error::Error;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::topology::Topology;

const MAGIC: &str = "pyrite weights v1";

impl Network {
    /// Writes the topology and every parameter to a text file at `path`.
    pub fn save_weights(&self, path: &str) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_weights(&mut writer).map_err(|e| Error::io(path, e))?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    /// Replaces this network's parameters with the contents of `path`.
    /// The file's topology must match the network's own.
    pub fn load_weights(&mut self, path: &str) -> Result<(), Error> {
        let (topology, weights, biases) = read_weights_file(path)?;
        if topology != self.topology {
            return Err(Error::TopologyMismatch {
                expected: self.topology.layers().to_vec(),
                actual: topology.layers().to_vec(),
            });
        }
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    /// Builds a network from a weights file, taking the topology from the
    /// file itself.
    pub fn load_from(
        path: &str,
        activation: Activation,
        learning_rate: f64,
    ) -> Result<Network, Error> {
        let (topology, weights, biases) = read_weights_file(path)?;
        Network::from_parts(topology, weights, biases, activation, learning_rate)
    }

    fn write_weights<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{MAGIC}")?;
        writeln!(writer, "topology {}", join(self.topology.layers()))?;

        for (t, (weights, biases)) in self.weights.iter().zip(self.biases.iter()).enumerate() {
            writeln!(writer, "weights {} {}x{}", t, weights.rows, weights.cols)?;
            for row in &weights.data {
                writeln!(writer, "{}", join(row))?;
            }
            writeln!(writer, "biases {} {}", t, biases.len())?;
            writeln!(writer, "{}", join(biases))?;
        }

        Ok(())
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Line-at-a-time reader that remembers its position for error reports.
struct Lines<'a, R> {
    reader: R,
    path: &'a str,
    line: usize,
}

impl<'a, R: BufRead> Lines<'a, R> {
    fn next_line(&mut self) -> Result<String, Error> {
        let mut buf = String::new();
        let n = self
            .reader
            .read_line(&mut buf)
            .map_err(|e| Error::io(self.path, e))?;
        self.line += 1;
        if n == 0 {
            return Err(self.malformed("unexpected end of file"));
        }
        Ok(buf.trim_end().to_string())
    }

    fn malformed(&self, detail: impl Into<String>) -> Error {
        Error::MalformedWeights {
            path: self.path.to_string(),
            line: self.line,
            detail: detail.into(),
        }
    }
}

fn read_weights_file(path: &str) -> Result<(Topology, Vec<Matrix>, Vec<Vec<f64>>), Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut lines = Lines {
        reader: BufReader::new(file),
        path,
        line: 0,
    };

    let magic = lines.next_line()?;
    if magic != MAGIC {
        return Err(lines.malformed(format!("expected header '{MAGIC}', got '{magic}'")));
    }

    let topology_line = lines.next_line()?;
    let widths = match topology_line.strip_prefix("topology ") {
        Some(rest) => parse_usizes(rest).map_err(|detail| lines.malformed(detail))?,
        None => return Err(lines.malformed("expected a 'topology' line")),
    };
    let topology = Topology::new(widths)?;

    let mut weights = Vec::with_capacity(topology.transitions());
    let mut biases = Vec::with_capacity(topology.transitions());

    for t in 0..topology.transitions() {
        let rows = topology.layers()[t + 1];
        let cols = topology.layers()[t];

        let header = lines.next_line()?;
        let (declared_rows, declared_cols) =
            parse_weights_header(&header, t).map_err(|detail| lines.malformed(detail))?;
        if (declared_rows, declared_cols) != (rows, cols) {
            return Err(lines.malformed(format!(
                "weights {t} declared {declared_rows}x{declared_cols}, topology requires {rows}x{cols}"
            )));
        }

        let mut data = Vec::with_capacity(rows);
        for _ in 0..rows {
            let row_line = lines.next_line()?;
            let row = parse_f64s(&row_line).map_err(|detail| lines.malformed(detail))?;
            if row.len() != cols {
                return Err(lines.malformed(format!("expected {cols} values, got {}", row.len())));
            }
            data.push(row);
        }
        weights.push(Matrix::from_data(data));

        let header = lines.next_line()?;
        let declared_len =
            parse_biases_header(&header, t).map_err(|detail| lines.malformed(detail))?;
        if declared_len != rows {
            return Err(lines.malformed(format!(
                "biases {t} declared length {declared_len}, topology requires {rows}"
            )));
        }

        let bias_line = lines.next_line()?;
        let bias = parse_f64s(&bias_line).map_err(|detail| lines.malformed(detail))?;
        if bias.len() != rows {
            return Err(lines.malformed(format!("expected {rows} values, got {}", bias.len())));
        }
        biases.push(bias);
    }

    Ok((topology, weights, biases))
}

fn parse_usizes(text: &str) -> Result<Vec<usize>, String> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| format!("'{tok}' is not a valid width"))
        })
        .collect()
}

fn parse_f64s(text: &str) -> Result<Vec<f64>, String> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| format!("'{tok}' is not a valid number"))
        })
        .collect()
}

fn parse_weights_header(line: &str, index: usize) -> Result<(usize, usize), String> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("weights") {
        return Err(format!("expected 'weights {index} <rows>x<cols>', got '{line}'"));
    }

    let declared: usize = parts
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| format!("missing block index in '{line}'"))?;
    if declared != index {
        return Err(format!("expected weights block {index}, got {declared}"));
    }

    let dims = parts
        .next()
        .ok_or_else(|| format!("missing dimensions in '{line}'"))?;
    let (rows, cols) = dims
        .split_once('x')
        .ok_or_else(|| format!("bad dimensions '{dims}'"))?;
    let rows = rows.parse().map_err(|_| format!("bad dimensions '{dims}'"))?;
    let cols = cols.parse().map_err(|_| format!("bad dimensions '{dims}'"))?;
    Ok((rows, cols))
}

fn parse_biases_header(line: &str, index: usize) -> Result<usize, String> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("biases") {
        return Err(format!("expected 'biases {index} <len>', got '{line}'"));
    }

    let declared: usize = parts
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| format!("missing block index in '{line}'"))?;
    if declared != index {
        return Err(format!("expected biases block {index}, got {declared}"));
    }

    parts
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| format!("missing length in '{line}'"))
}
