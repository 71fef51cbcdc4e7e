use rand::prelude::*;

/// Dense row-major matrix. A weight matrix between two layers has one row
/// per destination neuron and one column per source neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a new matrix with uniform draws from [-1, 1].
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        Matrix { rows, cols, data }
    }

    /// Matrix-vector product. `vector` length must equal `cols`.
    pub fn mul_vec(&self, vector: &[f64]) -> Vec<f64> {
        assert_eq!(vector.len(), self.cols, "vector length must match column count");

        self.data
            .iter()
            .map(|row| row.iter().zip(vector.iter()).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Product of this matrix's transpose with `vector`, without
    /// materializing the transpose. `vector` length must equal `rows`.
    pub fn transposed_mul_vec(&self, vector: &[f64]) -> Vec<f64> {
        assert_eq!(vector.len(), self.rows, "vector length must match row count");

        let mut res = vec![0.0; self.cols];
        for (row, v) in self.data.iter().zip(vector.iter()) {
            for (r, w) in res.iter_mut().zip(row.iter()) {
                *r += w * v;
            }
        }

        res
    }

    /// Adds the outer product of `column` and `row`, scaled by `scale`,
    /// in place.
    pub fn add_scaled_outer(&mut self, column: &[f64], row: &[f64], scale: f64) {
        assert_eq!(column.len(), self.rows, "column length must match row count");
        assert_eq!(row.len(), self.cols, "row length must match column count");

        for (matrix_row, c) in self.data.iter_mut().zip(column.iter()) {
            for (value, r) in matrix_row.iter_mut().zip(row.iter()) {
                *value += scale * c * r;
            }
        }
    }

    /// Combines two same-shape matrices element by element.
    pub fn zip_map<F>(&self, other: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(self.rows, other.rows, "row counts must match");
        assert_eq!(self.cols, other.cols, "column counts must match");

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(row_a, row_b)| {
                row_a
                    .iter()
                    .zip(row_b.iter())
                    .map(|(a, b)| functor(*a, *b))
                    .collect()
            })
            .collect();

        Matrix::from_data(data)
    }
}
